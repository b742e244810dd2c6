use clap::{Args, Parser, Subcommand};
use reqwest::{Response, StatusCode};
use serde_json::{json, Number, Value};

#[derive(Parser)]
#[command(name = "cars-cli")]
#[command(about = "Command-line client for the car service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://127.0.0.1:8081")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every car
    List,
    /// Show one car
    Get { id: String },
    /// Add a new car
    Create {
        #[arg(long)]
        id: String,
        #[command(flatten)]
        fields: Fields,
    },
    /// Replace the details of an existing car
    Update {
        id: String,
        #[command(flatten)]
        fields: Fields,
    },
    /// Remove a car
    Delete { id: String },
}

#[derive(Args)]
struct Fields {
    #[arg(long)]
    make: String,
    #[arg(long)]
    model: String,
    #[arg(long)]
    year: i64,
    /// Sent exactly as typed: `9300` stays an integer.
    #[arg(long, value_parser = parse_price)]
    price: Number,
}

fn parse_price(raw: &str) -> Result<Number, String> {
    raw.parse::<Number>()
        .map_err(|e| format!("{raw:?} is not a JSON number: {e}"))
}

impl Fields {
    fn to_json(&self) -> Value {
        json!({
            "make": self.make,
            "model": self.model,
            "year": self.year,
            "price": self.price,
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::List => client.get(format!("{}/cars", base)).send().await?,
        Commands::Get { id } => client.get(format!("{}/car/{}", base, id)).send().await?,
        Commands::Create { id, fields } => {
            let mut body = fields.to_json();
            body["id"] = Value::String(id);
            client.post(format!("{}/cars", base)).json(&body).send().await?
        }
        Commands::Update { id, fields } => {
            client
                .put(format!("{}/car/{}", base, id))
                .json(&fields.to_json())
                .send()
                .await?
        }
        Commands::Delete { id } => client.delete(format!("{}/car/{}", base, id)).send().await?,
    };

    print_response(res).await
}

async fn print_response(res: Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let explanation = match status {
        StatusCode::OK | StatusCode::ACCEPTED => "ok",
        StatusCode::BAD_REQUEST => "malformed request",
        StatusCode::NOT_FOUND => "no such car",
        StatusCode::CONFLICT => "a car with that id already exists",
        StatusCode::UNPROCESSABLE_ENTITY => "body has the wrong fields",
        _ => "unexpected response",
    };
    println!("{} ({})", status, explanation);

    let text = res.text().await?;
    if !text.is_empty() {
        let json: Value = serde_json::from_str(&text)?;
        println!("{}", serde_json::to_string_pretty(&json)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(price: &str) -> Fields {
        Fields {
            make: "BMW".into(),
            model: "Z4".into(),
            year: 2005,
            price: parse_price(price).unwrap(),
        }
    }

    #[test]
    fn test_integer_price_is_sent_as_integer() {
        let body = fields("9300").to_json().to_string();
        assert!(body.contains("\"price\":9300"), "{body}");
        assert!(!body.contains("9300.0"));
    }

    #[test]
    fn test_fractional_price_is_kept() {
        assert_eq!(fields("1500.5").to_json()["price"], json!(1500.5));
    }

    #[test]
    fn test_non_numeric_price_is_rejected() {
        assert!(parse_price("cheap").is_err());
    }

    #[test]
    fn test_create_command_parses_integer_price() {
        let cli = Cli::try_parse_from([
            "cars-cli", "create", "--id", "24", "--make", "BMW", "--model", "Z4",
            "--year", "2005", "--price", "9300",
        ])
        .unwrap();
        match cli.command {
            Commands::Create { id, fields } => {
                assert_eq!(id, "24");
                assert_eq!(fields.price, Number::from(9300));
            }
            _ => panic!("expected create"),
        }
    }
}
