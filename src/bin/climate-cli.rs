use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "climate-cli")]
#[command(about = "Query a running Climate API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:5000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Precipitation over the last year of data
    Precipitation,
    /// Weather station names
    Stations,
    /// Temperature observations over the last year of data
    Tobs,
    /// Min, average and max temperature from START, optionally up to END
    Stats {
        start: String,
        end: Option<String>,
    },
    /// Store connectivity
    Health,
}

impl Commands {
    fn path(&self) -> String {
        match self {
            Commands::Precipitation => "/api/v1.0/precipitation".to_string(),
            Commands::Stations => "/api/v1.0/stations".to_string(),
            Commands::Tobs => "/api/v1.0/tobs".to_string(),
            Commands::Stats { start, end: None } => format!("/api/v1.0/{}", start),
            Commands::Stats { start, end: Some(end) } => format!("/api/v1.0/{}/{}", start, end),
            Commands::Health => "/health".to_string(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let url = format!("{}{}", cli.url.trim_end_matches('/'), cli.command.path());
    let res = client.get(url).send().await?;
    print_response(res).await?;

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: Climate API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
