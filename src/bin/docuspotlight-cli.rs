use clap::{Parser, Subcommand};
use reqwest::StatusCode;
use serde_json::Value;

#[derive(Parser)]
#[command(name = "docuspotlight-cli")]
#[command(about = "Inspect a running DocuSpotlight viewer shell", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the backend endpoint, theme, toast options and routes
    Config,
    /// Resolve a viewer path to its route, task id and title
    Resolve {
        /// Path to resolve, e.g. /comparison/task/idd
        path: String,
    },
    /// Check that the shell server answers
    Health,
    /// Report a page error and show whether the shell suppresses it
    ReportError {
        message: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    match cli.command {
        Commands::Config => {
            let res = client.get(format!("{}/shell/config", base)).send().await?;
            print_response(res).await?;
        }
        Commands::Resolve { path } => {
            let res = client
                .get(format!("{}/shell/resolve", base))
                .query(&[("path", path)])
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Health => {
            let res = client.get(format!("{}/healthz", base)).send().await?;
            let status = res.status();
            println!("{} {}", status, res.text().await.unwrap_or_default());
            if status != StatusCode::OK {
                std::process::exit(1);
            }
        }
        Commands::ReportError { message } => {
            let res = client
                .post(format!("{}/shell/errors", base))
                .json(&serde_json::json!({ "message": message }))
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let json: Value = res.json().await?;
    if !status.is_success() {
        eprintln!("Error: shell returned status {}", status);
    }
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
