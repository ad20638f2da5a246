use clap::{Parser, Subcommand};
use reqwest::StatusCode;
use serde_json::Value;
use std::io::Read;
use std::path::PathBuf;
use url::Url;

use urlcounts::http::UrlcountsRequest;

#[derive(Parser)]
#[command(name = "urlcounts-cli")]
#[command(about = "Client for the urlcounts service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://127.0.0.1:5000")]
    url: Url,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit newline-separated URLs from FILE (or stdin) and print the counts
    Count {
        file: Option<PathBuf>,
    },
    /// Check service status
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Count { file } => {
            let text = match file {
                Some(path) => std::fs::read_to_string(path)?,
                None => {
                    let mut text = String::new();
                    std::io::stdin().read_to_string(&mut text)?;
                    text
                }
            };

            let request = build_request(&text)?;
            let res = client
                .post(cli.url.join("urlcounts")?)
                .json(&request)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Status => {
            let res = client.get(cli.url.join("status")?).send().await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

/// Build the request body, refusing input with no URLs.
fn build_request(text: &str) -> Result<UrlcountsRequest, Box<dyn std::error::Error>> {
    let urls = parse_url_lines(text);
    if urls.is_empty() {
        return Err("no URLs provided".into());
    }
    Ok(UrlcountsRequest { urls })
}

/// One URL per line; blank lines are skipped.
fn parse_url_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        let text = res.text().await.unwrap_or_default();
        return Err(status_error(status, &text).into());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

fn status_error(status: StatusCode, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        format!("urlcounts returned status {}", status)
    } else {
        format!("urlcounts returned status {}: {}", status, body)
    }
}
