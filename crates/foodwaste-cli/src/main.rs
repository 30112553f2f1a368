mod prompt;
mod run;

use clap::{Parser, Subcommand};
use foodwaste_core::{AppConfig, SearchRequest};
use tracing_subscriber::EnvFilter;

use crate::run::{run_search, RunError};

#[derive(Debug, Parser)]
#[command(name = "foodwaste")]
#[command(about = "Find discounted short-dated groceries and write an HTML + PDF report")]
struct Cli {
    /// Without a subcommand an interactive menu is shown.
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search stores by ZIP code
    Zip {
        /// Danish ZIP code, e.g. 8000
        code: String,
    },
    /// Search stores around a coordinate
    Geo {
        /// Latitude in decimal degrees
        #[arg(allow_hyphen_values = true)]
        lat: String,
        /// Longitude in decimal degrees
        #[arg(allow_hyphen_values = true)]
        lon: String,
        /// Search radius in kilometres (default 5)
        #[arg(long)]
        radius: Option<String>,
    },
    /// Look up a single store by its ID
    Store {
        /// Store UUID
        id: String,
    },
}

impl Commands {
    fn to_request(&self) -> Result<SearchRequest, RunError> {
        let request = match self {
            Self::Zip { code } => SearchRequest::zip(code)?,
            Self::Geo { lat, lon, radius } => {
                SearchRequest::parse_coordinates(lat, lon, radius.as_deref())?
            }
            Self::Store { id } => SearchRequest::store_id(id)?,
        };
        Ok(request)
    }
}

fn report_error(err: &RunError) {
    eprintln!("Fejl: {err}");
    eprintln!("Tip: {}", err.hint());
}

/// Runs one search and prints the outcome. Returns whether it succeeded.
async fn run_once(config: &AppConfig, request: &SearchRequest) -> bool {
    match run_search(config, request, chrono::Utc::now()).await {
        Ok(outcome) => {
            println!("HTML: {}", outcome.paths.html.display());
            println!("PDF:  {}", outcome.paths.pdf.display());
            println!();
            print!("{}", outcome.summary);
            true
        }
        Err(err) => {
            tracing::error!(error = %err, "run failed");
            report_error(&err);
            false
        }
    }
}

async fn interactive(config: &AppConfig) -> anyhow::Result<()> {
    while let Some(request) = prompt::prompt_search()? {
        run_once(config, &request).await;
        println!();
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = match run::startup(|key| std::env::var(key)) {
        Ok(config) => config,
        Err(err) => {
            report_error(&err);
            std::process::exit(2);
        }
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(command) => {
            let request = match command.to_request() {
                Ok(request) => request,
                Err(err) => {
                    report_error(&err);
                    std::process::exit(2);
                }
            };
            if !run_once(&config, &request).await {
                std::process::exit(1);
            }
        }
        None => interactive(&config).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests;
