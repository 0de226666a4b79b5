//! Route queries from the command line and print the envelopes.
//!
//! Run with: cargo run -p orchestrator --example route_query -- "Price BONK"
//!
//! Without arguments, queries are read from stdin, one per line.
//!
//! Configuration via .env file or environment variables:
//!   OPENAI_API_KEY   - primary provider (optional)
//!   GEMINI_API_KEY   - secondary provider (optional)
//!   BIRDEYE_API_KEY  - live market data (optional, demo data otherwise)

use std::env;
use std::io::{self, BufRead};

use orchestrator::Orchestrator;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "orchestrator=debug,info".into()),
        )
        .init();

    let orchestrator = Orchestrator::from_env()?;
    let wallet = env::var("SOLGO_WALLET").ok();

    let args: Vec<String> = env::args().skip(1).collect();
    let prompts: Vec<String> = if args.is_empty() {
        io::stdin().lock().lines().collect::<Result<_, _>>()?
    } else {
        vec![args.join(" ")]
    };

    for prompt in prompts.iter().map(|p| p.trim()).filter(|p| !p.is_empty()) {
        info!(prompt, "ROUTING");
        let envelope = orchestrator.route(prompt, wallet.as_deref()).await;
        if let Some(err) = envelope.error() {
            error!(error = err, "ROUTE_FAILED");
        }
        println!("{}", serde_json::to_string_pretty(&envelope)?);
    }

    Ok(())
}
