//! Send one classification request through OpenAiBrain.
//!
//! Run with: cargo run -p openai-brain --example test_classify -- "price of SOL"
//!
//! Make sure to set environment variables in .env:
//!   OPENAI_API_KEY - OpenAI API key

use openai_brain::{Brain, CompletionRequest, OpenAiBrain};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    let query = if args.len() > 1 {
        args[1..].join(" ")
    } else {
        "new token listings".to_string()
    };

    let brain = OpenAiBrain::from_env()?;
    println!("Brain: {} (model {})", brain.name(), brain.config().model);

    let request = CompletionRequest::classification(
        "Return ONLY compact JSON with a \"kind\" field.",
        format!("Query: {}\nReturn JSON only.", query),
    );

    println!("Sending: \"{}\"", query);
    let response = brain.complete(&request).await?;

    println!("=== Response ===");
    println!("{}", response);
    println!("================");

    Ok(())
}
