mod ago;
mod github;
mod models;
mod server;

use clap::Parser;
use dotenv::dotenv;
use std::process::exit;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    match dotenv() {
        Ok(_) => (),
        Err(ref err) if err.not_found() => (),
        Err(err) => {
            eprintln!("Failed to read env: {err}");
            exit(1);
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    match server::Args::parse().run().await {
        Ok(()) => (),
        Err(error) => {
            eprintln!("Error: {error:#}");
            exit(1);
        }
    }
}

include!(concat!(env!("OUT_DIR"), "/templates.rs"));
