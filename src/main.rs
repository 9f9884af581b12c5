use crate::generator::workflow::launch;
use anyhow::Result;
use clap::Parser;

mod cli;
mod config;
mod generator;
mod llm;
mod outlet;
mod search;
mod utils;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Args::parse();
    let topic = args.topic.clone();
    let config = args.into_config();

    launch(&config, &topic).await
}
