// console/src/main.rs

// Entry point for the `medicare` terminal client.

use anyhow::Result;
use medicare_console::cli::start_cli;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    start_cli().await
}
