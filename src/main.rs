use anyhow::Result;
use type_bridge::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run_cli().await
}
