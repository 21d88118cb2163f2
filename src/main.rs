use clap::Parser;
use laptop_catalog_mcp::cli::{self, Cli, Commands};
use laptop_catalog_mcp::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the MCP protocol.
    logging::init(cli.config.log_format);

    cli::run(&cli.config, cli.command.unwrap_or(Commands::Serve)).await
}
