use crate::config::CatalogConfig;
use crate::error::Result;
use crate::format::{format_filter_options, format_laptop_detail, format_result_page};
use crate::search::{self, Preset, RawQuery, SortStrategy, query::keys, similar};
use crate::server::serve;
use crate::state::CatalogState;
use crate::tools::search::brand_suggestions;
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "laptop-catalog-mcp", version)]
#[command(about = "Laptop catalog search and inquiries over MCP", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub config: CatalogConfig,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the MCP protocol over stdio (the default)
    Serve,
    /// Run a search against the catalog and print the results
    Search {
        /// Filter as key=value (e.g. ram=16); repeat a key to accept several values
        #[arg(short, long = "filter", value_parser = parse_filter)]
        filters: Vec<(String, String)>,
        /// relevance, price-ascending or price-descending
        #[arg(short, long)]
        sort: Option<String>,
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        page: i64,
        /// Results per page
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// budget, gaming or student
        #[arg(long)]
        preset: Option<Preset>,
        /// Print the result page as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one laptop by id
    Show {
        id: String,
        #[arg(long)]
        json: bool,
    },
    /// List the values each filter accepts
    Options,
}

fn parse_filter(arg: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{arg}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing filter key in '{arg}'"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

/// Run a command against the configured catalog.
pub async fn run(config: &CatalogConfig, command: Commands) -> Result<()> {
    let state = CatalogState::from_config(config)
        .await
        .context("Failed to open catalog")?;
    let laptops = state.snapshot().await;

    match command {
        Commands::Serve => serve(Arc::new(state)).await?,
        Commands::Search {
            filters,
            sort,
            page,
            limit,
            preset,
            json,
        } => {
            let strategy = match (sort, preset) {
                (Some(sort), _) => sort.parse::<SortStrategy>()?,
                (None, Some(preset)) => preset.strategy(),
                (None, None) => SortStrategy::default(),
            };
            let filters = RawQuery::from_pairs(filters);
            let raw = match preset {
                Some(preset) => preset.query().merged_with(&filters),
                None => filters,
            };

            let result = search::search(
                &laptops,
                &raw,
                strategy,
                page,
                limit.unwrap_or(state.default_page_size()),
            );

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                let suggestions = if result.total_count == 0 {
                    brand_suggestions(&laptops, &raw.tokens(keys::BRAND))
                } else {
                    Vec::new()
                };
                print!("{}", format_result_page(&result, &suggestions));
            }
        }
        Commands::Show { id, json } => {
            let laptop = laptops
                .iter()
                .find(|l| l.id.as_str() == id)
                .with_context(|| format!("Laptop '{id}' not found"))?;
            if json {
                println!("{}", serde_json::to_string_pretty(laptop)?);
            } else {
                let similar = similar::similar_to(&laptops, laptop, similar::SIMILAR_LIMIT);
                print!("{}", format_laptop_detail(laptop, &similar));
            }
        }
        Commands::Options => print!("{}", format_filter_options()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_repeated_filters() {
        let cli = Cli::parse_from([
            "laptop-catalog-mcp",
            "search",
            "-f",
            "ram=16",
            "-f",
            "ram=32",
            "--sort",
            "price-low",
        ]);
        let Some(Commands::Search { filters, sort, .. }) = cli.command else {
            panic!("expected search command");
        };
        check!(filters == vec![
            ("ram".to_string(), "16".to_string()),
            ("ram".to_string(), "32".to_string())
        ]);
        check!(sort.as_deref() == Some("price-low"));
    }

    #[test]
    fn test_parse_filter_rejects_missing_equals() {
        check!(parse_filter("ram").is_err());
        check!(parse_filter("=16").is_err());
        check!(parse_filter("brand=").unwrap() == ("brand".to_string(), String::new()));
    }
}
