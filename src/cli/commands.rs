//! CLI commands and argument parsing

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Page through Twitter REST resources
#[derive(Parser, Debug)]
#[command(name = "twitter-pager")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// API version (`1.1` or `2`), overrides config and environment
    #[arg(long, global = true)]
    pub api_version: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Stream every item of a resource as JSON lines
    Page(PageArgs),
}

/// Arguments of the `page` command
#[derive(Args, Debug, Clone)]
pub struct PageArgs {
    /// Resource path, e.g. `search/tweets` or `tweets/search/recent`
    pub resource: String,

    /// Request parameter (repeatable)
    #[arg(short = 'p', long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
    pub params: Vec<(String, String)>,

    /// Minimum seconds between page requests
    #[arg(long, default_value = "5")]
    pub wait: f64,

    /// Poll forward for newer results instead of walking back
    #[arg(long)]
    pub new_tweets: bool,

    /// Stop after this many items
    #[arg(long)]
    pub max_items: Option<usize>,

    /// Give up after this many consecutive retries
    #[arg(long)]
    pub max_retries: Option<u32>,

    /// Pretty-print each item
    #[arg(long)]
    pub pretty: bool,
}

/// Parse a `key=value` request parameter
pub fn parse_param(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid parameter `{s}`: expected KEY=VALUE"))?;
    if key.is_empty() {
        return Err(format!("invalid parameter `{s}`: empty key"));
    }
    Ok((key.to_string(), value.to_string()))
}
