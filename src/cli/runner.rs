//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, PageArgs};
use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::TwitterClient;
use crate::pagination::{IteratorOptions, Pager};
use crate::types::{JsonValue, RequestParams};
use futures::StreamExt;
use std::io::Write;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Page(args) => {
                let config = self.client_config(|name| std::env::var(name).ok())?;
                debug!(
                    "Using API v{} at {}",
                    config.api_version, config.base_url
                );
                let client = TwitterClient::new(config)?;
                let stdout = std::io::stdout();
                let mut out = stdout.lock();
                self.page(client, args, &mut out).await?;
                Ok(())
            }
        }
    }

    /// Build the client config: file (or defaults), then environment, then flags
    pub fn client_config<F>(&self, lookup: F) -> Result<ClientConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match &self.cli.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig::default(),
        };
        config.apply_vars(lookup)?;
        if let Some(version) = &self.cli.api_version {
            config.api_version = version.parse()?;
        }
        Ok(config)
    }

    /// Stream items of `args.resource` into `out`, one JSON document per line.
    ///
    /// Returns the number of items written.
    pub async fn page<C, W>(&self, client: C, args: &PageArgs, out: &mut W) -> Result<usize>
    where
        C: ApiClient,
        W: Write,
    {
        let params: RequestParams = args.params.iter().cloned().collect();
        let mut pager = Pager::new(client, args.resource.as_str(), Some(params));

        let mut options = IteratorOptions::new()
            .wait_secs(args.wait)
            .new_tweets(args.new_tweets);
        if let Some(max_retries) = args.max_retries {
            options = options.max_retries(max_retries);
        }

        let limit = args.max_items.unwrap_or(usize::MAX);
        let mut items = pager.iter_with(options).take(limit);
        let mut count = 0;
        while let Some(item) = items.next().await {
            write_item(out, &item?, args.pretty)?;
            count += 1;
        }
        out.flush()?;

        info!("Wrote {} items from {}", count, args.resource);
        Ok(count)
    }
}

fn write_item<W: Write>(out: &mut W, item: &JsonValue, pretty: bool) -> Result<()> {
    let line = if pretty {
        serde_json::to_string_pretty(item)?
    } else {
        serde_json::to_string(item)?
    };
    writeln!(out, "{line}")?;
    Ok(())
}
