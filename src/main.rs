//! Resolve a single lookup key and print the result.
//!
//! Usage:
//!   locale-content <key> [--lang <code>] [--data <json>] [--ignore-missing]
//!
//! Configuration is read from the environment (see `Config::from_env`).

use anyhow::{bail, Context, Result};
use locale_content::config::Config;
use locale_content::i18n::{HttpFetcher, LocaleContentCache, Localizer, ResolvedValue};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

struct Args {
    key: String,
    language: Option<String>,
    data: Option<Value>,
    ignore_missing: bool,
}

fn parse_args() -> Result<Args> {
    let mut key = None;
    let mut language = None;
    let mut data = None;
    let mut ignore_missing = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--lang" => language = Some(args.next().context("--lang requires a value")?),
            "--data" => {
                let raw = args.next().context("--data requires a value")?;
                data = Some(serde_json::from_str(&raw).context("--data must be valid JSON")?);
            }
            "--ignore-missing" => ignore_missing = true,
            other if other.starts_with("--") => bail!("Unknown option: {}", other),
            other => key = Some(other.to_string()),
        }
    }

    Ok(Args {
        key: key.context("Usage: locale-content <key> [--lang <code>] [--data <json>] [--ignore-missing]")?,
        language,
        data,
        ignore_missing,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("locale_content=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args()?;
    let config = Config::from_env()?;

    let fetcher =
        HttpFetcher::new(config.fetch_timeout).context("Failed to build HTTP client")?;
    let cache = Arc::new(LocaleContentCache::new(fetcher));
    let mut localizer = Localizer::new(cache, Arc::new(config.settings()));

    if let Some(language) = args.language {
        if !localizer.set_language(language.as_str()) {
            bail!("Language '{}' is not supported", language);
        }
    }

    info!(
        "Resolving '{}' in {}",
        args.key,
        localizer.current_language()
    );

    let value = localizer
        .resolve(&args.key, args.data.as_ref(), args.ignore_missing)
        .await?;

    match value {
        ResolvedValue::Text(text) => println!("{}", text),
        ResolvedValue::Structured(document) => {
            println!("{}", serde_json::to_string_pretty(&document)?)
        }
    }

    Ok(())
}
