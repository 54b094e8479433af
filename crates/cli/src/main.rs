// ABOUTME: CLI for parsing RSS 2.0 feeds with rsskit-feed.
// ABOUTME: Loads feeds from URLs, files, or stdin and prints the parsed channels as JSON.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use rsskit_feed::RssParser;
use serde_json::json;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use url::Url;

/// Parse one or more RSS 2.0 feeds and output JSON.
#[derive(Parser, Debug)]
#[command(name = "rsskit-cli")]
#[command(about = "Parse RSS 2.0 feeds and print JSON", long_about = None)]
struct Args {
    /// Feed URL(s) (http/https) or local file paths. Use "-" to read one feed from stdin.
    #[arg(required = true)]
    targets: Vec<String>,

    /// Decode input with this charset instead of the one the document declares.
    #[arg(long)]
    charset: Option<String>,

    /// Trim whitespace around text content.
    #[arg(long, default_value_t = false)]
    trim: bool,

    /// Output compact JSON instead of pretty.
    #[arg(long, default_value_t = false)]
    compact: bool,

    /// Log parser diagnostics to stderr (overridden by RUST_LOG).
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.targets.iter().filter(|t| t.as_str() == "-").count() > 1 {
        bail!("stdin (\"-\") can only be read once");
    }

    let mut builder = RssParser::builder().trim_text(args.trim);
    if let Some(ref charset) = args.charset {
        builder = builder.charset(charset.clone());
    }
    let parser = builder.build();

    let mut results = Vec::new();
    for target in &args.targets {
        match load_bytes(target).and_then(|bytes| parser.parse_bytes(&bytes).map_err(anyhow::Error::new)) {
            Ok(channel) => {
                info!(source = target.as_str(), items = channel.items().len(), "parsed feed");
                results.push(json!({
                    "source": target,
                    "ok": true,
                    "channel": channel,
                    "error": null
                }))
            }
            Err(err) => {
                info!(source = target.as_str(), error = %err, "failed to parse feed");
                results.push(json!({
                    "source": target,
                    "ok": false,
                    "channel": null,
                    "error": format!("{:#}", err)
                }))
            }
        }
    }

    let parsed = results
        .iter()
        .filter(|r| r.get("ok").and_then(|v| v.as_bool()) == Some(true))
        .count();
    let failed = results.len() - parsed;

    // A single successful target prints the bare channel; anything else gets
    // an envelope with per-target results and counts.
    let output = if results.len() == 1 && failed == 0 {
        results[0].get("channel").cloned().unwrap_or_else(|| json!({}))
    } else {
        json!({
            "feeds": results,
            "total_feeds": results.len(),
            "parsed": parsed,
            "failed": failed
        })
    };

    if args.compact {
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&output)?);
    }

    Ok(if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_bytes(target: &str) -> Result<Vec<u8>> {
    if target == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        return Ok(buf);
    }

    if target.starts_with("http://") || target.starts_with("https://") {
        let url = Url::parse(target).with_context(|| format!("invalid url: {}", target))?;
        debug!(url = url.as_str(), "fetching feed");
        let resp = reqwest::blocking::get(url)?.error_for_status()?;
        let bytes = resp.bytes()?;
        return Ok(bytes.to_vec());
    }

    let path = PathBuf::from(target);
    if !path.exists() {
        return Err(anyhow!("file not found: {}", target));
    }
    fs::read(&path).with_context(|| format!("failed to read {}", target))
}
