use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;

use crate::loader::load_sources;
use crate::router::{MatchResult, RequestDescriptor, RequestMatcher, RouteTable};
use crate::runtime_config::MatcherConfig;

/// Command-line interface for routes files
#[derive(Parser)]
#[command(name = "brrtroute")]
#[command(about = "BRRTRouter routes DSL tooling", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Parse and compile routes files and list the table
    Check {
        /// Routes files or file-name patterns, applied in the order given
        #[arg(short, long = "routes", required = true)]
        routes: Vec<PathBuf>,
    },
    /// Resolve a single request against routes files
    Match {
        /// Routes files or file-name patterns, applied in the order given
        #[arg(short, long = "routes", required = true)]
        routes: Vec<PathBuf>,

        /// Request method
        #[arg(short, long, default_value = "GET")]
        method: String,

        /// Request path (a `?query` suffix is split off)
        #[arg(short, long)]
        path: String,

        /// Host header value
        #[arg(long)]
        host: Option<String>,

        /// Raw query string
        #[arg(short, long)]
        query: Option<String>,

        /// Request header as `name: value` (repeatable)
        #[arg(short = 'H', long = "header", value_parser = parse_header)]
        headers: Vec<(String, String)>,
    },
}

/// Parse `name: value` (or `name=value`) into a header pair.
pub fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .or_else(|| raw.split_once('='))
        .ok_or_else(|| format!("expected `name: value`, got `{raw}`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("empty header name in `{raw}`"));
    }
    Ok((name.to_ascii_lowercase(), value.trim().to_string()))
}

/// JSON view of a match result (or of a miss, for `None`).
#[must_use]
pub fn match_to_json(result: Option<&MatchResult>) -> serde_json::Value {
    match result {
        None => json!({ "matched": false }),
        Some(m) => {
            let params: serde_json::Map<String, serde_json::Value> = m
                .params
                .iter()
                .map(|(k, v)| (k.to_string(), json!(v)))
                .collect();
            json!({
                "matched": true,
                "action": m.action,
                "params": params,
                "route": {
                    "index": m.route.index(),
                    "method": m.route.rule.method.to_string(),
                    "host": m.route.rule.host.to_string(),
                    "path": m.route.rule.path.raw,
                    "action": m.route.rule.action,
                    "origin": m.route.rule.origin.to_string(),
                },
            })
        }
    }
}

/// Run a parsed command line.
pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Check { routes } => {
            let sources = load_sources(&routes)?;
            let table = match RouteTable::from_sources(&sources) {
                Ok(table) => table,
                Err(err) => {
                    for parse_error in err.parse_errors() {
                        eprintln!("error: {parse_error}");
                    }
                    bail!(err);
                }
            };
            table.dump_routes();
            println!("ok: {} route(s) from {} file(s)", table.len(), sources.len());
        }
        Commands::Match {
            routes,
            method,
            path,
            host,
            query,
            headers,
        } => {
            let sources = load_sources(&routes)?;
            let table = RouteTable::from_sources(&sources).context("routes failed to load")?;
            let matcher = RequestMatcher::with_config(table, MatcherConfig::from_env());

            let mut request = RequestDescriptor::new(&method, &path).with_headers(&headers);
            if let Some(host) = host.as_deref() {
                request = request.with_host(host);
            }
            if let Some(query) = query.as_deref() {
                request = request.with_query(query);
            }

            let result = matcher.match_request(&request);
            println!(
                "{}",
                serde_json::to_string_pretty(&match_to_json(result.as_ref()))?
            );
        }
    }
    Ok(())
}
