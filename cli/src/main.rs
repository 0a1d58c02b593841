//! fastroute CLI: load a route table and query it.
//!
//! Subcommands:
//! - `find <routes> <METHOD> <path> [--no-params]`: print the matching route
//! - `check <routes>`: validate that a route table loads
//!
//! Route tables are YAML, or JSON when the file ends in `.json`. Payloads are
//! arbitrary values and are echoed back as JSON. Set `RUST_LOG=fastroute=debug`
//! to watch routes being registered.

use std::collections::BTreeMap;
use std::process;

use fastroute::{FindOptions, Match, Router, RoutesConfig};
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "find" => cmd_find(&args[2..]),
        "check" => cmd_check(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("error: unknown command \"{other}\"");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Commands
// ═══════════════════════════════════════════════════════════════════════════════

fn cmd_find(args: &[String]) -> Result<(), String> {
    let query = parse_find_args(args)?;
    let router = load_router(&query.routes)?;

    match router.find_with(&query.method, &query.path, query.options) {
        Some(found) => println!("{}", render_match(&found)),
        None => println!("(no match)"),
    }

    Ok(())
}

fn cmd_check(args: &[String]) -> Result<(), String> {
    let [path] = args else {
        return Err("check requires a route table path".into());
    };

    let router = load_router(path)?;
    println!("Route table valid ({} routes)", router.len());
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// Route table loading
// ═══════════════════════════════════════════════════════════════════════════════

fn load_router(path: &str) -> Result<Router<Value>, String> {
    load_config(path)?
        .build()
        .map_err(|e| format!("route table invalid: {e}"))
}

fn load_config(path: &str) -> Result<RoutesConfig<Value>, String> {
    let content =
        std::fs::read_to_string(path).map_err(|e| format!("failed to read \"{path}\": {e}"))?;
    parse_config(path, &content)
}

fn parse_config(path: &str, content: &str) -> Result<RoutesConfig<Value>, String> {
    let is_json = std::path::Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    tracing::debug!(path, json = is_json, "parsing route table");

    if is_json {
        serde_json::from_str(content).map_err(|e| format!("JSON parse error: {e}"))
    } else {
        // Default to YAML (handles .yaml and .yml)
        serde_yaml::from_str(content).map_err(|e| format!("YAML parse error: {e}"))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Output
// ═══════════════════════════════════════════════════════════════════════════════

/// `{"data": ..., "params": {...} | null}` with parameters sorted by name.
fn render_match(found: &Match<'_, Value>) -> Value {
    let params = found.params.as_ref().map(|params| {
        params
            .iter()
            .map(|(k, v)| (k.to_owned(), Value::String(v.to_owned())))
            .collect::<BTreeMap<_, _>>()
    });
    serde_json::json!({
        "data": found.data,
        "params": params,
    })
}

// ═══════════════════════════════════════════════════════════════════════════════
// Argument parsing
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, PartialEq)]
struct FindQuery {
    routes: String,
    method: String,
    path: String,
    options: FindOptions,
}

fn parse_find_args(args: &[String]) -> Result<FindQuery, String> {
    let mut positional = Vec::new();
    let mut options = FindOptions::new();

    for arg in args {
        match arg.as_str() {
            "--no-params" => options = options.with_params(false),
            flag if flag.starts_with("--") => {
                return Err(format!("unexpected argument \"{flag}\""));
            }
            value => positional.push(value.to_owned()),
        }
    }

    let [routes, method, path]: [String; 3] = positional
        .try_into()
        .map_err(|_| "find requires <routes> <METHOD> <path>".to_owned())?;

    Ok(FindQuery {
        routes,
        method,
        path,
        options,
    })
}

fn print_usage() {
    eprintln!(
        "Usage: fastroute <command> [options]

Commands:
  find <routes> <METHOD> <path> [--no-params]   Print the route matching a request
  check <routes>                                Validate a route table
  help                                          Show this help

Use an empty METHOD (\"\") to match only routes registered for any method."
    );
}
