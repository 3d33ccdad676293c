//! sqlapi - sanitize a JSON WHERE-clause tree against a column whitelist

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use config::Config;
use std::io::Read;
use std::path::PathBuf;

/// Validate a client-supplied WHERE clause and print its sanitized SQL form
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON expression tree to sanitize ("-" or absent reads stdin)
    input: Option<PathBuf>,

    /// TOML config file with `columns` and `max_depth`
    #[arg(short = 'C', long)]
    config: Option<PathBuf>,

    /// Whitelisted column (repeatable, added to the config file's list)
    #[arg(short, long = "column", value_name = "NAME")]
    columns: Vec<String>,

    /// Maximum nesting depth (overrides the config file)
    #[arg(short = 'd', long)]
    max_depth: Option<usize>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    }
    .with_overrides(&args.columns, args.max_depth);
    log::debug!("Whitelist: {:?}", config.columns);

    let validator = config.validator()?;
    let input = read_input(args.input.as_deref())?;

    let sql = validator
        .sanitize_bytes(&input)
        .context("Rejected where clause")?;
    println!("{sql}");
    Ok(())
}

fn read_input(path: Option<&std::path::Path>) -> Result<Vec<u8>> {
    match path {
        Some(p) if p.as_os_str() != "-" => {
            std::fs::read(p).with_context(|| format!("Failed to read input {}", p.display()))
        },
        _ => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        },
    }
}
