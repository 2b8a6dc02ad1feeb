use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use std::fs;
use std::path::PathBuf;

use tcxflat::logging::{self, LogFormat, LogLevel};

/// tcxflat - TCX to CSV converter
///
/// Flattens one Training Center XML activity file into three
/// semicolon-delimited tables: activities, laps and trackpoints.
#[derive(Parser)]
#[command(name = "tcxflat")]
#[command(version = "0.1.0")]
#[command(about = "Flatten a TCX activity file into CSV tables", long_about = None)]
struct Cli {
    /// Input TCX file
    input: PathBuf,

    /// Directory the three CSV tables are written into
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log output format (pretty, json, compact)
    #[arg(long, default_value = "compact")]
    log_format: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => LogLevel::Warn,
        1 => LogLevel::Info,
        2 => LogLevel::Debug,
        _ => LogLevel::Trace,
    };
    let format = cli
        .log_format
        .parse::<LogFormat>()
        .map_err(|err| anyhow::anyhow!(err))?;
    logging::init_logging(level, format)?;

    let bytes = fs::read(&cli.input)
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;

    println!(
        "{}",
        format!("Converting {}...", cli.input.display()).green().bold()
    );

    let bundle = match tcxflat::tcx_to_csv(&bytes) {
        Ok(bundle) => bundle,
        Err(err) => {
            eprintln!("{} {}", "✗".red(), err.user_message().red());
            return Err(err.into());
        }
    };

    fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("Failed to create {}", cli.out_dir.display()))?;

    for (name, content, _mime) in bundle.artifacts() {
        let path = cli.out_dir.join(name);
        fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("  {} {}", "✓".green(), path.display());
    }

    println!("{}", "✓ Conversion completed successfully".green());
    Ok(())
}
