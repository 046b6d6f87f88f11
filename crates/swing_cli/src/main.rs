//! Swing Analysis CLI
//!
//! Runs the analysis pipeline on a landmark-sequence JSON file and prints
//! the result. Exists for local inspection and integration smoke tests;
//! all analysis logic lives in `swing_core`.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

#[derive(Parser)]
#[command(name = "swing_cli")]
#[command(about = "Analyze a badminton swing from pose landmarks", long_about = None)]
struct Cli {
    /// Input JSON file: { fps, frames, action?, level?, keyframe_base64? }
    #[arg(long)]
    r#in: PathBuf,

    /// Pretty-print the result JSON
    #[arg(long, default_value = "false")]
    pretty: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let request = fs::read_to_string(&cli.r#in)
        .with_context(|| format!("reading {}", cli.r#in.display()))?;

    let response = swing_core::analyze_swing_json(&request);

    if cli.pretty {
        let value: serde_json::Value =
            serde_json::from_str(&response).context("re-parsing engine response")?;
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", response);
    }

    Ok(())
}
