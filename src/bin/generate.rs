use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use force_curves::process::process_directory;

/// Turn raw force-curve captures into the per-switch CSV files and the
/// switchmeta.csv index served to the site.
#[derive(Debug, Parser)]
#[command(name = "generate", version = env!("CARGO_PKG_VERSION"))]
struct Args {
    /// One subdirectory per switch, each holding its raw capture.
    #[arg(long, default_value = "force-curves")]
    source_dir: PathBuf,

    #[arg(long, default_value = "csv_output")]
    output_dir: PathBuf,

    #[arg(long, default_value = "switchmeta.csv")]
    meta_file: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let report = process_directory(&args.source_dir, &args.output_dir, &args.meta_file)?;

    println!(
        "Wrote curves for {} switches to {} ({} directories without a capture)",
        report.processed.len(),
        args.output_dir.display(),
        report.skipped.len()
    );
    Ok(())
}
