//! trcplay CLI entry point.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use trcplay::cli::Args;
use trcplay::player;

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse_or_exit();

    // Set up logging
    let filter = args.log_filter();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with_writer(std::io::stderr)
        .init();

    let summary = player::run(&args)?;

    let [pictures, sprites, types] = summary.table_sizes;
    println!(
        "Played {} ({} bytes) in {} frames",
        args.recording.display(),
        summary.recording_len,
        summary.frames
    );
    println!("Data tables: pic={pictures} spr={sprites} dat={types}");

    Ok(())
}
