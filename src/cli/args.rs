//! Command-line argument definitions.

use clap::Parser;
use std::path::PathBuf;

use trcplay_core::Version;

/// Play back a recording against the game data tables.
#[derive(Parser, Debug)]
#[command(name = "trcplay")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Folder containing Tibia.pic, Tibia.spr and Tibia.dat
    #[arg(value_name = "DATA_FOLDER")]
    pub data_folder: PathBuf,

    /// Recording to play back
    #[arg(value_name = "RECORDING")]
    pub recording: PathBuf,

    /// Recording version as MAJOR.MINOR[.PREVIEW], e.g. 8.55 (detected if omitted)
    ///
    /// Every part must be numeric and at most three parts are accepted, so
    /// `8.55.x` and `1.2.3.4` are rejected rather than truncated.
    #[arg(id = "recording_version", value_name = "VERSION")]
    pub version: Option<Version>,

    /// Viewport width in pixels
    #[arg(long = "width", default_value = "800")]
    pub width: u32,

    /// Viewport height in pixels
    #[arg(long = "height", default_value = "600")]
    pub height: u32,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Parse the process arguments.
    ///
    /// Usage errors print clap's message and exit with status 1; `--help`
    /// and `--version` exit with status 0.
    pub fn parse_or_exit() -> Self {
        Self::try_parse().unwrap_or_else(|err| {
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            std::process::exit(code);
        })
    }

    /// The requested version, or autodetection when none was given.
    pub fn version(&self) -> Version {
        self.version.unwrap_or(Version::AUTODETECT)
    }

    /// Default log filter for the verbosity level.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
