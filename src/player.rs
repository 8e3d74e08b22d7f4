//! File-backed playback, as driven by the command line.

use anyhow::{Context, Result};
use tracing::info;

use trcplay_core::{DataReader, MemoryMapping, ResourceBundle, Session};

use crate::cli::Args;
use crate::inspect::{InspectPlayback, LogRenderer};

/// Summary of a finished playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackSummary {
    /// Frames rendered before the recording ended
    pub frames: u64,
    /// Sizes of the picture, sprite and type tables
    pub table_sizes: [usize; 3],
    /// Length of the recording in bytes
    pub recording_len: usize,
}

/// Open the data tables and recording named by `args` and play to the end.
///
/// The data tables are released as soon as the playback is initialized;
/// the recording stays mapped until playback finishes.
pub fn run(args: &Args) -> Result<PlaybackSummary> {
    let mut renderer =
        LogRenderer::new(args.width, args.height).context("Failed to initialize renderer")?;

    let bundle = ResourceBundle::open(&args.data_folder).with_context(|| {
        format!(
            "Failed to open data files in {}",
            args.data_folder.display()
        )
    })?;

    let recording = MemoryMapping::open(&args.recording)
        .with_context(|| format!("Failed to open recording: {}", args.recording.display()))?;

    let label = args.recording.display().to_string();
    let mut session = Session::<InspectPlayback<'_>>::new();
    session
        .initialize(
            &label,
            DataReader::from_mapping(&recording),
            args.version(),
            bundle.readers(),
        )
        .with_context(|| format!("Failed to load recording: {label}"))?;
    bundle.close();

    let table_sizes = session
        .playback()
        .map(InspectPlayback::table_sizes)
        .unwrap_or_default();

    let frames = session.run(&mut renderer).context("Playback failed")?;
    info!(frames, recording = %label, "playback complete");

    Ok(PlaybackSummary {
        frames,
        table_sizes,
        recording_len: recording.size(),
    })
}
