//! Built-in playback and renderer used when no engine is linked in.
//!
//! [`InspectPlayback`] walks the recording in fixed-size steps without
//! decoding it, and remembers how large each data table was.
//! [`LogRenderer`] reports progress through `tracing` instead of drawing.

use thiserror::Error;
use tracing::{debug, trace};

use trcplay_core::{
    DataReader, Initialize, Playback, Progress, ReaderError, Renderer, Resources, Version,
};

/// Bytes of recording consumed per processing step.
pub const STEP_SIZE: usize = 4096;

/// Errors from the built-in playback and renderer.
#[derive(Error, Debug)]
pub enum InspectError {
    /// Nothing to play back
    #[error("recording is empty")]
    EmptyRecording,

    /// The viewport has no area
    #[error("invalid viewport {width}x{height}")]
    InvalidViewport { width: u32, height: u32 },

    /// Out-of-range access on the recording
    #[error(transparent)]
    Reader(#[from] ReaderError),
}

/// Playback that steps through a recording without decoding it.
#[derive(Debug)]
pub struct InspectPlayback<'rec> {
    label: String,
    version: Version,
    table_sizes: [usize; 3],
    recording: DataReader<'rec>,
    steps: u64,
}

impl InspectPlayback<'_> {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn version(&self) -> Version {
        self.version
    }

    /// Sizes of the picture, sprite and type tables.
    pub fn table_sizes(&self) -> [usize; 3] {
        self.table_sizes
    }

    /// Recording bytes consumed so far.
    pub fn position(&self) -> usize {
        self.recording.position()
    }

    pub fn recording_len(&self) -> usize {
        self.recording.len()
    }

    /// Processing steps taken.
    pub fn steps(&self) -> u64 {
        self.steps
    }
}

impl Playback for InspectPlayback<'_> {
    type Error = InspectError;

    fn process_packets(&mut self) -> Result<Progress, InspectError> {
        let step = STEP_SIZE.min(self.recording.remaining());
        self.recording.skip(step)?;
        self.steps += 1;

        trace!(
            position = self.recording.position(),
            length = self.recording.len(),
            "processed step"
        );

        if self.recording.is_exhausted() {
            Ok(Progress::Finished)
        } else {
            Ok(Progress::Continue)
        }
    }
}

impl<'rec> Initialize<'rec> for InspectPlayback<'rec> {
    fn initialize(
        label: &str,
        recording: DataReader<'rec>,
        version: Version,
        resources: Resources<'_>,
    ) -> Result<Self, InspectError> {
        if recording.is_empty() {
            return Err(InspectError::EmptyRecording);
        }

        let table_sizes = [
            resources.pictures.len(),
            resources.sprites.len(),
            resources.types.len(),
        ];
        debug!(label, %version, ?table_sizes, "inspecting recording");

        Ok(Self {
            label: label.to_string(),
            version,
            table_sizes,
            recording,
            steps: 0,
        })
    }
}

/// Renderer that logs playback progress.
#[derive(Debug)]
pub struct LogRenderer {
    width: u32,
    height: u32,
    frames: u64,
}

impl LogRenderer {
    /// Set up a renderer for a `width` x `height` viewport.
    pub fn new(width: u32, height: u32) -> Result<Self, InspectError> {
        if width == 0 || height == 0 {
            return Err(InspectError::InvalidViewport { width, height });
        }
        debug!(width, height, "renderer ready");
        Ok(Self {
            width,
            height,
            frames: 0,
        })
    }

    pub fn viewport(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer<InspectPlayback<'_>> for LogRenderer {
    type Error = InspectError;

    fn render(&mut self, playback: &InspectPlayback<'_>) -> Result<(), InspectError> {
        self.frames += 1;
        trace!(
            frame = self.frames,
            position = playback.position(),
            length = playback.recording_len(),
            "rendered frame"
        );
        Ok(())
    }
}
