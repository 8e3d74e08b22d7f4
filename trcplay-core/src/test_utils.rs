//! Test doubles for the playback engine.

use std::cell::Cell;

use thiserror::Error;

use crate::io::DataReader;
use crate::session::{Initialize, Playback, Progress, Renderer, Resources, Version};

thread_local! {
    static LIVE: Cell<usize> = const { Cell::new(0) };
    static INITIALIZED: Cell<usize> = const { Cell::new(0) };
    static DROPPED: Cell<usize> = const { Cell::new(0) };
    static MAX_LIVE_AT_INIT: Cell<usize> = const { Cell::new(0) };
}

/// Snapshot of the per-thread playback counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counters {
    pub live: usize,
    pub initialized: usize,
    pub dropped: usize,
    /// Highest number of live playbacks seen when an initializer started
    pub max_live_at_init: usize,
}

pub fn counters() -> Counters {
    Counters {
        live: LIVE.with(Cell::get),
        initialized: INITIALIZED.with(Cell::get),
        dropped: DROPPED.with(Cell::get),
        max_live_at_init: MAX_LIVE_AT_INIT.with(Cell::get),
    }
}

pub fn reset_counters() {
    for counter in [&LIVE, &INITIALIZED, &DROPPED, &MAX_LIVE_AT_INIT] {
        counter.with(|c| c.set(0));
    }
}

#[derive(Debug, Error)]
#[error("mock playback rejected its inputs")]
pub struct MockError;

/// Playback that records what it was given and consumes the recording
/// four bytes per step.
#[derive(Debug)]
pub struct MockPlayback<'rec> {
    pub label: String,
    pub version: Version,
    pub table_sizes: [usize; 3],
    pub recording: DataReader<'rec>,
}

impl MockPlayback<'_> {
    /// Label that makes the initializer fail.
    pub const REJECT: &'static str = "reject";

    /// Type table contents that make the initializer fail.
    pub const REJECT_TYPES: &'static [u8] = b"reject";

    const STEP: usize = 4;
}

impl Playback for MockPlayback<'_> {
    type Error = MockError;

    fn process_packets(&mut self) -> Result<Progress, MockError> {
        let step = Self::STEP.min(self.recording.remaining());
        self.recording.skip(step).map_err(|_| MockError)?;

        if self.recording.is_exhausted() {
            Ok(Progress::Finished)
        } else {
            Ok(Progress::Continue)
        }
    }
}

impl<'rec> Initialize<'rec> for MockPlayback<'rec> {
    fn initialize(
        label: &str,
        recording: DataReader<'rec>,
        version: Version,
        resources: Resources<'_>,
    ) -> Result<Self, MockError> {
        let live = LIVE.with(Cell::get);
        MAX_LIVE_AT_INIT.with(|c| c.set(c.get().max(live)));

        if label == Self::REJECT || resources.types.as_slice() == Self::REJECT_TYPES {
            return Err(MockError);
        }

        LIVE.with(|c| c.set(c.get() + 1));
        INITIALIZED.with(|c| c.set(c.get() + 1));

        Ok(Self {
            label: label.to_string(),
            version,
            table_sizes: [
                resources.pictures.len(),
                resources.sprites.len(),
                resources.types.len(),
            ],
            recording,
        })
    }
}

impl Drop for MockPlayback<'_> {
    fn drop(&mut self) {
        LIVE.with(|c| c.set(c.get() - 1));
        DROPPED.with(|c| c.set(c.get() + 1));
    }
}

/// Renderer that counts frames.
#[derive(Debug, Default)]
pub struct CountingRenderer {
    pub frames: u64,
}

impl<P> Renderer<P> for CountingRenderer {
    type Error = MockError;

    fn render(&mut self, _playback: &P) -> Result<(), MockError> {
        self.frames += 1;
        Ok(())
    }
}
