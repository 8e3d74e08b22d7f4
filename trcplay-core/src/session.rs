//! Playback session and the interfaces to the engine that consumes readers.
//!
//! The packet parser and the renderer live outside this crate. They plug in
//! through three traits:
//!
//! - [`Initialize`] builds a playback from a recording reader, a version and
//!   the three resource readers
//! - [`Playback`] advances a live playback by one batch of packets
//! - [`Renderer`] draws the current state of a playback
//!
//! A [`Session`] holds at most one live playback. Loading a new one always
//! tears the previous one down first.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, info};

use crate::error::{Error, Result, VersionError};
use crate::io::DataReader;

/// Recording format version handed to the initializer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub preview: u32,
}

impl Version {
    /// `0.0.0`: the initializer detects the version from the recording.
    pub const AUTODETECT: Self = Self::new(0, 0, 0);

    pub const fn new(major: u32, minor: u32, preview: u32) -> Self {
        Self {
            major,
            minor,
            preview,
        }
    }

    /// Whether version detection is left to the initializer.
    pub fn is_autodetect(&self) -> bool {
        *self == Self::AUTODETECT
    }
}

impl FromStr for Version {
    type Err = VersionError;

    /// Parse `MAJOR.MINOR[.PREVIEW]`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('.').collect();
        if parts.len() < 2 {
            return Err(VersionError::Missing);
        }
        if parts.len() > 3 {
            return Err(VersionError::TooManyParts);
        }

        let mut numbers = [0u32; 3];
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            *slot = part.parse().map_err(|_| VersionError::NotNumeric {
                part: (*part).to_string(),
            })?;
        }

        let [major, minor, preview] = numbers;
        Ok(Self::new(major, minor, preview))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if self.preview != 0 {
            write!(f, ".{}", self.preview)?;
        }
        Ok(())
    }
}

/// The three data-table readers handed to an initializer.
///
/// Both loaders produce this value: the file-backed bundle from its
/// mappings, the host-embedded path from transferred buffers.
#[derive(Debug, Clone, Copy)]
pub struct Resources<'a> {
    pub pictures: DataReader<'a>,
    pub sprites: DataReader<'a>,
    pub types: DataReader<'a>,
}

/// Result of one processing step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// More packets remain
    Continue,
    /// The recording has been played to the end
    Finished,
}

/// A live playback that can be advanced.
pub trait Playback {
    /// Error reported by the engine
    type Error: std::error::Error + Send + Sync + 'static;

    /// Process the packets that are due and report whether any remain.
    fn process_packets(&mut self) -> std::result::Result<Progress, Self::Error>;
}

/// Construction of a playback from readers.
///
/// The recording reader lives for `'rec` and may be kept by the playback.
/// The resource readers only live for the call: anything the playback needs
/// from the data tables must be decoded before it returns.
pub trait Initialize<'rec>: Playback + Sized {
    fn initialize(
        label: &str,
        recording: DataReader<'rec>,
        version: Version,
        resources: Resources<'_>,
    ) -> std::result::Result<Self, Self::Error>;
}

/// Draws the state of a playback.
pub trait Renderer<P> {
    type Error: std::error::Error + Send + Sync + 'static;

    fn render(&mut self, playback: &P) -> std::result::Result<(), Self::Error>;
}

/// Owner of the single playback context.
///
/// Not thread-safe and not reentrant: every operation takes `&mut self`.
pub struct Session<P> {
    playback: Option<P>,
}

impl<P> Default for Session<P> {
    fn default() -> Self {
        Self { playback: None }
    }
}

impl<P> Session<P> {
    /// Create a session with nothing loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a playback is loaded.
    pub fn is_loaded(&self) -> bool {
        self.playback.is_some()
    }

    pub fn playback(&self) -> Option<&P> {
        self.playback.as_ref()
    }

    pub fn playback_mut(&mut self) -> Option<&mut P> {
        self.playback.as_mut()
    }

    /// Drop the live playback, if any. Returns whether one was torn down.
    pub fn teardown(&mut self) -> bool {
        match self.playback.take() {
            Some(playback) => {
                drop(playback);
                info!("tore down playback session");
                true
            }
            None => false,
        }
    }
}

impl<P: Playback> Session<P> {
    /// Advance the live playback by one step.
    pub fn process(&mut self) -> Result<Progress> {
        let playback = self.playback.as_mut().ok_or(Error::NoSession)?;
        playback.process_packets().map_err(Error::playback)
    }

    /// Render the live playback.
    pub fn render_with<R: Renderer<P>>(&mut self, renderer: &mut R) -> Result<()> {
        let playback = self.playback.as_ref().ok_or(Error::NoSession)?;
        renderer.render(playback).map_err(Error::playback)
    }

    /// Process and render until the playback reports it is finished.
    ///
    /// Returns the number of frames rendered.
    pub fn run<R: Renderer<P>>(&mut self, renderer: &mut R) -> Result<u64> {
        let mut frames = 0u64;
        loop {
            let progress = self.process()?;
            self.render_with(renderer)?;
            frames += 1;

            if progress == Progress::Finished {
                debug!(frames, "playback finished");
                return Ok(frames);
            }
        }
    }
}

impl<'rec, P: Initialize<'rec>> Session<P> {
    /// Replace the live playback with a new one built from `recording` and
    /// `resources`.
    ///
    /// Any previous playback is torn down before the initializer runs. If
    /// the initializer fails the session is left empty.
    pub fn initialize(
        &mut self,
        label: &str,
        recording: DataReader<'rec>,
        version: Version,
        resources: Resources<'_>,
    ) -> Result<()> {
        self.teardown();

        debug!(
            label,
            %version,
            recording = recording.len(),
            pictures = resources.pictures.len(),
            sprites = resources.sprites.len(),
            types = resources.types.len(),
            "initializing playback"
        );

        let playback =
            P::initialize(label, recording, version, resources).map_err(Error::initialization)?;
        self.playback = Some(playback);

        info!(label, "playback session loaded");
        Ok(())
    }
}

impl<P> fmt::Debug for Session<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{counters, reset_counters, CountingRenderer, MockPlayback};

    fn resources_over(data: &[u8]) -> Resources<'_> {
        Resources {
            pictures: DataReader::new(&data[..1]),
            sprites: DataReader::new(&data[..2]),
            types: DataReader::new(&data[..3]),
        }
    }

    #[test]
    fn test_version_parse_major_minor() {
        let version: Version = "8.55".parse().unwrap();
        assert_eq!(version, Version::new(8, 55, 0));
        assert_eq!(version.to_string(), "8.55");
    }

    #[test]
    fn test_version_parse_with_preview() {
        let version: Version = "10.98.1".parse().unwrap();
        assert_eq!(version, Version::new(10, 98, 1));
        assert_eq!(version.to_string(), "10.98.1");
    }

    #[test]
    fn test_version_parse_errors() {
        assert_eq!("abc".parse::<Version>(), Err(VersionError::Missing));
        assert_eq!("8".parse::<Version>(), Err(VersionError::Missing));
        assert_eq!("".parse::<Version>(), Err(VersionError::Missing));
        assert_eq!(
            "8.x".parse::<Version>(),
            Err(VersionError::NotNumeric { part: "x".into() })
        );
        assert_eq!(
            "8.".parse::<Version>(),
            Err(VersionError::NotNumeric { part: "".into() })
        );
        assert_eq!("1.2.3.4".parse::<Version>(), Err(VersionError::TooManyParts));
    }

    #[test]
    fn test_autodetect() {
        assert!(Version::AUTODETECT.is_autodetect());
        assert!(Version::default().is_autodetect());
        assert!(!Version::new(7, 40, 0).is_autodetect());
    }

    #[test]
    fn test_empty_session_operations_fail() {
        let mut session: Session<MockPlayback<'_>> = Session::new();
        assert!(!session.is_loaded());
        assert!(!session.teardown());
        assert!(matches!(session.process(), Err(Error::NoSession)));

        let mut renderer = CountingRenderer::default();
        assert!(matches!(
            session.render_with(&mut renderer),
            Err(Error::NoSession)
        ));
    }

    #[test]
    fn test_initialize_passes_readers() {
        let recording = [0u8; 8];
        let tables = [0u8; 3];
        let mut session = Session::<MockPlayback<'_>>::new();

        session
            .initialize(
                "capture.trc",
                DataReader::new(&recording),
                Version::new(8, 55, 0),
                resources_over(&tables),
            )
            .unwrap();

        let playback = session.playback().unwrap();
        assert_eq!(playback.label, "capture.trc");
        assert_eq!(playback.version, Version::new(8, 55, 0));
        assert_eq!(playback.table_sizes, [1, 2, 3]);
        assert_eq!(playback.recording.len(), 8);
    }

    #[test]
    fn test_reinitialize_tears_down_first() {
        reset_counters();
        let recording = [0u8; 4];
        let tables = [0u8; 3];
        let mut session = Session::<MockPlayback<'_>>::new();

        for _ in 0..2 {
            session
                .initialize(
                    "",
                    DataReader::new(&recording),
                    Version::AUTODETECT,
                    resources_over(&tables),
                )
                .unwrap();
        }

        let stats = counters();
        assert_eq!(stats.initialized, 2);
        assert_eq!(stats.dropped, 1);
        assert_eq!(stats.max_live_at_init, 0);
        assert_eq!(stats.live, 1);
    }

    #[test]
    fn test_failed_initialize_leaves_session_empty() {
        reset_counters();
        let recording = [0u8; 4];
        let tables = [0u8; 3];
        let mut session = Session::<MockPlayback<'_>>::new();

        session
            .initialize(
                "",
                DataReader::new(&recording),
                Version::AUTODETECT,
                resources_over(&tables),
            )
            .unwrap();
        let result = session.initialize(
            MockPlayback::REJECT,
            DataReader::new(&recording),
            Version::AUTODETECT,
            resources_over(&tables),
        );

        assert!(matches!(result, Err(Error::Initialization { .. })));
        assert!(!session.is_loaded());
        assert_eq!(counters().live, 0);
    }

    #[test]
    fn test_run_until_finished() {
        let recording = [0u8; 10];
        let tables = [0u8; 3];
        let mut session = Session::<MockPlayback<'_>>::new();
        session
            .initialize(
                "",
                DataReader::new(&recording),
                Version::AUTODETECT,
                resources_over(&tables),
            )
            .unwrap();

        let mut renderer = CountingRenderer::default();
        let frames = session.run(&mut renderer).unwrap();

        // MockPlayback consumes 4 bytes per step: 4, 8, 10
        assert_eq!(frames, 3);
        assert_eq!(renderer.frames, 3);
        assert!(session.playback().unwrap().recording.is_exhausted());
    }
}
