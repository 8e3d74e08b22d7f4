//! # trcplay-core
//!
//! Resource provisioning for recording playback.
//!
//! This crate maps game data tables and recordings into memory and exposes
//! them through one bounds-checked cursor type, [`DataReader`], regardless
//! of where the bytes came from. It does not interpret the bytes: decoding
//! the recording and drawing frames is left to the engine behind the
//! [`Initialize`], [`Playback`] and [`Renderer`] traits.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use trcplay_core::prelude::*;
//!
//! # fn main() -> trcplay_core::Result<()> {
//! let bundle = ResourceBundle::open("/path/to/data")?;
//! let recording = MemoryMapping::open("/path/to/capture.trc")?;
//!
//! let resources = bundle.readers();
//! let mut reader = DataReader::from_mapping(&recording);
//! let first = reader.read_u8()?;
//! # let _ = (resources, first);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------------+
//! |                        trcplay-core                                 |
//! +---------------------------------------------------------------------+
//! |  io/      - MemoryMapping, DataReader                               |
//! |  bundle/  - ResourceBundle: all-or-nothing file-backed loading      |
//! |  embed/   - TransferredBuffer, Session::load from host memory       |
//! |  session/ - Session, Initialize/Playback/Renderer, Version          |
//! |  error/   - Error types                                             |
//! +---------------------------------------------------------------------+
//! ```

pub mod bundle;
pub mod embed;
pub mod error;
pub mod io;
pub mod prelude;
pub mod session;

#[cfg(test)]
pub(crate) mod test_utils;

pub use bundle::{resource_path, ResourceBundle, ResourceKind, MAX_PATH_LEN};
pub use embed::{TransferredBuffer, HOST_SESSION_LABEL};
pub use error::{Error, ReaderError, ResourceError, Result, VersionError};
pub use io::{DataReader, MemoryMapping};
pub use session::{Initialize, Playback, Progress, Renderer, Resources, Session, Version};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
