//! Convenient re-exports for common usage.
//!
//! ```rust,no_run
//! use trcplay_core::prelude::*;
//!
//! let bundle = ResourceBundle::open("data").unwrap();
//! let resources = bundle.readers();
//! assert_eq!(resources.pictures.position(), 0);
//! ```

// I/O types
pub use crate::io::{DataReader, MemoryMapping};

// Loaders
pub use crate::bundle::{ResourceBundle, ResourceKind};
pub use crate::embed::TransferredBuffer;

// Session types
pub use crate::session::{Initialize, Playback, Progress, Renderer, Resources, Session, Version};

// Error types
pub use crate::error::{Error, Result};
