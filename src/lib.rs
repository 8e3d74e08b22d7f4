//! trcplay - Play back recordings against memory-mapped game data tables.
//!
//! The engine-facing pieces (memory mappings, bounded readers, resource
//! bundles and the playback session) live in [`trcplay_core`]. This crate
//! adds the command line front end, a built-in inspecting playback, and a
//! C ABI for hosts that supply their own buffers.
//!
//! # Example
//!
//! ```no_run
//! use trcplay::cli::Args;
//! use trcplay::player;
//!
//! fn main() -> anyhow::Result<()> {
//!     let args = Args::parse_or_exit();
//!     let summary = player::run(&args)?;
//!     println!("{} frames", summary.frames);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod ffi;
pub mod inspect;
pub mod player;

pub use trcplay_core::{Error, Result};
