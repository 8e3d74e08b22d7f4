//! Command-line interface module.
//!
//! This module handles argument parsing via clap. Playback itself is driven
//! by [`crate::player`].

mod args;

pub use args::Args;
