//! Byte-range I/O abstractions.
//!
//! ## Available Types
//!
//! - `MemoryMapping` - A whole file mapped read-only into memory
//! - `DataReader` - Bounds-checked cursor over a mapping's view or a
//!   caller-supplied buffer
//!
//! Readers never own their bytes. A reader built from a mapping borrows it,
//! so the mapping cannot be closed or dropped while the reader is alive.

mod mapping;
mod reader;

pub use mapping::MemoryMapping;
pub use reader::DataReader;
