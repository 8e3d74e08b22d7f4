//! Read-only memory mapping of a whole file.
//!
//! Uses the `memmap2` crate for platform-independent memory mapping. On
//! Windows the mapping owns a file handle plus a mapping object, on Unix a
//! descriptor-backed `mmap`; both present the same open/close semantics here.

use std::fmt;
use std::fs::File;
use std::io;
use std::mem;
use std::path::{Path, PathBuf};

use memmap2::Mmap;
use tracing::debug;

use crate::error::{ResourceError, Result};

/// State of the mapped view.
#[derive(Default)]
enum View {
    /// Never opened, or already closed
    #[default]
    Closed,
    /// Opened a zero-length file; there is nothing to map
    Empty,
    /// Live mapping of the whole file
    Mapped(Mmap),
}

/// A whole file mapped read-only into the address space.
///
/// The view is valid between a successful [`open`](Self::open) and the
/// matching [`close`](Self::close) (or drop). Readers borrow the mapping, so
/// closing it while a [`DataReader`](super::DataReader) is alive does not
/// compile.
#[derive(Default)]
pub struct MemoryMapping {
    /// Path to the file (for diagnostics)
    path: PathBuf,
    view: View,
}

impl MemoryMapping {
    /// Open and map an entire file.
    ///
    /// A zero-length file opens successfully with `size() == 0` and an empty
    /// view.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        Self::map(path).map_err(|source| {
            ResourceError::Map {
                path: path.to_path_buf(),
                source,
            }
            .into()
        })
    }

    /// Open and map an entire file, returning the raw I/O error on failure.
    pub fn map(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        let metadata = file.metadata()?;
        if !metadata.is_file() {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"));
        }
        let len = metadata.len();

        let view = if len == 0 {
            View::Empty
        } else {
            // SAFETY: the mapping is read-only; the file must not be truncated
            // while it is mapped.
            View::Mapped(unsafe { Mmap::map(&file)? })
        };

        let mapping = Self {
            path: path.to_path_buf(),
            view,
        };
        debug!(path = %path.display(), size = mapping.size(), "mapped file");

        Ok(mapping)
    }

    /// Release the mapping.
    ///
    /// Closing a mapping that was never opened, or is already closed, does
    /// nothing.
    pub fn close(&mut self) {
        match mem::take(&mut self.view) {
            View::Closed => {}
            View::Empty | View::Mapped(_) => {
                debug!(path = %self.path.display(), "closed mapping");
            }
        }
    }

    /// Whether the mapping is currently open.
    pub fn is_open(&self) -> bool {
        !matches!(self.view, View::Closed)
    }

    /// Size of the mapped file in bytes (0 when closed).
    pub fn size(&self) -> usize {
        self.view().len()
    }

    /// The mapped bytes (empty when closed or for an empty file).
    pub fn view(&self) -> &[u8] {
        match &self.view {
            View::Mapped(mmap) => &mmap[..],
            View::Closed | View::Empty => &[],
        }
    }

    /// Path the mapping was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AsRef<[u8]> for MemoryMapping {
    fn as_ref(&self) -> &[u8] {
        self.view()
    }
}

impl Drop for MemoryMapping {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Debug for MemoryMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryMapping")
            .field("path", &self.path)
            .field("size", &self.size())
            .field("open", &self.is_open())
            .finish()
    }
}
