//! Loading from memory regions supplied by an embedding host.
//!
//! The host hands over four `(pointer, length)` regions. Ownership differs
//! per region and is spelled out in the types:
//!
//! - the picture, sprite and type buffers are [`TransferredBuffer`]s: this
//!   layer owns them for the duration of [`Session::load`] and releases each
//!   exactly once before returning, whether or not initialization succeeded
//! - the recording is a borrowed `&[u8]`: it is never released here, and the
//!   host must keep it alive for as long as the session plays it
//!
//! A host must not free the recording while the session is loaded, and must
//! not touch a resource buffer after passing it to `load`.

use std::fmt;
use std::ptr::{self, NonNull};
use std::slice;

use tracing::{debug, warn};

use crate::error::Result;
use crate::io::DataReader;
use crate::session::{Initialize, Resources, Session, Version};

/// Label given to sessions loaded from host memory.
pub const HOST_SESSION_LABEL: &str = "";

type Release = Box<dyn FnOnce(*mut u8, usize)>;

/// A host buffer whose ownership has been transferred to this layer.
///
/// The buffer is released exactly once, when the value is dropped.
pub struct TransferredBuffer {
    ptr: Option<NonNull<u8>>,
    len: usize,
    release: Option<Release>,
}

impl TransferredBuffer {
    /// Take ownership of a buffer allocated with the C allocator.
    ///
    /// The buffer is released with `free`. A null `ptr` is accepted and
    /// treated as an empty buffer.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or come from `malloc`/`calloc`/`realloc`, be valid
    /// for reads of `len` bytes, and not be used or freed by anyone else
    /// afterwards.
    pub unsafe fn from_malloc(ptr: *mut u8, len: usize) -> Self {
        Self::with_release(ptr, len, |ptr, _| libc::free(ptr.cast()))
    }

    /// Take ownership of a buffer released by a custom function.
    ///
    /// `release` is called exactly once with the original pointer and
    /// length, unless `ptr` is null.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or valid for reads of `len` bytes until `release`
    /// runs, and not be used or released by anyone else afterwards.
    pub unsafe fn with_release<F>(ptr: *mut u8, len: usize, release: F) -> Self
    where
        F: FnOnce(*mut u8, usize) + 'static,
    {
        let ptr = NonNull::new(ptr);
        Self {
            ptr,
            len: if ptr.is_some() { len } else { 0 },
            release: Some(Box::new(release)),
        }
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Borrow the buffer contents.
    pub fn as_slice(&self) -> &[u8] {
        match self.ptr {
            // SAFETY: guaranteed by the constructor's contract until release.
            Some(ptr) if self.len > 0 => unsafe { slice::from_raw_parts(ptr.as_ptr(), self.len) },
            _ => &[],
        }
    }

    /// A reader over the buffer; it cannot outlive the buffer.
    pub fn reader(&self) -> DataReader<'_> {
        DataReader::new(self.as_slice())
    }
}

impl From<Box<[u8]>> for TransferredBuffer {
    fn from(data: Box<[u8]>) -> Self {
        let len = data.len();
        let raw = Box::into_raw(data).cast::<u8>();
        // SAFETY: `raw` came from `Box::into_raw` with length `len` and is
        // rebuilt into the same box exactly once.
        unsafe {
            Self::with_release(raw, len, |ptr, len| {
                drop(Box::from_raw(ptr::slice_from_raw_parts_mut(ptr, len)));
            })
        }
    }
}

impl From<Vec<u8>> for TransferredBuffer {
    fn from(data: Vec<u8>) -> Self {
        data.into_boxed_slice().into()
    }
}

impl Drop for TransferredBuffer {
    fn drop(&mut self) {
        if let (Some(ptr), Some(release)) = (self.ptr, self.release.take()) {
            release(ptr.as_ptr(), self.len);
        }
    }
}

impl fmt::Debug for TransferredBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransferredBuffer")
            .field("len", &self.len)
            .finish()
    }
}

impl<'rec, P: Initialize<'rec>> Session<P> {
    /// Load a playback from host memory, replacing any live one.
    ///
    /// 1. Any live playback is torn down first.
    /// 2. Readers are built directly over the four regions.
    /// 3. The initializer runs with [`HOST_SESSION_LABEL`] and
    ///    [`Version::AUTODETECT`].
    /// 4. `pictures`, `sprites` and `types` are released, also when the
    ///    initializer failed.
    ///
    /// `recording` is borrowed and is not released; see the module docs.
    pub fn load(
        &mut self,
        recording: &'rec [u8],
        pictures: TransferredBuffer,
        sprites: TransferredBuffer,
        types: TransferredBuffer,
    ) -> Result<()> {
        self.teardown();

        let resources = Resources {
            pictures: pictures.reader(),
            sprites: sprites.reader(),
            types: types.reader(),
        };
        let result = self.initialize(
            HOST_SESSION_LABEL,
            DataReader::new(recording),
            Version::AUTODETECT,
            resources,
        );

        drop(pictures);
        drop(sprites);
        drop(types);
        debug!("released transferred resource buffers");

        if let Err(ref e) = result {
            warn!(error = %e, "host playback initialization failed");
        }
        result
    }
}
