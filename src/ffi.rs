//! C ABI for embedding the player in another runtime.
//!
//! The host creates a session, hands it recordings and data tables as raw
//! memory regions, and steps it:
//!
//! ```c
//! TrcSession* session = trcplay_session_new();
//! trcplay_load_files(session, rec, rec_len, pic, pic_len, spr, spr_len, dat, dat_len);
//! while (trcplay_process(session) == 1) { }
//! trcplay_session_destroy(session);
//! ```
//!
//! Ownership at `trcplay_load_files`:
//! - the picture, sprite and type buffers must come from `malloc`; they are
//!   freed before the call returns, on success and on failure alike
//! - the recording buffer is NOT freed; the host keeps it alive until the
//!   session is destroyed or loaded again
//!
//! Lengths are trusted as given.

use std::os::raw::c_int;
use std::slice;

use trcplay_core::{Session, TransferredBuffer};

use crate::inspect::InspectPlayback;

/// Opaque handle to a playback session.
#[repr(C)]
pub struct TrcSession {
    _private: [u8; 0],
}

// Internal representation of a session (not exposed to C)
struct SessionHandle {
    session: Session<InspectPlayback<'static>>,
}

/// Create an empty session.
///
/// # Safety
/// The returned session must be freed with `trcplay_session_destroy()`.
#[no_mangle]
pub extern "C" fn trcplay_session_new() -> *mut TrcSession {
    let handle = Box::new(SessionHandle {
        session: Session::new(),
    });
    Box::into_raw(handle) as *mut TrcSession
}

/// Destroy a session and any playback it holds.
///
/// # Safety
/// - `session` must be NULL or come from `trcplay_session_new()`
/// - `session` must not be used after this call
#[no_mangle]
pub unsafe extern "C" fn trcplay_session_destroy(session: *mut TrcSession) {
    if session.is_null() {
        return;
    }

    let handle = Box::from_raw(session as *mut SessionHandle);
    drop(handle);
}

/// Load a recording and the three data tables from host memory.
///
/// Any playback already loaded in `session` is torn down first.
///
/// # Returns
/// * 0 on success
/// * -1 on failure (null session or rejected inputs)
///
/// # Safety
/// - `session` must be NULL or a live session from `trcplay_session_new()`
/// - each `*_data` pointer must be NULL or valid for reads of its length
/// - `pic_data`, `spr_data` and `dat_data` must be NULL or `malloc`ed and
///   must not be used by the host after this call
/// - `recording_data` must stay valid and unmodified until the session is
///   destroyed or loaded again
#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn trcplay_load_files(
    session: *mut TrcSession,
    recording_data: *const u8,
    recording_length: usize,
    pic_data: *mut u8,
    pic_length: usize,
    spr_data: *mut u8,
    spr_length: usize,
    dat_data: *mut u8,
    dat_length: usize,
) -> c_int {
    // Ownership of the tables transfers here even if the call fails early.
    let pictures = TransferredBuffer::from_malloc(pic_data, pic_length);
    let sprites = TransferredBuffer::from_malloc(spr_data, spr_length);
    let types = TransferredBuffer::from_malloc(dat_data, dat_length);

    if session.is_null() {
        return -1;
    }

    let handle = &mut *(session as *mut SessionHandle);
    let recording: &'static [u8] = if recording_data.is_null() || recording_length == 0 {
        &[]
    } else {
        slice::from_raw_parts(recording_data, recording_length)
    };

    match handle.session.load(recording, pictures, sprites, types) {
        Ok(()) => 0,
        Err(_) => -1,
    }
}

/// Advance the loaded playback by one step.
///
/// # Returns
/// * 1 if more packets remain
/// * 0 if the recording has ended
/// * -1 on failure (null session, nothing loaded, or playback error)
///
/// # Safety
/// `session` must be NULL or a live session from `trcplay_session_new()`.
#[no_mangle]
pub unsafe extern "C" fn trcplay_process(session: *mut TrcSession) -> c_int {
    if session.is_null() {
        return -1;
    }

    let handle = &mut *(session as *mut SessionHandle);
    match handle.session.process() {
        Ok(trcplay_core::Progress::Continue) => 1,
        Ok(trcplay_core::Progress::Finished) => 0,
        Err(_) => -1,
    }
}

/// Whether the session currently holds a playback (1) or not (0).
///
/// # Safety
/// `session` must be NULL or a live session from `trcplay_session_new()`.
#[no_mangle]
pub unsafe extern "C" fn trcplay_is_loaded(session: *const TrcSession) -> c_int {
    if session.is_null() {
        return 0;
    }

    let handle = &*(session as *const SessionHandle);
    c_int::from(handle.session.is_loaded())
}
