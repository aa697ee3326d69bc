//! Owned memory for an engine's decoder state.

use std::alloc::{self, Layout};
use std::fmt;
use std::ptr::NonNull;

use crate::error::ErrorCode;

/// Alignment of every state block, matching what `malloc` guarantees on the
/// platforms libopus targets.
const STATE_ALIGN: usize = 16;

/// A zero-initialized heap block holding opaque decoder state.
///
/// The block is allocated once with the size the engine asked for and freed
/// exactly once on drop. It is never resized and never aliased: the only way
/// to reach the memory is through the owning session.
pub struct StateBlock {
    ptr: NonNull<u8>,
    layout: Layout,
}

// The block is plain memory with a single owner; moving it between threads
// or reading it through `&self` cannot race.
unsafe impl Send for StateBlock {}
unsafe impl Sync for StateBlock {}

impl StateBlock {
    /// Allocates `size` zeroed bytes.
    ///
    /// A zero size means the engine does not support the requested
    /// configuration and is reported as [`ErrorCode::BadArg`].
    pub fn zeroed(size: usize) -> Result<Self, ErrorCode> {
        if size == 0 {
            return Err(ErrorCode::BadArg);
        }
        let layout = Layout::from_size_align(size, STATE_ALIGN).map_err(|_| ErrorCode::AllocFail)?;
        // SAFETY: `layout` has a non-zero size.
        let raw = unsafe { alloc::alloc_zeroed(layout) };
        let ptr = NonNull::new(raw).ok_or(ErrorCode::AllocFail)?;
        Ok(Self { ptr, layout })
    }

    /// Size of the block in bytes.
    pub(crate) fn len(&self) -> usize {
        self.layout.size()
    }

    pub fn as_ptr<T>(&self) -> *const T {
        self.ptr.as_ptr().cast_const().cast()
    }

    pub fn as_mut_ptr<T>(&mut self) -> *mut T {
        self.ptr.as_ptr().cast()
    }

    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: the block owns `len` initialized bytes.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len()) }
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        // SAFETY: the block owns `len` initialized bytes and `&mut self` is unique.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len()) }
    }
}

impl Drop for StateBlock {
    fn drop(&mut self) {
        // SAFETY: `ptr` came from `alloc_zeroed` with this exact layout.
        unsafe { alloc::dealloc(self.ptr.as_ptr(), self.layout) }
    }
}

impl fmt::Debug for StateBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateBlock").field("len", &self.len()).finish()
    }
}
