//! Page-backed off-heap buffer.
//!
//! `DirectBuffer` owns an anonymous memory mapping (or an emulated one on
//! platforms without `mmap`/`VirtualAlloc` support). The mapping is returned
//! to the system when the buffer is dropped; its physical pages can be handed
//! back earlier through the platform release entry point, see
//! [`crate::mmap::resolve_release_entry_point`].
//!
//! # Safety
//!
//! While `DirectBuffer` implements `Send` and `Sync`, users must ensure that any data
//! written to the buffer is properly synchronized when accessed from multiple threads.

use crate::memory_region::{MemoryRegion, OffHeapMemory};
use crate::mmap;

/// An off-heap buffer backed by whole memory pages.
pub struct DirectBuffer {
    /// Raw pointer to the allocated memory region.
    ptr: *mut u8,
    /// The requested size of the buffer in bytes.
    len: usize,
    /// The actual allocated capacity, a whole number of pages.
    capacity: usize,
    /// Page size used during allocation.
    alignment: usize,
}

impl DirectBuffer {
    /// Returns the size of a regular memory page on the current system.
    pub fn page_size() -> usize {
        mmap::get_page_size()
    }

    /// Allocates a zero-filled buffer of `size` bytes.
    ///
    /// The capacity is rounded up to the nearest page boundary; a zero-sized
    /// request still maps one page.
    ///
    /// # Errors
    ///
    /// Returns an error if the system cannot allocate the requested memory.
    pub fn allocate(size: usize) -> std::io::Result<DirectBuffer> {
        let (ptr, capacity) = mmap::allocate(size.max(1))?;
        assert!((ptr as usize).is_multiple_of(Self::page_size()));
        Ok(DirectBuffer {
            ptr: ptr as _,
            len: size,
            capacity,
            alignment: mmap::get_page_size(),
        })
    }

    /// Returns the length of the buffer in bytes.
    ///
    /// This is the size that was requested during allocation, not the actual
    /// allocated capacity.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the buffer has a length of 0.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the allocated capacity in bytes, always a whole number of pages.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns a raw pointer to the beginning of the allocated memory.
    ///
    /// The pointer must not be used after the `DirectBuffer` is dropped.
    #[inline]
    pub fn ptr(&self) -> *mut u8 {
        self.ptr
    }

    /// Returns the alignment of the buffer in bytes (the page size).
    #[inline]
    pub fn alignment(&self) -> usize {
        self.alignment
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        unsafe { std::slice::from_raw_parts(self.ptr, self.len) }
    }

    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        unsafe { std::slice::from_raw_parts_mut(self.ptr, self.len) }
    }
}

impl std::ops::Deref for DirectBuffer {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_bytes()
    }
}

impl std::ops::DerefMut for DirectBuffer {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_bytes_mut()
    }
}

impl AsRef<[u8]> for DirectBuffer {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl AsMut<[u8]> for DirectBuffer {
    #[inline]
    fn as_mut(&mut self) -> &mut [u8] {
        self.as_bytes_mut()
    }
}

unsafe impl OffHeapMemory for DirectBuffer {
    fn memory_region(&self) -> MemoryRegion {
        MemoryRegion {
            ptr: self.ptr,
            len: self.len,
            capacity: self.capacity,
            alignment: self.alignment,
        }
    }
}

impl Drop for DirectBuffer {
    /// Returns the mapping to the system, whether or not its pages were
    /// released early.
    fn drop(&mut self) {
        if !self.ptr.is_null() {
            let _ = unsafe { mmap::free(self.ptr as _, self.capacity) };
        }
    }
}

// SAFETY: DirectBuffer owns its memory region and deallocates it on drop.
unsafe impl Send for DirectBuffer {}

// SAFETY: shared access only hands out `&[u8]`; mutation requires `&mut self`.
unsafe impl Sync for DirectBuffer {}

impl std::fmt::Debug for DirectBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectBuffer")
            .field("ptr", &self.ptr)
            .field("len", &self.len)
            .field("capacity", &self.capacity)
            .finish()
    }
}
