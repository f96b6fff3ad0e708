use std::alloc::{Layout, alloc_zeroed, dealloc};

/// Allocates memory using standard pages (emulated).
pub fn allocate(size: usize) -> std::io::Result<(*mut std::ffi::c_void, usize)> {
    let page_size = get_page_size();
    assert!(page_size.is_power_of_two());
    let capacity = (size.max(1) + page_size - 1) & !(page_size - 1);

    let layout = Layout::from_size_align(capacity, page_size)
        .map_err(|_| std::io::Error::new(std::io::ErrorKind::InvalidInput, "Invalid layout"))?;

    let ptr = unsafe { alloc_zeroed(layout) };
    if ptr.is_null() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::OutOfMemory,
            "Failed to allocate memory",
        ));
    }

    Ok((ptr as *mut std::ffi::c_void, capacity))
}

/// Frees memory that was allocated with [`allocate`].
///
/// # Safety
///
/// `ptr` and `size` must come from a previous call to [`allocate`] and the memory
/// must not have been freed yet.
pub unsafe fn free(ptr: *mut std::ffi::c_void, size: usize) -> std::io::Result<()> {
    let page_size = get_page_size();
    assert!(size.is_multiple_of(page_size));

    let layout = Layout::from_size_align(size, page_size)
        .map_err(|_| std::io::Error::new(std::io::ErrorKind::InvalidInput, "Invalid layout"))?;

    unsafe {
        dealloc(ptr as *mut u8, layout);
    }
    Ok(())
}

/// Returns the "standard page" size in bytes.
pub fn get_page_size() -> usize {
    4 * 1024
}

/// Name of the release entry point on this platform, for diagnostics.
pub const RELEASE_ENTRY_POINT: &str = "none";

/// Placeholder for the release entry point. The emulated allocator has no way to
/// hand pages back to the system early, so no value of this type ever exists.
#[derive(Debug, Clone, Copy)]
pub struct ReleaseEntryPoint {
    never: std::convert::Infallible,
}

impl ReleaseEntryPoint {
    pub fn name(&self) -> &'static str {
        match self.never {}
    }

    /// # Safety
    ///
    /// Uncallable: no `ReleaseEntryPoint` can be constructed on this platform.
    pub unsafe fn invoke(&self, _ptr: *mut std::ffi::c_void, _size: usize) -> std::io::Result<()> {
        match self.never {}
    }
}

/// Always `None`: there is no release entry point on this platform.
pub fn resolve_release_entry_point() -> Option<ReleaseEntryPoint> {
    None
}
