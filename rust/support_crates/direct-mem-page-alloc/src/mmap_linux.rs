use std::sync::OnceLock;

use crate::page_range::check_page_range;

/// Allocates memory using standard pages via mmap.
///
/// This function allocates `size` bytes of anonymous, private memory using the
/// standard system page size (typically 4KB).
///
/// # Arguments
///
/// * `size` - The number of bytes to allocate. The actual allocation will be rounded up
///   to the nearest page boundary.
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok((ptr, capacity))` - A tuple with a pointer to the allocated memory and the actual
///   capacity in bytes (which may be larger than the requested size due to page alignment)
/// - `Err(io::Error)` - An I/O error if the allocation fails
///
/// # Safety
///
/// The returned pointer must be deallocated using [`free`] with the same capacity value
/// to avoid memory leaks. The allocated memory is readable, writable and zero-filled.
pub fn allocate(size: usize) -> std::io::Result<(*mut std::ffi::c_void, usize)> {
    let page_size = get_page_size();
    assert!(page_size.is_power_of_two());
    let capacity = (size.max(1) + page_size - 1) & !(page_size - 1);
    let ptr = unsafe {
        libc::mmap(
            std::ptr::null_mut(),
            capacity,
            libc::PROT_READ | libc::PROT_WRITE,
            libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
            -1,
            0,
        )
    };
    if ptr.is_null() || ptr == libc::MAP_FAILED {
        let err = std::io::Error::last_os_error();
        return Err(err);
    }
    Ok((ptr, capacity))
}

/// Frees memory that was allocated with [`allocate`].
///
/// # Safety
///
/// - `ptr` was returned by a previous call to [`allocate`]
/// - `size` matches the capacity returned by that call
/// - The memory has not already been freed
/// - No other references to the memory exist
pub unsafe fn free(ptr: *mut std::ffi::c_void, size: usize) -> std::io::Result<()> {
    let res = unsafe { libc::munmap(ptr, size) };
    if res < 0 {
        return Err(std::io::Error::last_os_error());
    }
    Ok(())
}

/// Gets the system's standard page size in bytes.
///
/// The value is read once with `sysconf(_SC_PAGESIZE)` and cached. Falls back
/// to 4KB if the system call fails.
pub fn get_page_size() -> usize {
    static SIZE: OnceLock<usize> = OnceLock::new();
    if let Some(&size) = SIZE.get() {
        size
    } else {
        match read_page_size() {
            Ok(size) => {
                let _ = SIZE.set(size);
                size
            }
            Err(_) => 4 * 1024,
        }
    }
}

fn read_page_size() -> std::io::Result<usize> {
    let res = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    if res < 0 {
        return Err(std::io::Error::last_os_error());
    }
    assert!(res < i32::MAX as _);
    Ok(res as usize)
}

type MadviseFn =
    unsafe extern "C" fn(*mut libc::c_void, libc::size_t, libc::c_int) -> libc::c_int;

const RELEASE_SYMBOL: &std::ffi::CStr = c"madvise";

/// Name of the release entry point on this platform, for diagnostics.
pub const RELEASE_ENTRY_POINT: &str = "madvise(MADV_DONTNEED)";

/// A resolved platform entry point that hands the physical pages of an anonymous
/// mapping back to the kernel without unmapping the address range.
///
/// On Linux this is `madvise(MADV_DONTNEED)`: after the call, the range stays mapped
/// and subsequent reads observe zero-filled pages.
#[derive(Clone, Copy)]
pub struct ReleaseEntryPoint {
    func: MadviseFn,
}

impl ReleaseEntryPoint {
    /// The symbol name the entry point was resolved from.
    pub fn name(&self) -> &'static str {
        RELEASE_ENTRY_POINT
    }

    /// Releases the physical pages backing `[ptr, ptr + size)`.
    ///
    /// Fails with `InvalidInput` if `ptr` is null or not page-aligned, or if `size`
    /// is not a non-zero multiple of the page size. Otherwise returns whatever
    /// `madvise` reports.
    ///
    /// # Safety
    ///
    /// The range must be an anonymous private mapping exclusively owned by the caller.
    /// Its contents are discarded.
    pub unsafe fn invoke(&self, ptr: *mut std::ffi::c_void, size: usize) -> std::io::Result<()> {
        check_page_range(ptr, size, get_page_size())?;
        let res = unsafe { (self.func)(ptr, size, libc::MADV_DONTNEED) };
        if res != 0 {
            return Err(std::io::Error::last_os_error());
        }
        Ok(())
    }
}

impl std::fmt::Debug for ReleaseEntryPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReleaseEntryPoint")
            .field("name", &self.name())
            .finish()
    }
}

/// Looks up the release entry point by symbol name in the already loaded images.
///
/// Returns `None` if the symbol cannot be found, e.g. in a statically linked binary
/// without a dynamic loader.
pub fn resolve_release_entry_point() -> Option<ReleaseEntryPoint> {
    let sym = unsafe { libc::dlsym(libc::RTLD_DEFAULT, RELEASE_SYMBOL.as_ptr()) };
    if sym.is_null() {
        return None;
    }
    let func = unsafe { std::mem::transmute::<*mut libc::c_void, MadviseFn>(sym) };
    Some(ReleaseEntryPoint { func })
}
