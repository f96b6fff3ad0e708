use std::sync::OnceLock;
use windows_sys::Win32::{
    Foundation::{ERROR_SUCCESS, GetLastError},
    System::{
        LibraryLoader::{GetModuleHandleW, GetProcAddress},
        Memory::{MEM_COMMIT, MEM_RELEASE, MEM_RESERVE, PAGE_READWRITE, VirtualAlloc, VirtualFree},
        SystemInformation::{GetSystemInfo, SYSTEM_INFO},
    },
};

use crate::page_range::check_page_range;

/// Allocates memory using standard pages via `VirtualAlloc`.
///
/// This function commits `size` bytes of memory using the standard system page size,
/// which is typically 4KB.
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

    unsafe {
        let ptr = VirtualAlloc(
            std::ptr::null_mut(),
            capacity,
            MEM_COMMIT | MEM_RESERVE,
            PAGE_READWRITE,
        );

        if ptr.is_null() {
            let error = GetLastError();
            return Err(std::io::Error::from_raw_os_error(error as i32));
        }

        Ok((ptr, capacity))
    }
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
    assert!(size.is_multiple_of(get_page_size()));
    unsafe {
        let result = VirtualFree(ptr, 0, MEM_RELEASE);
        if result == 0 {
            let error = GetLastError();
            return Err(std::io::Error::from_raw_os_error(error as i32));
        }
    }
    Ok(())
}

/// Gets the system's standard page size in bytes.
///
/// The value is queried once with `GetSystemInfo` and cached.
pub fn get_page_size() -> usize {
    static PAGE_SIZE: OnceLock<usize> = OnceLock::new();

    *PAGE_SIZE.get_or_init(|| unsafe {
        let mut system_info: SYSTEM_INFO = std::mem::zeroed();
        GetSystemInfo(&mut system_info);
        system_info.dwPageSize as usize
    })
}

type DiscardVirtualMemoryFn = unsafe extern "system" fn(*mut std::ffi::c_void, usize) -> u32;

const RELEASE_MODULE: &str = "kernel32.dll";
const RELEASE_SYMBOL: &std::ffi::CStr = c"DiscardVirtualMemory";

/// Name of the release entry point on this platform, for diagnostics.
pub const RELEASE_ENTRY_POINT: &str = "DiscardVirtualMemory";

/// A resolved platform entry point that hands the physical pages of a committed
/// region back to the system without decommitting the address range.
///
/// On Windows this is `DiscardVirtualMemory`, which is only exported by
/// Windows 8.1 and later. After the call the range stays committed and its
/// contents are undefined.
#[derive(Clone, Copy)]
pub struct ReleaseEntryPoint {
    func: DiscardVirtualMemoryFn,
}

impl ReleaseEntryPoint {
    /// The symbol name the entry point was resolved from.
    pub fn name(&self) -> &'static str {
        RELEASE_ENTRY_POINT
    }

    /// Releases the physical pages backing `[ptr, ptr + size)`.
    ///
    /// Fails with `InvalidInput` if `ptr` is null or not page-aligned, or if `size`
    /// is not a non-zero multiple of the page size.
    ///
    /// # Safety
    ///
    /// The range must be committed private memory exclusively owned by the caller.
    /// Its contents are discarded.
    pub unsafe fn invoke(&self, ptr: *mut std::ffi::c_void, size: usize) -> std::io::Result<()> {
        check_page_range(ptr, size, get_page_size())?;
        let res = unsafe { (self.func)(ptr, size) };
        if res != ERROR_SUCCESS {
            return Err(std::io::Error::from_raw_os_error(res as i32));
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

/// Looks up the release entry point by name in `kernel32.dll`.
///
/// Returns `None` on Windows versions that do not export `DiscardVirtualMemory`.
pub fn resolve_release_entry_point() -> Option<ReleaseEntryPoint> {
    let module_name: Vec<u16> = RELEASE_MODULE
        .encode_utf16()
        .chain(std::iter::once(0))
        .collect();
    unsafe {
        let module = GetModuleHandleW(module_name.as_ptr());
        if module.is_null() {
            return None;
        }
        let proc = GetProcAddress(module, RELEASE_SYMBOL.as_ptr() as *const u8)?;
        let func = std::mem::transmute::<unsafe extern "system" fn() -> isize, DiscardVirtualMemoryFn>(
            proc,
        );
        Some(ReleaseEntryPoint { func })
    }
}
