use crate::{DirectBuffer, OffHeapMemory, mmap};

#[test]
fn test_page_allocations() {
    let p = Pages::allocate(1).unwrap();
    assert!(!p.ptr.is_null());
    assert_eq!(p.size, mmap::get_page_size());
    assert!(p.is_aligned(mmap::get_page_size()));

    let p = Pages::allocate(0).unwrap();
    assert!(!p.ptr.is_null());
    assert_eq!(p.size, mmap::get_page_size(), "Zero size should allocate one page");
}

#[test]
fn test_allocate_multiple_pages() {
    let page_size = mmap::get_page_size();
    let pages = Pages::allocate(page_size * 3 + 100).expect("allocate");
    assert_eq!(pages.size, page_size * 4);
}

#[test]
fn test_page_size() {
    let page_size = DirectBuffer::page_size();
    assert!(page_size > 0);
    assert!(page_size.is_power_of_two());
}

#[cfg(any(target_os = "linux", windows))]
#[test]
fn test_release_entry_point_resolves() {
    let entry = mmap::resolve_release_entry_point().expect("release entry point");
    assert!(!entry.name().is_empty());
}

#[cfg(not(any(target_os = "linux", windows)))]
#[test]
fn test_release_entry_point_missing() {
    assert!(mmap::resolve_release_entry_point().is_none());
}

#[cfg(target_os = "linux")]
#[test]
fn test_release_entry_point_discards_contents() {
    let entry = mmap::resolve_release_entry_point().expect("release entry point");
    let mut buffer = DirectBuffer::allocate(mmap::get_page_size() * 2).unwrap();
    buffer.fill(0xAB);

    let region = buffer.memory_region();
    unsafe { entry.invoke(region.ptr as _, region.capacity) }.expect("invoke");

    // The mapping stays valid and reads back as fresh zero pages.
    assert!(buffer.iter().all(|&b| b == 0));
    buffer[0] = 7;
    assert_eq!(buffer[0], 7);
}

#[cfg(any(target_os = "linux", windows))]
#[test]
fn test_release_entry_point_rejects_partial_pages() {
    let entry = mmap::resolve_release_entry_point().expect("release entry point");
    let mut buffer = DirectBuffer::allocate(1024).unwrap();
    buffer.fill(1);

    let region = buffer.memory_region();
    let err = unsafe { entry.invoke(region.ptr as _, region.len) }.unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);

    let err = unsafe { entry.invoke(region.ptr.wrapping_add(1) as _, region.capacity) }
        .unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);

    assert!(buffer.iter().all(|&b| b == 1));
}

struct Pages {
    ptr: *mut std::ffi::c_void,
    size: usize,
}

impl Pages {
    fn allocate(size: usize) -> std::io::Result<Pages> {
        let (ptr, size) = crate::mmap::allocate(size)?;
        Ok(Pages { ptr, size })
    }

    fn is_aligned(&self, alignment: usize) -> bool {
        (self.ptr as usize).is_multiple_of(alignment)
    }
}

impl Drop for Pages {
    fn drop(&mut self) {
        if !self.ptr.is_null() {
            unsafe {
                crate::mmap::free(self.ptr, self.size).expect("free");
            }
        }
    }
}

#[test]
fn test_direct_buffer_allocate() {
    let size = 1024;
    let buffer = DirectBuffer::allocate(size).expect("Failed to allocate buffer");

    assert_eq!(buffer.len(), size);
    assert!(buffer.capacity() >= size);
    assert!(buffer.capacity() >= DirectBuffer::page_size());
    assert_eq!(buffer.alignment(), DirectBuffer::page_size());
    assert!(!buffer.ptr().is_null());
    assert!(!buffer.is_empty());
    assert!(buffer.iter().all(|&b| b == 0));
}

#[test]
fn test_direct_buffer_zero_size() {
    let buffer = DirectBuffer::allocate(0).expect("Failed to allocate zero-size buffer");

    assert_eq!(buffer.len(), 0);
    assert_eq!(buffer.capacity(), DirectBuffer::page_size());
    assert!(!buffer.ptr().is_null());
    assert!(buffer.is_empty());
}

#[test]
fn test_direct_buffer_write_read() {
    let size = 10 * 1024 * 1024;
    let mut buffer = DirectBuffer::allocate(size).expect("Failed to allocate buffer");

    buffer[0] = 1;
    buffer[size / 2] = 2;
    buffer[size - 1] = 3;

    let bytes: &[u8] = buffer.as_ref();
    assert_eq!(bytes[0], 1);
    assert_eq!(bytes[size / 2], 2);
    assert_eq!(bytes[size - 1], 3);
}

#[test]
fn test_direct_buffer_memory_region() {
    let buffer = DirectBuffer::allocate(5000).unwrap();
    let region = buffer.memory_region();

    assert_eq!(region.ptr, buffer.ptr());
    assert_eq!(region.len, 5000);
    assert_eq!(region.capacity, buffer.capacity());
    assert_eq!(region.alignment, DirectBuffer::page_size());
    assert!((region.ptr as usize).is_multiple_of(region.alignment));
    assert!(region.capacity.is_multiple_of(region.alignment));
}

#[test]
fn test_direct_buffer_debug() {
    let buffer = DirectBuffer::allocate(16).unwrap();
    let debug_str = format!("{:?}", buffer);
    assert!(debug_str.contains("DirectBuffer"));
    assert!(debug_str.contains("capacity"));
}
