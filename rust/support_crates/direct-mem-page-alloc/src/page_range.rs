/// Checks that `[ptr, ptr + size)` covers whole pages of `page_size` bytes.
#[cfg_attr(not(any(target_os = "linux", windows)), allow(dead_code))]
pub(crate) fn check_page_range(
    ptr: *mut std::ffi::c_void,
    size: usize,
    page_size: usize,
) -> std::io::Result<()> {
    if ptr.is_null() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "null page range",
        ));
    }
    if !(ptr as usize).is_multiple_of(page_size) {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "page range is not page-aligned",
        ));
    }
    if size == 0 || !size.is_multiple_of(page_size) {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "page range size is not a non-zero multiple of the page size",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::check_page_range;

    const PAGE: usize = 4096;

    #[test]
    fn test_check_page_range() {
        let aligned = (PAGE * 16) as *mut std::ffi::c_void;
        assert!(check_page_range(aligned, PAGE, PAGE).is_ok());
        assert!(check_page_range(aligned, PAGE * 3, PAGE).is_ok());

        let err = check_page_range(std::ptr::null_mut(), PAGE, PAGE).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);

        let misaligned = (PAGE * 16 + 8) as *mut std::ffi::c_void;
        assert!(check_page_range(misaligned, PAGE, PAGE).is_err());

        assert!(check_page_range(aligned, 0, PAGE).is_err());
        assert!(check_page_range(aligned, PAGE + 1, PAGE).is_err());
    }
}
