use direct_mem_page_alloc::DirectBuffer;
use direct_mem_release::{ReleaseOutcome, Releaser, is_native_release_available, release};

/// Exercises the process-wide releaser end to end: the first call probes the
/// platform, every later call reuses the cached capability.
#[test]
fn test_global_release() {
    let mut buffer = DirectBuffer::allocate(8192).expect("allocate");
    buffer.fill(0x11);

    let outcome = release(&mut buffer);
    if is_native_release_available() {
        assert_eq!(outcome, ReleaseOutcome::Released);
        if cfg!(target_os = "linux") {
            assert!(buffer.iter().all(|&b| b == 0));
        }
    } else {
        assert_eq!(outcome, ReleaseOutcome::Skipped);
        assert!(buffer.iter().all(|&b| b == 0x11));
    }

    // A second release of the same buffer is harmless.
    assert_eq!(release(&mut buffer), outcome);
    assert!(std::ptr::eq(Releaser::global(), Releaser::global()));
}

#[test]
fn test_global_release_concurrent() {
    const THREADS: usize = 12;

    let expected = if is_native_release_available() {
        ReleaseOutcome::Released
    } else {
        ReleaseOutcome::Skipped
    };

    std::thread::scope(|s| {
        for i in 0..THREADS {
            s.spawn(move || {
                let mut buffer = DirectBuffer::allocate(1000 * (i + 1)).expect("allocate");
                buffer.fill(i as u8);
                assert_eq!(release(&mut buffer), expected);
            });
        }
    });
}
