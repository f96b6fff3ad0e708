//! Early release of the native memory backing off-heap buffers.
//!
//! A [`CapabilityProbe`] determines once whether the platform offers a working
//! entry point for handing an off-heap buffer's pages back to the operating
//! system. A [`Releaser`] caches that [`Capability`] and exposes
//! [`Releaser::release`], which either invokes the mechanism or does nothing.
//! Release never panics and never reports an error to its caller's control
//! flow; the returned [`ReleaseOutcome`] is informational.
//!
//! Most callers use the process-wide releaser through [`release`].

pub mod capability;
pub mod options;
pub mod probe;
pub mod releaser;

pub use capability::{Capability, ReleaseMechanism};
pub use options::ReleaseOptions;
pub use probe::{CapabilityProbe, NativePlatform, ProbeFailure, ReleasePlatform};
pub use releaser::{ReleaseOutcome, Releaser};

use direct_mem_page_alloc::OffHeapMemory;

/// Releases the native memory backing `buffer` through the process-wide
/// releaser. See [`Releaser::release`].
pub fn release<B: OffHeapMemory + ?Sized>(buffer: &mut B) -> ReleaseOutcome {
    Releaser::global().release(buffer)
}

/// Returns `true` if the process-wide releaser found a working native
/// release mechanism. Triggers the probe if it has not run yet.
pub fn is_native_release_available() -> bool {
    Releaser::global().is_available()
}
