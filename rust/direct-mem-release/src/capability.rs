use std::sync::Arc;

use direct_mem_page_alloc::{MemoryRegion, mmap};

/// A resolved entry point capable of releasing the physical memory behind an
/// off-heap region ahead of the region's deallocation.
pub trait ReleaseMechanism: Send + Sync {
    /// Human-readable name of the entry point.
    fn name(&self) -> &str;

    /// Releases the memory described by `region`.
    ///
    /// # Safety
    ///
    /// `region` must come from an [`OffHeapMemory`](direct_mem_page_alloc::OffHeapMemory)
    /// implementor that the caller borrows mutably for the duration of the call.
    unsafe fn release(&self, region: MemoryRegion) -> std::io::Result<()>;
}

/// Result of the one-time capability probe.
#[derive(Clone)]
pub enum Capability {
    Available(Arc<dyn ReleaseMechanism>),
    Unavailable,
}

impl Capability {
    #[inline]
    pub fn is_available(&self) -> bool {
        matches!(self, Capability::Available(_))
    }

    /// Name of the mechanism, if one is available.
    pub fn mechanism_name(&self) -> Option<&str> {
        match self {
            Capability::Available(mechanism) => Some(mechanism.name()),
            Capability::Unavailable => None,
        }
    }
}

impl std::fmt::Debug for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Capability::Available(mechanism) => {
                f.debug_tuple("Available").field(&mechanism.name()).finish()
            }
            Capability::Unavailable => f.write_str("Unavailable"),
        }
    }
}

/// The platform's own release entry point, see [`mmap::resolve_release_entry_point`].
#[derive(Debug)]
pub(crate) struct NativeMechanism {
    entry: mmap::ReleaseEntryPoint,
}

impl NativeMechanism {
    pub(crate) fn new(entry: mmap::ReleaseEntryPoint) -> NativeMechanism {
        NativeMechanism { entry }
    }
}

impl ReleaseMechanism for NativeMechanism {
    fn name(&self) -> &str {
        self.entry.name()
    }

    unsafe fn release(&self, region: MemoryRegion) -> std::io::Result<()> {
        unsafe { self.entry.invoke(region.ptr as _, region.capacity) }
    }
}
