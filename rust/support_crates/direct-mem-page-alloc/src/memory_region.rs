//! `OffHeapMemory`: a trait for types that own page-granular off-heap memory.

/// A trait for types that own a page-granular, off-heap memory region that can
/// have its physical pages released ahead of the owner's own deallocation.
///
/// # Safety
///
/// Implementors must guarantee that:
/// - The region returned by `memory_region()` stays mapped for the entire
///   lifetime of the owner.
/// - The region is exclusively owned by the implementor, with no shared
///   ownership of the underlying pages.
/// - `ptr` is aligned to `alignment`, which is the page size used for the
///   allocation, and `capacity` is a multiple of it.
/// - The owner tolerates its contents being discarded at any point where it
///   is borrowed mutably.
pub unsafe trait OffHeapMemory {
    /// Returns information about the owned memory region.
    fn memory_region(&self) -> MemoryRegion;
}

/// Describes an owned off-heap memory region.
#[derive(Debug, Clone, Copy)]
pub struct MemoryRegion {
    /// Pointer to the start of the region.
    pub ptr: *mut u8,
    /// Logical length of the region in bytes.
    pub len: usize,
    /// Total mapped capacity of the region in bytes.
    pub capacity: usize,
    /// Page size the region was allocated with.
    pub alignment: usize,
}
