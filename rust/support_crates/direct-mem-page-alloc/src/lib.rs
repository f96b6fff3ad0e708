//! Page-granular off-heap allocation and the platform entry points used to
//! release its physical pages early.

pub mod direct_buffer;
pub mod memory_region;

#[cfg_attr(any(target_os = "linux"), path = "mmap_linux.rs")]
#[cfg_attr(windows, path = "mmap_win.rs")]
#[cfg_attr(not(any(target_os = "linux", windows)), path = "mmap_fallback.rs")]
pub mod mmap;

mod page_range;

pub use direct_buffer::DirectBuffer;
pub use memory_region::{MemoryRegion, OffHeapMemory};

#[cfg(test)]
mod tests;
