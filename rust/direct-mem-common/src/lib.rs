//! Error and result definitions shared by all direct-mem-* crates.

pub mod error;
pub mod result;

pub use result::Result;
