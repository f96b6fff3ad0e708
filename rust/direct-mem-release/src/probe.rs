//! One-time detection of the native release mechanism.
//!
//! The probe resolves the platform entry point and invokes it once against a
//! throwaway buffer. Only a successful trial makes the mechanism available;
//! every kind of failure, including a panic in platform code, degrades to
//! [`Capability::Unavailable`] and is reported through a single `debug` log
//! record.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use direct_mem_page_alloc::{DirectBuffer, OffHeapMemory, mmap};
use thiserror::Error;

use crate::capability::{Capability, NativeMechanism, ReleaseMechanism};
use crate::options::ReleaseOptions;

/// Source of the release entry point and of the buffer used for its trial run.
pub trait ReleasePlatform: Send + Sync {
    /// Name of the entry point this platform resolves, used in diagnostics.
    fn entry_point_name(&self) -> &str;

    /// Resolves the entry point, or returns `None` if it does not exist.
    fn resolve(&self) -> Option<Arc<dyn ReleaseMechanism>>;

    /// Allocates the minimal buffer the trial invocation runs against.
    fn allocate_trial(&self) -> std::io::Result<DirectBuffer> {
        DirectBuffer::allocate(1)
    }
}

/// The platform the process runs on.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativePlatform;

impl ReleasePlatform for NativePlatform {
    fn entry_point_name(&self) -> &str {
        mmap::RELEASE_ENTRY_POINT
    }

    fn resolve(&self) -> Option<Arc<dyn ReleaseMechanism>> {
        mmap::resolve_release_entry_point()
            .map(|entry| Arc::new(NativeMechanism::new(entry)) as Arc<dyn ReleaseMechanism>)
    }
}

/// Why the probe reported the mechanism as unavailable.
///
/// The reason is only logged; callers see [`Capability::Unavailable`] for all of them.
#[derive(Debug, Error)]
pub enum ProbeFailure {
    #[error("disabled by configuration")]
    Disabled,

    #[error("failed to allocate trial buffer: {0}")]
    TrialAllocation(#[source] std::io::Error),

    #[error("entry point {name} is not present")]
    EntryPointMissing { name: String },

    #[error("access to {name} denied: {source}")]
    AccessDenied {
        name: String,
        source: std::io::Error,
    },

    #[error("trial invocation of {name} failed: {source}")]
    Invocation {
        name: String,
        source: std::io::Error,
    },

    #[error("trial invocation of {name} panicked")]
    Panicked { name: String },
}

impl ProbeFailure {
    pub(crate) fn from_invocation(name: &str, source: std::io::Error) -> ProbeFailure {
        let name = name.to_string();
        if source.kind() == std::io::ErrorKind::PermissionDenied {
            ProbeFailure::AccessDenied { name, source }
        } else {
            ProbeFailure::Invocation { name, source }
        }
    }
}

pub struct CapabilityProbe {
    platform: Box<dyn ReleasePlatform>,
    options: ReleaseOptions,
}

impl CapabilityProbe {
    pub fn new(
        platform: impl ReleasePlatform + 'static,
        options: ReleaseOptions,
    ) -> CapabilityProbe {
        CapabilityProbe {
            platform: Box::new(platform),
            options,
        }
    }

    /// A probe for the platform the process runs on.
    pub fn native(options: ReleaseOptions) -> CapabilityProbe {
        Self::new(NativePlatform, options)
    }

    /// Determines whether the release mechanism is usable.
    ///
    /// Never fails and never panics. Each call performs a full probe; caching
    /// the result is up to the caller (see [`crate::Releaser`]).
    pub fn run(&self) -> Capability {
        match self.try_run() {
            Ok(mechanism) => {
                log::debug!(
                    "native direct-memory release ({}): available",
                    mechanism.name()
                );
                Capability::Available(mechanism)
            }
            Err(failure) => {
                log::debug!(
                    "native direct-memory release ({}): unavailable: {failure}",
                    self.platform.entry_point_name()
                );
                Capability::Unavailable
            }
        }
    }

    fn try_run(&self) -> Result<Arc<dyn ReleaseMechanism>, ProbeFailure> {
        if self.options.disabled {
            return Err(ProbeFailure::Disabled);
        }
        catch_unwind(AssertUnwindSafe(|| self.trial())).unwrap_or_else(|_| {
            Err(ProbeFailure::Panicked {
                name: self.platform.entry_point_name().to_string(),
            })
        })
    }

    fn trial(&self) -> Result<Arc<dyn ReleaseMechanism>, ProbeFailure> {
        let buffer = self
            .platform
            .allocate_trial()
            .map_err(ProbeFailure::TrialAllocation)?;
        let mechanism = self
            .platform
            .resolve()
            .ok_or_else(|| ProbeFailure::EntryPointMissing {
                name: self.platform.entry_point_name().to_string(),
            })?;
        // The trial buffer is owned here and dropped right after the call.
        unsafe { mechanism.release(buffer.memory_region()) }
            .map_err(|e| ProbeFailure::from_invocation(mechanism.name(), e))?;
        Ok(mechanism)
    }
}

impl std::fmt::Debug for CapabilityProbe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapabilityProbe")
            .field("entry_point", &self.platform.entry_point_name())
            .field("options", &self.options)
            .finish()
    }
}
