use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::OnceLock;

use direct_mem_page_alloc::OffHeapMemory;

use crate::capability::Capability;
use crate::options::ReleaseOptions;
use crate::probe::CapabilityProbe;

/// What a [`Releaser::release`] call did.
///
/// Purely informational: release is best effort, and a caller on a cleanup
/// path is free to ignore the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// The native memory was handed back to the system.
    Released,
    /// No release mechanism is available; the memory is reclaimed when its
    /// owner is dropped.
    Skipped,
    /// The mechanism failed for this buffer. The buffer is left to its owner.
    Failed,
}

impl ReleaseOutcome {
    #[inline]
    pub fn is_released(self) -> bool {
        self == ReleaseOutcome::Released
    }
}

/// Releases the native memory of off-heap buffers ahead of their deallocation.
///
/// The capability is resolved on first use and cached for the lifetime of the
/// releaser; afterwards `release` reads it without locking.
pub struct Releaser {
    capability: OnceLock<Capability>,
    probe: Option<CapabilityProbe>,
}

impl Releaser {
    /// Creates a releaser that runs `probe` on first use.
    pub fn new(probe: CapabilityProbe) -> Releaser {
        Releaser {
            capability: OnceLock::new(),
            probe: Some(probe),
        }
    }

    /// Creates a releaser with an already determined capability.
    pub fn with_capability(capability: Capability) -> Releaser {
        Releaser {
            capability: OnceLock::from(capability),
            probe: None,
        }
    }

    /// The process-wide releaser, probing the native platform with options
    /// read from the environment.
    pub fn global() -> &'static Releaser {
        static GLOBAL: OnceLock<Releaser> = OnceLock::new();
        GLOBAL.get_or_init(|| Releaser::new(CapabilityProbe::native(ReleaseOptions::from_env())))
    }

    /// Returns the cached capability, running the probe if this is the first use.
    pub fn capability(&self) -> &Capability {
        self.capability.get_or_init(|| match &self.probe {
            Some(probe) => probe.run(),
            None => Capability::Unavailable,
        })
    }

    #[inline]
    pub fn is_available(&self) -> bool {
        self.capability().is_available()
    }

    /// Releases the native memory backing `buffer`.
    ///
    /// If the capability is available, the mechanism is invoked on the buffer's
    /// whole region; otherwise the call returns [`ReleaseOutcome::Skipped`]
    /// without touching the buffer. Errors and panics raised by the mechanism
    /// are contained and reported as [`ReleaseOutcome::Failed`].
    ///
    /// After a successful release the buffer stays valid, but its previous
    /// contents are gone. Releasing the same buffer again is harmless.
    pub fn release<B: OffHeapMemory + ?Sized>(&self, buffer: &mut B) -> ReleaseOutcome {
        let Capability::Available(mechanism) = self.capability() else {
            return ReleaseOutcome::Skipped;
        };

        let result = catch_unwind(AssertUnwindSafe(|| {
            let region = buffer.memory_region();
            unsafe { mechanism.release(region) }
        }));
        match result {
            Ok(Ok(())) => ReleaseOutcome::Released,
            Ok(Err(e)) => {
                log::trace!("direct buffer release via {} failed: {e}", mechanism.name());
                ReleaseOutcome::Failed
            }
            Err(_) => {
                log::trace!("direct buffer release via {} panicked", mechanism.name());
                ReleaseOutcome::Failed
            }
        }
    }
}

impl std::fmt::Debug for Releaser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Releaser")
            .field("capability", &self.capability.get())
            .finish()
    }
}
