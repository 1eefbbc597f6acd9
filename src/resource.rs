//! Ownership accounting for fetched image payloads.
//!
//! Mirrors an object-URL style lifecycle: one acquire per fetched payload, one
//! release when the owning slot leaves the queue. The payload bytes themselves
//! are ref-counted, so a rendering layer holding a clone of the current frame
//! is unaffected by a release racing its last read.

use std::collections::HashMap;

use bytes::Bytes;
use tracing::warn;

/// Opaque token naming one live payload. Never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceHandle(u64);

/// Registry of live payloads. In steady state the queue keeps this bounded at
/// the window capacity.
#[derive(Debug, Default)]
pub struct ResourcePool {
    next: u64,
    live: HashMap<u64, Bytes>,
}

impl ResourcePool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&mut self, payload: Bytes) -> ResourceHandle {
        let id = self.next;
        self.next += 1;
        self.live.insert(id, payload);
        ResourceHandle(id)
    }

    /// Clone out the payload backing `handle`, if it is still live.
    #[must_use]
    pub fn payload(&self, handle: ResourceHandle) -> Option<Bytes> {
        self.live.get(&handle.0).cloned()
    }

    /// Release `handle`. `None` is a no-op. Releasing the same handle twice is
    /// a lifecycle bug; it is reported and ignored rather than panicking.
    pub fn release(&mut self, handle: Option<ResourceHandle>) -> bool {
        let Some(handle) = handle else {
            return false;
        };
        if self.live.remove(&handle.0).is_some() {
            true
        } else {
            warn!(handle = handle.0, "released a handle that was not live");
            false
        }
    }

    /// Number of live payloads.
    #[must_use]
    pub fn live_len(&self) -> usize {
        self.live.len()
    }
}
