#![forbid(unsafe_code)]

use alloc::sync::Arc;
use hlba_core::Packet;
use spin::Mutex;

use crate::bucket::{AdmissionResult, BucketState};

/// One flow, many producers.
/// The lock is held across the whole leak + admit step, so two producers can
/// never both see the last free slot.
#[derive(Debug, Clone)]
pub struct SharedBucket {
    inner: Arc<Mutex<BucketState>>,
}

impl SharedBucket {
    pub fn new(state: BucketState) -> Self {
        Self { inner: Arc::new(Mutex::new(state)) }
    }

    pub fn admit(&self, packet: Packet, now_us: u64) -> AdmissionResult {
        self.inner.lock().add_packet(packet, now_us)
    }

    pub fn leak(&self, now_us: u64) -> usize {
        self.inner.lock().leak(now_us)
    }

    pub fn level(&self) -> usize {
        self.inner.lock().level()
    }

    /// Run several steps under one lock.
    pub fn with<R>(&self, f: impl FnOnce(&mut BucketState) -> R) -> R {
        f(&mut self.inner.lock())
    }
}
