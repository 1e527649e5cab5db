#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;
use alloc::sync::Arc;
use core::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use hlba_core::{HlbaError, HlbaResult};

/// The Wall Clock.
/// INVARIANT: Monotonic. Microseconds since an arbitrary per-clock epoch.
/// A failed read is fatal to the caller; there is no fallback timestamp.
pub trait PlatformClock: Send + Sync {
    fn now_us(&self) -> HlbaResult<u64>;
}

impl<C: PlatformClock + ?Sized> PlatformClock for Arc<C> {
    fn now_us(&self) -> HlbaResult<u64> { (**self).now_us() }
}

#[derive(Debug)]
struct ManualState {
    now_us: AtomicU64,
    step_us: AtomicU64,
    failed: AtomicBool,
}

/// Steppable clock for deterministic runs.
///
/// Clones share one timeline, so a test can hand one handle to an engine and
/// keep another to advance time. With a non-zero step every read moves the
/// clock forward by that many microseconds *after* returning.
#[derive(Debug, Clone)]
pub struct ManualClock {
    state: Arc<ManualState>,
}

impl ManualClock {
    pub fn new(start_us: u64) -> Self {
        Self::with_step(start_us, 0)
    }

    pub fn with_step(start_us: u64, step_us: u64) -> Self {
        Self {
            state: Arc::new(ManualState {
                now_us: AtomicU64::new(start_us),
                step_us: AtomicU64::new(step_us),
                failed: AtomicBool::new(false),
            }),
        }
    }

    pub fn set_us(&self, now_us: u64) {
        self.state.now_us.store(now_us, Ordering::SeqCst);
    }

    pub fn advance_us(&self, delta_us: u64) {
        self.state.now_us.fetch_add(delta_us, Ordering::SeqCst);
    }

    pub fn set_step_us(&self, step_us: u64) {
        self.state.step_us.store(step_us, Ordering::SeqCst);
    }

    /// Make subsequent reads fail (or recover).
    pub fn set_failed(&self, failed: bool) {
        self.state.failed.store(failed, Ordering::SeqCst);
    }

    /// Current reading without consuming a step.
    pub fn peek_us(&self) -> u64 {
        self.state.now_us.load(Ordering::SeqCst)
    }
}

impl PlatformClock for ManualClock {
    fn now_us(&self) -> HlbaResult<u64> {
        if self.state.failed.load(Ordering::SeqCst) {
            return Err(HlbaError::ClockFailure);
        }
        let step = self.state.step_us.load(Ordering::SeqCst);
        Ok(self.state.now_us.fetch_add(step, Ordering::SeqCst))
    }
}
