use std::time::{Duration, Instant};

use rand::RngCore;

use hlba_core::{HlbaError, HlbaResult, Packet};
use hlba_hal::PlatformClock;

/// Monotonic host clock. Microseconds since construction.
#[derive(Debug, Clone, Copy)]
pub struct HostClock(Instant);

impl HostClock {
    pub fn new() -> Self { Self(Instant::now()) }
}

impl Default for HostClock {
    fn default() -> Self { Self::new() }
}

impl PlatformClock for HostClock {
    fn now_us(&self) -> HlbaResult<u64> {
        duration_us(self.0.elapsed())
    }
}

/// Whole microseconds in `d`. Spans past `u64::MAX` us are a clock failure.
pub fn duration_us(d: Duration) -> HlbaResult<u64> {
    u64::try_from(d.as_micros()).map_err(|_| HlbaError::ClockFailure)
}

/// `count` packets of `size` random bytes, ids starting at `first_id`.
/// Ids wrap past `u64::MAX`.
pub fn generate_packets<R: RngCore>(count: usize, size: usize, first_id: u64, rng: &mut R) -> Vec<Packet> {
    (0..count as u64)
        .map(|i| {
            let mut payload = vec![0u8; size];
            rng.fill_bytes(&mut payload);
            Packet::new(first_id.wrapping_add(i), payload)
        })
        .collect()
}
