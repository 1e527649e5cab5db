#![forbid(unsafe_code)]

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use hlba_core::{HlbaError, HlbaResult, Packet, MICROS_PER_SEC};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Admitted,
    Dropped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmissionResult {
    pub packet: Packet,
    pub outcome: Admission,
}

impl AdmissionResult {
    pub fn is_admitted(&self) -> bool { self.outcome == Admission::Admitted }
}

/// The Leaky Bucket.
///
/// Holds up to `capacity` packets in FIFO order and releases `leak_rate`
/// packets per second of elapsed time. The fill level *is* the queue length,
/// so `level == queue.len()` holds by construction.
///
/// Not internally synchronized: one owner per flow. See [`crate::SharedBucket`]
/// for several producers on the same flow.
#[derive(Debug, Clone)]
pub struct BucketState {
    capacity: usize,
    leak_rate: u64,   // Packets per second
    last_leak_us: u64,
    queue: VecDeque<Packet>,
}

impl BucketState {
    pub fn new(capacity: usize, leak_rate: u64, now_us: u64) -> HlbaResult<Self> {
        if capacity == 0 {
            return Err(HlbaError::InvalidArgument("capacity must be positive"));
        }
        if leak_rate == 0 {
            return Err(HlbaError::InvalidArgument("leak rate must be positive"));
        }
        Ok(Self {
            capacity,
            leak_rate,
            last_leak_us: now_us,
            queue: VecDeque::with_capacity(capacity),
        })
    }

    /// Release queued packets for the time elapsed since the last leak.
    /// Returns how many actually left the bucket.
    pub fn leak(&mut self, now_us: u64) -> usize {
        self.leak_with(now_us, drop)
    }

    /// Same as [`leak`](Self::leak) but hands the released packets back (egress order).
    pub fn release(&mut self, now_us: u64) -> Vec<Packet> {
        let mut out = Vec::new();
        self.leak_with(now_us, |p| out.push(p));
        out
    }

    fn leak_with<F: FnMut(Packet)>(&mut self, now_us: u64, mut sink: F) -> usize {
        // Clock skew backwards counts as no elapsed time.
        let elapsed = now_us.saturating_sub(self.last_leak_us);
        self.last_leak_us = now_us;

        // (packets/s * us) / 1M, u128 against overflow.
        // Whole packets only; the fraction is not carried to the next leak.
        let units = (elapsed as u128 * self.leak_rate as u128) / MICROS_PER_SEC as u128;

        let n = core::cmp::min(units, self.queue.len() as u128) as usize;
        for packet in self.queue.drain(..n) {
            sink(packet);
        }
        n
    }

    /// Leak, then admit if there is room. A drop leaves the bucket untouched.
    pub fn add_packet(&mut self, packet: Packet, now_us: u64) -> AdmissionResult {
        // Zero elapsed time leaks nothing; skipping is purely a shortcut.
        if now_us != self.last_leak_us {
            self.leak(now_us);
        }

        if self.queue.len() < self.capacity {
            self.queue.push_back(packet.clone());
            AdmissionResult { packet, outcome: Admission::Admitted }
        } else {
            AdmissionResult { packet, outcome: Admission::Dropped }
        }
    }

    pub fn level(&self) -> usize { self.queue.len() }
    pub fn capacity(&self) -> usize { self.capacity }
    pub fn leak_rate(&self) -> u64 { self.leak_rate }
    pub fn last_leak_us(&self) -> u64 { self.last_leak_us }
    pub fn is_full(&self) -> bool { self.queue.len() >= self.capacity }
    pub fn is_empty(&self) -> bool { self.queue.is_empty() }

    /// Oldest first.
    pub fn queued(&self) -> impl Iterator<Item = &Packet> {
        self.queue.iter()
    }
}
