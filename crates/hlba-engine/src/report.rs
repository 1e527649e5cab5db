use alloc::vec::Vec;
use hlba_core::Packet;

/// Outcome of one `process` call. Packets appear in decision order exactly as
/// the caller passed them in; the scrambled copies live in the bucket queue.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingReport {
    pub admitted: Vec<Packet>,
    pub dropped: Vec<Packet>,
    pub processing_time_ms: f64,
    pub bandwidth_bps: f64,
}

impl ProcessingReport {
    pub fn total(&self) -> usize {
        self.admitted.len() + self.dropped.len()
    }

    pub fn admitted_bytes(&self) -> u64 {
        self.admitted.iter().map(|p| p.size() as u64).sum()
    }
}
