use alloc::vec::Vec;
use hlba_cipher::Obfuscator;
use hlba_core::{HlbaResult, Packet};
use hlba_flow::{Scheduler, Strategy};
use hlba_math::CombinatorialTable;

/// What happens to a batch before it reaches the bucket.
/// Chosen once per engine from [`Strategy`].
pub trait AdmissionPipeline: Send + Sync {
    fn strategy(&self) -> Strategy;

    /// Permutation of `0..sizes.len()`.
    fn order(&self, sizes: &[usize]) -> Vec<usize>;

    /// Transform applied to each packet on its way into the bucket.
    fn prepare(&self, packet: &Packet) -> HlbaResult<Packet>;

    /// Inverse of [`prepare`](Self::prepare).
    fn restore(&self, packet: &Packet) -> HlbaResult<Packet>;

    fn table(&self) -> Option<&CombinatorialTable> { None }
}

/// Max-subarray ordering + Pascal obfuscation.
pub struct EnhancedPipeline {
    scheduler: Scheduler,
    obfuscator: Obfuscator,
}

impl EnhancedPipeline {
    pub fn new(rows: usize) -> HlbaResult<Self> {
        Ok(Self { scheduler: Scheduler::new(), obfuscator: Obfuscator::with_rows(rows)? })
    }
}

impl AdmissionPipeline for EnhancedPipeline {
    fn strategy(&self) -> Strategy { Strategy::Enhanced }

    fn order(&self, sizes: &[usize]) -> Vec<usize> {
        self.scheduler.order(sizes)
    }

    fn prepare(&self, packet: &Packet) -> HlbaResult<Packet> {
        self.obfuscator.obfuscate(packet)
    }

    fn restore(&self, packet: &Packet) -> HlbaResult<Packet> {
        self.obfuscator.reveal(packet)
    }

    fn table(&self) -> Option<&CombinatorialTable> {
        Some(self.obfuscator.table())
    }
}

/// Plain leaky bucket: arrival order, bytes untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaselinePipeline;

impl AdmissionPipeline for BaselinePipeline {
    fn strategy(&self) -> Strategy { Strategy::Baseline }

    fn order(&self, sizes: &[usize]) -> Vec<usize> {
        (0..sizes.len()).collect()
    }

    fn prepare(&self, packet: &Packet) -> HlbaResult<Packet> {
        Ok(packet.clone())
    }

    fn restore(&self, packet: &Packet) -> HlbaResult<Packet> {
        Ok(packet.clone())
    }
}
