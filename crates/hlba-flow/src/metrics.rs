#![forbid(unsafe_code)]

use hlba_core::{HlbaError, HlbaResult, MICROS_PER_SEC};

/// Overhead multiplier for the cipher + scheduler path.
pub const ENHANCED_OVERHEAD: f64 = 1.0;
/// Overhead multiplier for the plain bucket.
pub const BASELINE_OVERHEAD: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Max-subarray ordering + Pascal obfuscation.
    Enhanced,
    /// Arrival order, payload untouched.
    Baseline,
}

/// Per-strategy multiplier applied to admitted bits before dividing by time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverheadModel {
    pub enhanced: f64,
    pub baseline: f64,
}

impl Default for OverheadModel {
    fn default() -> Self {
        Self { enhanced: ENHANCED_OVERHEAD, baseline: BASELINE_OVERHEAD }
    }
}

impl OverheadModel {
    pub fn multiplier(&self, strategy: Strategy) -> f64 {
        match strategy {
            Strategy::Enhanced => self.enhanced,
            Strategy::Baseline => self.baseline,
        }
    }

    pub fn validate(&self) -> HlbaResult<()> {
        for m in [self.enhanced, self.baseline] {
            if !(m.is_finite() && m > 0.0) {
                return Err(HlbaError::InvalidArgument("overhead multiplier must be positive and finite"));
            }
        }
        Ok(())
    }
}

/// Lifetime counters across every batch an engine has processed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Telemetry {
    pub batches: u64,
    pub admitted: u64,
    pub dropped: u64,
    pub admitted_bytes: u64,
    pub processing_us: u64,
}

#[derive(Debug, Clone, Default)]
pub struct MetricsCollector {
    model: OverheadModel,
    telemetry: Telemetry,
}

pub fn elapsed_secs(start_us: u64, end_us: u64) -> f64 {
    end_us.saturating_sub(start_us) as f64 / MICROS_PER_SEC as f64
}

impl MetricsCollector {
    pub fn new(model: OverheadModel) -> HlbaResult<Self> {
        model.validate()?;
        Ok(Self { model, telemetry: Telemetry::default() })
    }

    pub fn model(&self) -> &OverheadModel { &self.model }

    /// bits * overhead / seconds
    pub fn measure(&self, admitted_bytes: u64, elapsed_secs: f64, strategy: Strategy) -> HlbaResult<f64> {
        if !(elapsed_secs > 0.0) {
            return Err(HlbaError::InvalidArgument("elapsed time must be positive"));
        }
        let bits = admitted_bytes as f64 * 8.0 * self.model.multiplier(strategy);
        Ok(bits / elapsed_secs)
    }

    pub fn record_batch(&mut self, admitted: usize, dropped: usize, admitted_bytes: u64, elapsed_us: u64) {
        let t = &mut self.telemetry;
        t.batches += 1;
        t.admitted += admitted as u64;
        t.dropped += dropped as u64;
        t.admitted_bytes += admitted_bytes;
        t.processing_us += elapsed_us;
    }

    pub fn telemetry(&self) -> Telemetry { self.telemetry }
}
