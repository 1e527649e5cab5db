#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;
use alloc::boxed::Box;
use alloc::vec::Vec;

use log::{debug, info, trace};

use hlba_core::{HlbaResult, Packet};
use hlba_flow::{elapsed_secs, Admission, AdmissionResult, BucketState, MetricsCollector, Telemetry};
use hlba_hal::PlatformClock;

pub mod config;
pub mod pipeline;
pub mod report;

pub use config::EngineConfig;
pub use hlba_flow::{OverheadModel, Strategy};
pub use pipeline::{AdmissionPipeline, BaselinePipeline, EnhancedPipeline};
pub use report::ProcessingReport;

/// The Admission Engine.
///
/// One engine = one flow. The bucket lives as long as the engine and is
/// never reset between batches. `process` runs to completion; overflow shows
/// up as dropped packets, never as an error.
pub struct Engine {
    clock: Box<dyn PlatformClock>,
    pipeline: Box<dyn AdmissionPipeline>,
    bucket: BucketState,
    metrics: MetricsCollector,
    config: EngineConfig,
}

impl Engine {
    /// Enhanced strategy with the default overhead model.
    pub fn new(
        capacity: usize,
        leak_rate: u64,
        rows: usize,
        clock: Box<dyn PlatformClock>,
    ) -> HlbaResult<Self> {
        Self::with_config(EngineConfig::new(capacity, leak_rate).with_rows(rows), clock)
    }

    pub fn with_config(config: EngineConfig, clock: Box<dyn PlatformClock>) -> HlbaResult<Self> {
        config.validate()?;

        let pipeline: Box<dyn AdmissionPipeline> = match config.strategy {
            Strategy::Enhanced => Box::new(EnhancedPipeline::new(config.rows)?),
            Strategy::Baseline => Box::new(BaselinePipeline),
        };
        let metrics = MetricsCollector::new(config.overhead)?;
        let bucket = BucketState::new(config.capacity, config.leak_rate, clock.now_us()?)?;

        info!(
            "[ENGINE] {:?}: capacity={} leak_rate={}/s rows={}",
            config.strategy, config.capacity, config.leak_rate, config.rows
        );

        Ok(Self { clock, pipeline, bucket, metrics, config })
    }

    pub fn add_packet(&mut self, packet: Packet, now_us: u64) -> AdmissionResult {
        self.bucket.add_packet(packet, now_us)
    }

    pub fn leak(&mut self, now_us: u64) -> usize {
        self.bucket.leak(now_us)
    }

    pub fn leak_now(&mut self) -> HlbaResult<usize> {
        let now = self.clock.now_us()?;
        Ok(self.bucket.leak(now))
    }

    pub fn encrypt(&self, payload: &[u8], row: &[u64]) -> HlbaResult<Vec<u8>> {
        hlba_cipher::encrypt(payload, row)
    }

    pub fn decrypt(&self, ciphertext: &[u8], row: &[u64]) -> HlbaResult<Vec<u8>> {
        hlba_cipher::decrypt(ciphertext, row)
    }

    pub fn order(&self, sizes: &[usize]) -> Vec<usize> {
        self.pipeline.order(sizes)
    }

    /// Undo the pipeline transform on a packet taken from a report.
    pub fn reveal(&self, packet: &Packet) -> HlbaResult<Packet> {
        self.pipeline.restore(packet)
    }

    /// Keystream row; `None` past the table or for the baseline strategy.
    pub fn row(&self, index: usize) -> Option<&[u64]> {
        self.pipeline.table().and_then(|t| t.row(index))
    }

    pub fn process_now(&mut self, packets: &[Packet]) -> HlbaResult<ProcessingReport> {
        let now = self.clock.now_us()?;
        self.process(packets, now)
    }

    /// Order, transform and admit one batch at bucket time `now_us`.
    /// Processing time is taken from the injected clock around the whole pass.
    pub fn process(&mut self, packets: &[Packet], now_us: u64) -> HlbaResult<ProcessingReport> {
        let start = self.clock.now_us()?;

        let sizes: Vec<usize> = packets.iter().map(Packet::size).collect();
        let order = self.pipeline.order(&sizes);

        let mut admitted = Vec::new();
        let mut dropped = Vec::new();
        for idx in order {
            let input = &packets[idx];
            // The bucket queues the prepared bytes; the report keeps the input.
            let prepared = self.pipeline.prepare(input)?;
            match self.bucket.add_packet(prepared, now_us).outcome {
                Admission::Admitted => admitted.push(input.clone()),
                Admission::Dropped => {
                    trace!("drop id={} size={}", input.id(), input.size());
                    dropped.push(input.clone());
                }
            }
        }

        let end = self.clock.now_us()?;
        let elapsed_us = end.saturating_sub(start);
        let admitted_bytes: u64 = admitted.iter().map(|p| p.size() as u64).sum();

        let bandwidth_bps = if elapsed_us == 0 {
            // No measurable window (fixed clock).
            0.0
        } else {
            self.metrics.measure(admitted_bytes, elapsed_secs(start, end), self.config.strategy)?
        };
        self.metrics.record_batch(admitted.len(), dropped.len(), admitted_bytes, elapsed_us);

        debug!(
            "batch: in={} admitted={} dropped={} level={}/{} {}us",
            packets.len(), admitted.len(), dropped.len(),
            self.bucket.level(), self.bucket.capacity(), elapsed_us
        );

        Ok(ProcessingReport {
            admitted,
            dropped,
            processing_time_ms: elapsed_us as f64 / 1_000.0,
            bandwidth_bps,
        })
    }

    pub fn level(&self) -> usize { self.bucket.level() }
    pub fn capacity(&self) -> usize { self.bucket.capacity() }
    pub fn bucket(&self) -> &BucketState { &self.bucket }
    pub fn strategy(&self) -> Strategy { self.config.strategy }
    pub fn config(&self) -> &EngineConfig { &self.config }
    pub fn telemetry(&self) -> Telemetry { self.metrics.telemetry() }
}
