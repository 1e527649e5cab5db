#![no_std]

extern crate alloc;

mod bucket;
mod metrics;
mod scheduler;
mod shared;

pub use bucket::{Admission, AdmissionResult, BucketState};
pub use metrics::{
    elapsed_secs, MetricsCollector, OverheadModel, Strategy, Telemetry, BASELINE_OVERHEAD,
    ENHANCED_OVERHEAD,
};
pub use scheduler::{
    max_subarray, MaxSubarrayPolicy, OrderingPolicy, Scheduler, SmallBatchPolicy, Subarray,
};
pub use shared::SharedBucket;
