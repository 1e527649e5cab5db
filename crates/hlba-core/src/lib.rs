#![no_std]
#[cfg(feature = "std")]
extern crate std;

extern crate alloc;
use alloc::vec::Vec;

/// Default number of Pascal rows precomputed per engine.
pub const DEFAULT_ROWS: usize = 5;

/// Largest table an engine may request. Row 63 sums to 2^63, the last power that fits a u64.
pub const MAX_ROWS: usize = 64;

/// Batches at or below this size keep arrival order.
pub const SMALL_BATCH_THRESHOLD: usize = 10;

pub const MICROS_PER_SEC: u64 = 1_000_000;

/// A logical traffic unit. Not bound to any socket or frame format.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Packet {
    id: u64,
    payload: Vec<u8>,
}

impl Packet {
    pub fn new(id: u64, payload: Vec<u8>) -> Self {
        Self { id, payload }
    }

    pub fn id(&self) -> u64 { self.id }
    pub fn payload(&self) -> &[u8] { &self.payload }
    pub fn size(&self) -> usize { self.payload.len() }

    /// Same identity, different bytes. Used when a payload is scrambled or restored.
    pub fn with_payload(&self, payload: Vec<u8>) -> Self {
        Self { id: self.id, payload }
    }

    pub fn into_payload(self) -> Vec<u8> { self.payload }
}

pub type HlbaResult<T> = Result<T, HlbaError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HlbaError {
    /// A caller broke a construction or call contract. Not retryable.
    InvalidArgument(&'static str),
    /// The injected clock could not produce a timestamp.
    ClockFailure,
}

impl core::fmt::Display for HlbaError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HlbaError::InvalidArgument(what) => write!(f, "invalid argument: {}", what),
            HlbaError::ClockFailure => write!(f, "clock failure"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HlbaError {}
