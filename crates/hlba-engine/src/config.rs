use hlba_core::{HlbaError, HlbaResult, DEFAULT_ROWS, MAX_ROWS};
use hlba_flow::{OverheadModel, Strategy};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub capacity: usize,
    /// Packets per second.
    pub leak_rate: u64,
    pub rows: usize,
    pub strategy: Strategy,
    pub overhead: OverheadModel,
}

impl EngineConfig {
    pub fn new(capacity: usize, leak_rate: u64) -> Self {
        Self {
            capacity,
            leak_rate,
            rows: DEFAULT_ROWS,
            strategy: Strategy::Enhanced,
            overhead: OverheadModel::default(),
        }
    }

    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_overhead(mut self, overhead: OverheadModel) -> Self {
        self.overhead = overhead;
        self
    }

    pub fn validate(&self) -> HlbaResult<()> {
        if self.capacity == 0 {
            return Err(HlbaError::InvalidArgument("capacity must be positive"));
        }
        if self.leak_rate == 0 {
            return Err(HlbaError::InvalidArgument("leak rate must be positive"));
        }
        if self.rows == 0 {
            return Err(HlbaError::InvalidArgument("rows must be positive"));
        }
        if self.rows > MAX_ROWS {
            return Err(HlbaError::InvalidArgument("rows exceeds 64-bit coefficient range"));
        }
        self.overhead.validate()
    }
}
