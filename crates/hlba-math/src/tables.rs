use alloc::vec::Vec;
use hlba_core::{HlbaError, HlbaResult, MAX_ROWS};

/// Pascal's triangle, rows `0..rows`.
///
/// Row `i` has `i + 1` entries, starts and ends with 1, and sums to `2^i`.
/// Built once and treated as read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinatorialTable {
    rows: Vec<Vec<u64>>,
}

impl CombinatorialTable {
    /// O(rows^2) time and space.
    pub fn generate(rows: usize) -> HlbaResult<Self> {
        if rows < 1 {
            return Err(HlbaError::InvalidArgument("rows must be positive"));
        }
        if rows > MAX_ROWS {
            return Err(HlbaError::InvalidArgument("rows exceeds 64-bit coefficient range"));
        }

        let mut table: Vec<Vec<u64>> = Vec::with_capacity(rows);
        table.push(alloc::vec![1]);

        for i in 1..rows {
            let prev = &table[i - 1];
            let mut row = Vec::with_capacity(i + 1);
            row.push(1);
            for j in 1..i {
                row.push(prev[j - 1] + prev[j]);
            }
            row.push(1);
            table.push(row);
        }

        Ok(Self { rows: table })
    }

    pub fn len(&self) -> usize { self.rows.len() }

    /// Never true for a generated table; present for API symmetry.
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    pub fn row(&self, index: usize) -> Option<&[u64]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Row keyed by packet size: `size % rows`. Always non-empty.
    pub fn row_for_size(&self, size: usize) -> &[u64] {
        &self.rows[size % self.rows.len()]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u64]> {
        self.rows.iter().map(Vec::as_slice)
    }
}
