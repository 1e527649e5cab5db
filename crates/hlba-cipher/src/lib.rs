#![no_std]
#![forbid(unsafe_code)]

//! Reversible payload scrambling keyed by a Pascal row.
//!
//! This is obfuscation, not encryption. Anyone holding the (public) table can
//! undo it, and it carries no integrity tag.

extern crate alloc;
use alloc::vec::Vec;
use hlba_core::{HlbaError, HlbaResult, Packet};
use hlba_math::CombinatorialTable;

/// XOR each byte with the low byte of `row[i % row.len()]`. Self-inverse.
pub fn transform_in_place(payload: &mut [u8], row: &[u64]) -> HlbaResult<()> {
    if row.is_empty() {
        return Err(HlbaError::InvalidArgument("obfuscation row must be non-empty"));
    }
    for (byte, key) in payload.iter_mut().zip(row.iter().cycle()) {
        *byte ^= *key as u8;
    }
    Ok(())
}

pub fn transform(payload: &[u8], row: &[u64]) -> HlbaResult<Vec<u8>> {
    let mut out = payload.to_vec();
    transform_in_place(&mut out, row)?;
    Ok(out)
}

pub fn encrypt(payload: &[u8], row: &[u64]) -> HlbaResult<Vec<u8>> {
    transform(payload, row)
}

pub fn decrypt(ciphertext: &[u8], row: &[u64]) -> HlbaResult<Vec<u8>> {
    transform(ciphertext, row)
}

/// Owns the keystream table and picks the row from the packet size.
#[derive(Debug, Clone)]
pub struct Obfuscator {
    table: CombinatorialTable,
}

impl Obfuscator {
    pub fn new(table: CombinatorialTable) -> Self {
        Self { table }
    }

    pub fn with_rows(rows: usize) -> HlbaResult<Self> {
        Ok(Self::new(CombinatorialTable::generate(rows)?))
    }

    pub fn table(&self) -> &CombinatorialTable { &self.table }

    pub fn row_for(&self, packet: &Packet) -> &[u64] {
        self.table.row_for_size(packet.size())
    }

    /// Size is preserved, so the same row is selected on the way back.
    pub fn obfuscate(&self, packet: &Packet) -> HlbaResult<Packet> {
        let scrambled = transform(packet.payload(), self.row_for(packet))?;
        Ok(packet.with_payload(scrambled))
    }

    pub fn reveal(&self, packet: &Packet) -> HlbaResult<Packet> {
        self.obfuscate(packet)
    }
}
