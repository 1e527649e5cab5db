#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod tables;
pub use tables::CombinatorialTable;
