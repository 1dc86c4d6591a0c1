// src/plan/mod.rs
pub mod converter;
pub mod models;
pub mod summary;

pub use converter::{convert, ConversionOutcome, ConvertOptions};
