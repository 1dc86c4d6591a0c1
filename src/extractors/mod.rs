// src/extractors/mod.rs
pub mod test_plan;

// Re-export key extraction types for convenience
pub use test_plan::TestPlanExtractor;
