//! Core loader functionality
//!
//! - **partition**: line-aligned byte ranges of input files
//! - **checkpoint** / **bad_records**: persisted per-range progress and failures
//! - **issuer**: the agent behind a trait
//! - **batch** / **range**: submitting batches and processing one range
//! - **runner** / **splitter**: whole runs and offline splitting

pub mod bad_records;
pub mod batch;
pub mod checkpoint;
pub mod credential;
pub mod issuer;
pub mod partition;
pub mod range;
pub mod runner;
pub mod splitter;
