//! Error handling for the loader
//!
//! This module defines all error types used throughout the loader.

mod helpers;
mod types;

pub use types::{LoaderError, Result};
