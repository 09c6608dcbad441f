//! Utility modules for the credential loader
//!
//! - **error**: Error types and classification
//! - **logging**: Tracing subscriber setup
//! - **net**: Shared HTTP client construction

pub mod error;
pub mod logging;
pub mod net;
