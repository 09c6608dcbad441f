//! Network utilities
//!
//! This module provides HTTP client construction for talking to the agent.

pub mod http;

pub use http::{HttpClientConfig, create_client};
