//! Metrics
//!
//! Tenant-scoped views over the maintenance metrics engine.

pub mod errors;
pub mod service;

pub use errors::MetricsServiceError;
pub use service::*;
