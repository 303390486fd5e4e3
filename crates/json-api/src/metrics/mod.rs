//! Metrics
//!
//! Read-only views computed from the company's equipment and work orders.

mod errors;
mod handlers;
mod responses;

pub(crate) use handlers::*;
