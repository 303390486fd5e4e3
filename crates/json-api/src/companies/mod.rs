//! Companies
//!
//! Self-service sign-up. A company is the tenant every other resource belongs to.

mod errors;
mod handlers;

pub(crate) use handlers::*;
