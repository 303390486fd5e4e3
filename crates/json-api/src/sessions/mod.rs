//! Sessions
//!
//! Login issues an opaque bearer token; logout revokes the presented one.

mod errors;
mod handlers;

pub(crate) use handlers::*;
