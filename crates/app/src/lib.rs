//! PCM application services: companies, equipment, work orders, metrics and
//! authentication on top of `PostgreSQL` with row-level security.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;

#[cfg(test)]
mod test;

mod uuids;

pub use uuids::TypedUuid;
