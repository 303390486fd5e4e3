//! Companies
//!
//! A company is the tenant every other record belongs to.

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::CompaniesServiceError;
pub use service::*;
