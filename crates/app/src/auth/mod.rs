//! Authentication
//!
//! Company registration and login against the hosted identity provider, and the
//! bearer session tokens issued afterwards.

mod errors;
pub mod identity;
mod models;
mod repository;
mod service;
mod token;

pub use errors::*;
pub use identity::{
    IdentityAccount, IdentityClient, IdentityConfig, IdentityError, IdentityProvider,
    MockIdentityProvider,
};
pub use models::*;
pub use repository::PgAuthRepository;
pub use service::*;
pub use token::*;
