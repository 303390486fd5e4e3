//! Company Handlers

pub(crate) mod create;
