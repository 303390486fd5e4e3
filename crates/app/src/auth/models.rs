//! Auth data models.

use jiff::Timestamp;
use uuid::Uuid;

use crate::{
    auth::SessionTokenVersion,
    domain::companies::records::{CompanyUuid, SubscriptionPlan},
};

/// Session data used during bearer authentication.
#[derive(Debug, Clone)]
pub(crate) struct ActiveSession {
    /// Company the session was issued for.
    pub tenant_uuid: CompanyUuid,

    /// Token format/hash version.
    pub version: SessionTokenVersion,

    /// SHA-256 verifier for the token secret material.
    pub token_hash: String,
}

/// Session metadata persisted in storage.
#[derive(Debug, Clone)]
pub struct SessionMetadata {
    pub uuid: Uuid,
    pub tenant_uuid: CompanyUuid,
    pub version: SessionTokenVersion,
    pub created_at: Timestamp,
    pub last_used_at: Option<Timestamp>,
    pub expires_at: Option<Timestamp>,
    pub revoked_at: Option<Timestamp>,
}

/// New session persistence payload.
#[derive(Debug, Clone)]
pub(crate) struct NewSession {
    pub uuid: Uuid,
    pub tenant_uuid: CompanyUuid,
    pub version: SessionTokenVersion,
    pub token_hash: String,
    pub expires_at: Option<Timestamp>,
}

/// Session issuance result with the one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub metadata: SessionMetadata,
}

/// Company sign-up request.
#[derive(Clone, PartialEq, Eq)]
pub struct Registration {
    pub company_name: String,
    pub manager_email: String,
    pub password: String,
    pub plan: SubscriptionPlan,
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("company_name", &self.company_name)
            .field("manager_email", &self.manager_email)
            .field("password", &"**redacted**")
            .field("plan", &self.plan)
            .finish()
    }
}
