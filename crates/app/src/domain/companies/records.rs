//! Company Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::uuids::TypedUuid;

/// Company UUID, also the tenant identifier.
pub type CompanyUuid = TypedUuid<CompanyRecord>;

/// Subscription tier chosen at registration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionPlan {
    /// Entry tier.
    #[default]
    Basic,

    /// Mid tier.
    Professional,

    /// Top tier.
    Enterprise,
}

impl SubscriptionPlan {
    /// Storage name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Professional => "professional",
            Self::Enterprise => "enterprise",
        }
    }
}

impl fmt::Display for SubscriptionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown plan name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown subscription plan: {0}")]
pub struct UnknownSubscriptionPlan(pub String);

impl FromStr for SubscriptionPlan {
    type Err = UnknownSubscriptionPlan;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "basic" => Ok(Self::Basic),
            "professional" => Ok(Self::Professional),
            "enterprise" => Ok(Self::Enterprise),
            other => Err(UnknownSubscriptionPlan(other.to_string())),
        }
    }
}

/// Company Record
#[derive(Debug, Clone)]
pub struct CompanyRecord {
    /// Unique company identifier.
    pub uuid: CompanyUuid,

    /// Company display name.
    pub name: String,

    /// Manager login email, stored lower-cased.
    pub manager_email: String,

    /// Subscription tier.
    pub plan: SubscriptionPlan,

    /// Creation timestamp.
    pub created_at: Timestamp,

    /// Last update timestamp.
    pub updated_at: Timestamp,

    /// Soft-delete timestamp when deleted.
    pub deleted_at: Option<Timestamp>,
}

/// Normalize an email address for storage and lookup.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
