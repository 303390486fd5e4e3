//! Company Data

use crate::domain::companies::records::{CompanyUuid, SubscriptionPlan};

/// New Company Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCompany {
    /// UUID to assign to the company row.
    pub uuid: CompanyUuid,

    /// Company name to persist.
    pub name: String,

    /// Manager email; normalized before it is stored.
    pub manager_email: String,

    /// Subscription tier.
    pub plan: SubscriptionPlan,
}
