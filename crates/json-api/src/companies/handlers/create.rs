//! Register Company Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pcm_app::{auth::Registration, domain::companies::records::CompanyRecord};

use crate::{
    companies::errors::into_status_error, extensions::*, state::State, wire::SubscriptionPlan,
};

/// Register Company Request
#[derive(Deserialize, ToSchema)]
pub(crate) struct RegisterCompanyRequest {
    pub company_name: String,
    /// Login email of the company manager
    pub manager_email: String,
    pub password: String,
    #[serde(default)]
    pub plan: SubscriptionPlan,
}

impl std::fmt::Debug for RegisterCompanyRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterCompanyRequest")
            .field("company_name", &self.company_name)
            .field("manager_email", &self.manager_email)
            .field("plan", &self.plan)
            .finish_non_exhaustive()
    }
}

impl From<RegisterCompanyRequest> for Registration {
    fn from(request: RegisterCompanyRequest) -> Self {
        Registration {
            company_name: request.company_name,
            manager_email: request.manager_email,
            password: request.password,
            plan: request.plan.into(),
        }
    }
}

/// Company Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CompanyResponse {
    pub uuid: Uuid,
    pub name: String,
    pub manager_email: String,
    pub plan: SubscriptionPlan,
    pub created_at: String,
}

impl From<CompanyRecord> for CompanyResponse {
    fn from(company: CompanyRecord) -> Self {
        CompanyResponse {
            uuid: company.uuid.into(),
            name: company.name,
            manager_email: company.manager_email,
            plan: company.plan.into(),
            created_at: company.created_at.to_string(),
        }
    }
}

/// Register Company Handler
///
/// Creates the manager's identity account and the company it manages.
#[endpoint(
    tags("companies"),
    summary = "Register Company",
    responses(
        (status_code = StatusCode::CREATED, description = "Company registered"),
        (status_code = StatusCode::CONFLICT, description = "Email already registered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterCompanyRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CompanyResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let company = state
        .app
        .auth
        .register(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(company_uuid = %company.uuid, "registered company");

    res.status_code(StatusCode::CREATED);

    Ok(Json(company.into()))
}
