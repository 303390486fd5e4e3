//! Login Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pcm_app::auth::IssuedSession;

use crate::{extensions::*, sessions::errors::into_status_error, state::State};

/// Login Request
#[derive(Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Session Response
///
/// The token is only ever returned here; store it as a bearer credential.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SessionResponse {
    pub token: String,
    pub session_uuid: Uuid,
    pub company_uuid: Uuid,
    pub expires_at: Option<String>,
}

impl From<IssuedSession> for SessionResponse {
    fn from(session: IssuedSession) -> Self {
        SessionResponse {
            token: session.token,
            session_uuid: session.metadata.uuid,
            company_uuid: session.metadata.tenant_uuid.into(),
            expires_at: session.metadata.expires_at.as_ref().map(ToString::to_string),
        }
    }
}

/// Login Handler
#[endpoint(
    tags("sessions"),
    summary = "Login",
    responses(
        (status_code = StatusCode::CREATED, description = "Session issued"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid email or password"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SessionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let request = json.into_inner();

    let session = state
        .app
        .auth
        .login(&request.email, &request.password)
        .await
        .map_err(into_status_error)?;

    tracing::info!(
        session_uuid = %session.metadata.uuid,
        company_uuid = %session.metadata.tenant_uuid,
        "issued session"
    );

    res.status_code(StatusCode::CREATED);

    Ok(Json(session.into()))
}
