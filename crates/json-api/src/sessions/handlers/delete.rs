//! Logout Handler

use std::sync::Arc;

use salvo::prelude::*;

use pcm_app::auth::AuthServiceError;

use crate::{
    auth::middleware::extract_bearer_token, extensions::*, sessions::errors::into_status_error,
    state::State,
};

/// Logout Handler
///
/// Revokes the session whose token authenticated this request.
#[endpoint(
    tags("sessions"),
    summary = "Logout",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Session revoked"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;

    let Some(token) = extract_bearer_token(req) else {
        return Err(StatusError::unauthorized().brief("Missing or invalid Authorization header"));
    };

    state.app.auth.logout(token).await.map_err(|error| match error {
        AuthServiceError::NotFound => StatusError::unauthorized().brief("Invalid session token"),
        other => into_status_error(other),
    })?;

    tracing::info!(company_uuid = %tenant, "revoked session");

    res.status_code(StatusCode::NO_CONTENT);

    Ok(())
}
