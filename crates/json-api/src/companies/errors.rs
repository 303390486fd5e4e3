//! Company Errors

use salvo::http::StatusError;
use tracing::error;

use pcm_app::auth::AuthServiceError;

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::AlreadyRegistered => {
            StatusError::conflict().brief("A company is already registered for this email")
        }
        AuthServiceError::Validation(reason) => StatusError::bad_request().brief(reason),
        AuthServiceError::InvalidCredentials => {
            StatusError::bad_request().brief("Invalid email or password")
        }
        other => {
            error!("failed to register company: {other}");

            StatusError::internal_server_error()
        }
    }
}
