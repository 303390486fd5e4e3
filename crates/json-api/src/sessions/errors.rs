//! Session Errors

use salvo::http::StatusError;
use tracing::error;

use pcm_app::auth::AuthServiceError;

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        // Unknown emails and bad passwords are indistinguishable to the caller.
        AuthServiceError::NotFound | AuthServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Invalid email or password")
        }
        AuthServiceError::Validation(reason) => StatusError::bad_request().brief(reason),
        other => {
            error!("session request failed: {other}");

            StatusError::internal_server_error()
        }
    }
}
