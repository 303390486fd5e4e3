//! Metrics Errors

use salvo::http::StatusError;
use tracing::error;

use pcm_app::domain::metrics::MetricsServiceError;

pub(crate) fn into_status_error(error: MetricsServiceError) -> StatusError {
    match &error {
        MetricsServiceError::Equipment(source) => {
            error!("{error}: {source}");
        }
        MetricsServiceError::WorkOrders(source) => {
            error!("{error}: {source}");
        }
    }

    StatusError::internal_server_error()
}
