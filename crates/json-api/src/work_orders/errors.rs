//! Work Order Errors

use salvo::http::StatusError;
use tracing::error;

use pcm_app::domain::work_orders::WorkOrdersServiceError;

pub(crate) fn into_status_error(error: WorkOrdersServiceError) -> StatusError {
    match error {
        WorkOrdersServiceError::AlreadyExists => {
            StatusError::conflict().brief("Work order already exists")
        }
        WorkOrdersServiceError::InvalidReference => {
            StatusError::bad_request().brief("Equipment does not exist")
        }
        WorkOrdersServiceError::MissingRequiredData | WorkOrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid work order payload")
        }
        WorkOrdersServiceError::Validation(reason) => StatusError::bad_request().brief(reason),
        WorkOrdersServiceError::InvalidTransition { from, to } => StatusError::conflict()
            .brief("Invalid status transition")
            .detail(format!("work order cannot move from {from} to {to}")),
        WorkOrdersServiceError::NotFound => {
            StatusError::not_found().brief("Work order not found")
        }
        WorkOrdersServiceError::Sql(source) => {
            error!("work order storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
