//! Equipment Errors

use salvo::http::StatusError;
use tracing::error;

use pcm_app::domain::equipment::EquipmentServiceError;

pub(crate) fn into_status_error(error: EquipmentServiceError) -> StatusError {
    match error {
        EquipmentServiceError::AlreadyExists => {
            StatusError::conflict().brief("Equipment already exists")
        }
        EquipmentServiceError::InvalidReference
        | EquipmentServiceError::MissingRequiredData
        | EquipmentServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid equipment payload")
        }
        EquipmentServiceError::Validation(reason) => StatusError::bad_request().brief(reason),
        EquipmentServiceError::NotFound => StatusError::not_found().brief("Equipment not found"),
        EquipmentServiceError::Sql(source) => {
            error!("equipment storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
