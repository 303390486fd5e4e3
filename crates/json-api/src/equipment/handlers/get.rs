//! Get Equipment Handler

use std::{string::ToString, sync::Arc};

use salvo::{
    oapi::{
        ToSchema,
        extract::{PathParam, QueryParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pcm_app::domain::equipment::records::EquipmentRecord;

use crate::{
    equipment::errors::into_status_error, extensions::*, state::State, wire::MaintenanceType,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct EquipmentResponse {
    /// The unique identifier of the equipment
    pub uuid: Uuid,

    /// Display name
    pub name: String,

    /// Where the equipment is installed
    pub location: String,

    /// Maintenance regime the equipment follows
    pub maintenance_type: MaintenanceType,

    /// The date and time the equipment was installed
    pub installed_at: String,

    /// The date and time the equipment was registered
    pub created_at: String,

    /// The date and time the equipment was last updated
    pub updated_at: String,

    /// The date and time the equipment was deleted
    pub deleted_at: Option<String>,
}

impl From<EquipmentRecord> for EquipmentResponse {
    fn from(equipment: EquipmentRecord) -> Self {
        EquipmentResponse {
            uuid: equipment.uuid.into(),
            name: equipment.name,
            location: equipment.location,
            maintenance_type: equipment.maintenance_type.into(),
            installed_at: equipment.installed_at.to_string(),
            created_at: equipment.created_at.to_string(),
            updated_at: equipment.updated_at.to_string(),
            deleted_at: equipment.deleted_at.as_ref().map(ToString::to_string),
        }
    }
}

/// Get Equipment Handler
///
/// Returns a single piece of equipment.
#[endpoint(
    tags("equipment"),
    summary = "Get Equipment",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Equipment found"),
        (status_code = StatusCode::NOT_FOUND, description = "Equipment not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    equipment: PathParam<Uuid>,
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<EquipmentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;
    let point_in_time = at.into_point_in_time()?;

    let equipment = state
        .app
        .equipment
        .get_equipment(tenant, equipment.into_inner().into(), point_in_time)
        .await
        .map_err(into_status_error)?;

    Ok(Json(equipment.into()))
}
