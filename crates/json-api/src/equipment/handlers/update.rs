//! Update Equipment Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pcm_app::domain::equipment::data::EquipmentUpdate;

use crate::{
    equipment::{errors::into_status_error, get::EquipmentResponse},
    extensions::*,
    state::State,
    wire::MaintenanceType,
};

/// Update Equipment Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateEquipmentRequest {
    pub name: String,
    pub location: String,
    pub maintenance_type: MaintenanceType,
    /// RFC 3339 installation timestamp
    pub installed_at: String,
}

impl TryFrom<UpdateEquipmentRequest> for EquipmentUpdate {
    type Error = StatusError;

    fn try_from(request: UpdateEquipmentRequest) -> Result<Self, Self::Error> {
        Ok(EquipmentUpdate {
            name: request.name,
            location: request.location,
            maintenance_type: request.maintenance_type.into(),
            installed_at: request
                .installed_at
                .parse::<Timestamp>()
                .or_400("could not parse \"installed_at\"")?,
        })
    }
}

/// Equipment Update Handler
#[endpoint(
    tags("equipment"),
    summary = "Update Equipment",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Equipment updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Equipment not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "equipment.update",
    skip(equipment, json, depot),
    fields(tenant_uuid = tracing::field::Empty, equipment_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    equipment: PathParam<Uuid>,
    json: JsonBody<UpdateEquipmentRequest>,
    depot: &mut Depot,
) -> Result<Json<EquipmentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;
    let equipment = equipment.into_inner();

    let span = tracing::Span::current();

    span.record("tenant_uuid", tracing::field::display(tenant));
    span.record("equipment_uuid", tracing::field::display(equipment));

    let updated = state
        .app
        .equipment
        .update_equipment(tenant, equipment.into(), json.into_inner().try_into()?)
        .await
        .map_err(into_status_error)?;

    tracing::info!(equipment_uuid = %equipment, "updated equipment");

    Ok(Json(updated.into()))
}
