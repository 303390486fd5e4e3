//! Create Equipment Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pcm_app::domain::equipment::{data::NewEquipment, records::EquipmentUuid};

use crate::{
    equipment::{errors::into_status_error, get::EquipmentResponse},
    extensions::*,
    state::State,
    wire::MaintenanceType,
};

/// Create Equipment Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateEquipmentRequest {
    /// Client-chosen identifier; generated when omitted
    #[serde(default)]
    pub uuid: Option<Uuid>,
    pub name: String,
    pub location: String,
    pub maintenance_type: MaintenanceType,
    /// RFC 3339 installation timestamp
    pub installed_at: String,
}

impl TryFrom<CreateEquipmentRequest> for NewEquipment {
    type Error = StatusError;

    fn try_from(request: CreateEquipmentRequest) -> Result<Self, Self::Error> {
        Ok(NewEquipment {
            uuid: request.uuid.map_or_else(EquipmentUuid::new, Into::into),
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

/// Create Equipment Handler
#[endpoint(
    tags("equipment"),
    summary = "Register Equipment",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Equipment created"),
        (status_code = StatusCode::CONFLICT, description = "Equipment already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateEquipmentRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<EquipmentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;

    let equipment = state
        .app
        .equipment
        .create_equipment(tenant, json.into_inner().try_into()?)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/equipment/{}", equipment.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(equipment.into()))
}
