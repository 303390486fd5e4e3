//! Create Work Order Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pcm_app::domain::work_orders::{data::NewWorkOrder, records::WorkOrderUuid};

use crate::{
    extensions::*,
    state::State,
    work_orders::{WorkOrderDetailsRequest, errors::into_status_error, get::WorkOrderResponse},
};

/// Create Work Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateWorkOrderRequest {
    /// Client-chosen identifier; generated when omitted
    #[serde(default)]
    pub uuid: Option<Uuid>,

    #[serde(flatten)]
    pub details: WorkOrderDetailsRequest,
}

impl TryFrom<CreateWorkOrderRequest> for NewWorkOrder {
    type Error = StatusError;

    fn try_from(request: CreateWorkOrderRequest) -> Result<Self, Self::Error> {
        Ok(NewWorkOrder {
            uuid: request.uuid.map_or_else(WorkOrderUuid::new, Into::into),
            details: request.details.try_into()?,
        })
    }
}

/// Create Work Order Handler
#[endpoint(
    tags("work-orders"),
    summary = "Open Work Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Work order created"),
        (status_code = StatusCode::CONFLICT, description = "Work order already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateWorkOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<WorkOrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;

    let work_order = state
        .app
        .work_orders
        .create_work_order(tenant, json.into_inner().try_into()?)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/work-orders/{}", work_order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(work_order.into()))
}
