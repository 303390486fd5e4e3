//! Update Work Order Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    extensions::*,
    state::State,
    work_orders::{WorkOrderDetailsRequest, errors::into_status_error, get::WorkOrderResponse},
};

/// Work Order Update Handler
///
/// Replaces the editable fields. Status changes must follow the work order lifecycle.
#[endpoint(
    tags("work-orders"),
    summary = "Update Work Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Work order updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Work order not found"),
        (status_code = StatusCode::CONFLICT, description = "Invalid status transition"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "work_orders.update",
    skip(work_order, json, depot),
    fields(tenant_uuid = tracing::field::Empty, work_order_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    work_order: PathParam<Uuid>,
    json: JsonBody<WorkOrderDetailsRequest>,
    depot: &mut Depot,
) -> Result<Json<WorkOrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;
    let work_order = work_order.into_inner();

    let span = tracing::Span::current();

    span.record("tenant_uuid", tracing::field::display(tenant));
    span.record("work_order_uuid", tracing::field::display(work_order));

    let updated = state
        .app
        .work_orders
        .update_work_order(tenant, work_order.into(), json.into_inner().try_into()?)
        .await
        .map_err(into_status_error)?;

    tracing::info!(work_order_uuid = %work_order, status = %updated.status, "updated work order");

    Ok(Json(updated.into()))
}
