//! Work Order Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, state::State, work_orders::get::WorkOrderResponse};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WorkOrdersResponse {
    /// Work orders, oldest first
    pub work_orders: Vec<WorkOrderResponse>,
}

/// Work Order Index Handler
///
/// Returns the company's work orders.
#[endpoint(
    tags("work-orders"),
    summary = "List Work Orders",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<WorkOrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;
    let point_in_time = at.into_point_in_time()?;

    let work_orders = state
        .app
        .work_orders
        .list_work_orders(tenant, point_in_time)
        .await
        .or_500("failed to fetch work orders")?;

    Ok(Json(WorkOrdersResponse {
        work_orders: work_orders.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use pcm_app::domain::{
        equipment::records::EquipmentUuid,
        work_orders::{MockWorkOrdersService, records::WorkOrderUuid},
    };

    use crate::test_helpers::{Mocks, TEST_TENANT_UUID, tenant_service};

    use super::{super::tests::make_work_order, *};

    fn make_service(work_orders: MockWorkOrdersService) -> Service {
        tenant_service(
            Mocks::with_work_orders(work_orders),
            Router::with_path("work-orders").get(handler),
        )
    }

    #[tokio::test]
    async fn test_index_returns_work_orders() -> TestResult {
        let equipment = EquipmentUuid::new();
        let first = WorkOrderUuid::new();
        let second = WorkOrderUuid::new();

        let mut work_orders = MockWorkOrdersService::new();

        work_orders
            .expect_list_work_orders()
            .once()
            .withf(|tenant, _| *tenant == TEST_TENANT_UUID)
            .return_once(move |_, _| {
                Ok(vec![
                    make_work_order(first, equipment),
                    make_work_order(second, equipment),
                ])
            });

        work_orders.expect_get_work_order().never();
        work_orders.expect_create_work_order().never();
        work_orders.expect_update_work_order().never();
        work_orders.expect_delete_work_order().never();

        let response: WorkOrdersResponse = TestClient::get("http://example.com/work-orders")
            .send(&make_service(work_orders))
            .await
            .take_json()
            .await?;

        let uuids: Vec<_> = response.work_orders.iter().map(|o| o.uuid).collect();

        assert_eq!(uuids, vec![first.into_uuid(), second.into_uuid()]);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_forwards_point_in_time_query_param() -> TestResult {
        let at: Timestamp = "2025-06-15T12:00:00Z".parse()?;

        let mut work_orders = MockWorkOrdersService::new();

        work_orders
            .expect_list_work_orders()
            .once()
            .withf(move |tenant, point_in_time| *tenant == TEST_TENANT_UUID && *point_in_time == at)
            .return_once(|_, _| Ok(vec![]));

        let res = TestClient::get("http://example.com/work-orders?at=2025-06-15T12:00:00Z")
            .send(&make_service(work_orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
