//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use pcm_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        companies::{MockCompaniesService, records::CompanyUuid},
        equipment::MockEquipmentService,
        metrics::MockMetricsService,
        work_orders::MockWorkOrdersService,
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_TENANT_UUID: CompanyUuid = CompanyUuid::from_uuid(Uuid::nil());

#[salvo::handler]
pub(crate) async fn inject_tenant(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_tenant_uuid(TEST_TENANT_UUID);
    ctrl.call_next(req, depot, res).await;
}

/// Service mocks backing a test [`State`].
///
/// A mock with no expectations fails the test on any call.
#[derive(Default)]
pub(crate) struct Mocks {
    pub(crate) companies: MockCompaniesService,
    pub(crate) equipment: MockEquipmentService,
    pub(crate) work_orders: MockWorkOrdersService,
    pub(crate) metrics: MockMetricsService,
    pub(crate) auth: MockAuthService,
}

impl Mocks {
    pub(crate) fn with_auth(auth: MockAuthService) -> Self {
        Self {
            auth,
            ..Self::default()
        }
    }

    pub(crate) fn with_equipment(equipment: MockEquipmentService) -> Self {
        Self {
            equipment,
            ..Self::default()
        }
    }

    pub(crate) fn with_work_orders(work_orders: MockWorkOrdersService) -> Self {
        Self {
            work_orders,
            ..Self::default()
        }
    }

    pub(crate) fn with_metrics(metrics: MockMetricsService) -> Self {
        Self {
            metrics,
            ..Self::default()
        }
    }

    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            companies: Arc::new(self.companies),
            equipment: Arc::new(self.equipment),
            work_orders: Arc::new(self.work_orders),
            metrics: Arc::new(self.metrics),
            auth: Arc::new(self.auth),
        })
    }
}

/// Serve `route` with the mocks injected and the test tenant authenticated.
pub(crate) fn tenant_service(mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .hoop(inject_tenant)
            .push(route),
    )
}

/// Serve `route` with the mocks injected and no tenant.
pub(crate) fn public_service(mocks: Mocks, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(mocks.into_state())).push(route))
}
