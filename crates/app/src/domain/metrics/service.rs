//! Metrics service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use pcm::{
    equipment::Equipment,
    fleet::FleetStats,
    health::FleetHealth,
    policy::MaintenancePolicy,
    report::MaintenanceReport,
    technicians::{TechnicianSummary, summarize_technicians},
    work_orders::WorkOrder,
};
use tracing::debug;

use crate::domain::{
    companies::records::CompanyUuid, equipment::EquipmentService,
    metrics::errors::MetricsServiceError, work_orders::WorkOrdersService,
};

/// Computes metrics from the equipment and work orders held by the record services.
#[derive(Clone)]
pub struct StoreMetricsService {
    equipment: Arc<dyn EquipmentService>,
    work_orders: Arc<dyn WorkOrdersService>,
    policy: MaintenancePolicy,
}

impl StoreMetricsService {
    #[must_use]
    pub fn new(
        equipment: Arc<dyn EquipmentService>,
        work_orders: Arc<dyn WorkOrdersService>,
        policy: MaintenancePolicy,
    ) -> Self {
        Self {
            equipment,
            work_orders,
            policy,
        }
    }

    async fn load_work_orders(
        &self,
        tenant: CompanyUuid,
        point_in_time: Timestamp,
    ) -> Result<Vec<WorkOrder>, MetricsServiceError> {
        let records = self
            .work_orders
            .list_work_orders(tenant, point_in_time)
            .await?;

        Ok(records.iter().map(WorkOrder::from).collect())
    }

    /// Both collections as they stood at `point_in_time`, fetched concurrently.
    async fn snapshot(
        &self,
        tenant: CompanyUuid,
        point_in_time: Timestamp,
    ) -> Result<(Vec<Equipment>, Vec<WorkOrder>), MetricsServiceError> {
        let (equipment, work_orders) = tokio::try_join!(
            async {
                self.equipment
                    .list_equipment(tenant, point_in_time)
                    .await
                    .map_err(MetricsServiceError::from)
            },
            self.load_work_orders(tenant, point_in_time),
        )?;

        let equipment: Vec<Equipment> = equipment.iter().map(Equipment::from).collect();

        debug!(
            %tenant,
            equipment = equipment.len(),
            work_orders = work_orders.len(),
            "loaded metrics snapshot"
        );

        Ok((equipment, work_orders))
    }
}

impl std::fmt::Debug for StoreMetricsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreMetricsService")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl MetricsService for StoreMetricsService {
    async fn equipment_health(
        &self,
        tenant: CompanyUuid,
        point_in_time: Timestamp,
    ) -> Result<FleetHealth, MetricsServiceError> {
        let (equipment, work_orders) = self.snapshot(tenant, point_in_time).await?;

        Ok(FleetHealth::evaluate(
            &equipment,
            &work_orders,
            point_in_time,
            &self.policy,
        ))
    }

    async fn fleet_stats(
        &self,
        tenant: CompanyUuid,
        point_in_time: Timestamp,
    ) -> Result<FleetStats, MetricsServiceError> {
        let (equipment, work_orders) = self.snapshot(tenant, point_in_time).await?;

        Ok(FleetStats::compute(
            equipment.len(),
            &work_orders,
            point_in_time,
            &self.policy,
        ))
    }

    async fn technicians(
        &self,
        tenant: CompanyUuid,
        point_in_time: Timestamp,
    ) -> Result<Vec<TechnicianSummary>, MetricsServiceError> {
        let work_orders = self.load_work_orders(tenant, point_in_time).await?;

        Ok(summarize_technicians(&work_orders, point_in_time))
    }

    async fn report(
        &self,
        tenant: CompanyUuid,
        point_in_time: Timestamp,
    ) -> Result<MaintenanceReport, MetricsServiceError> {
        let (equipment, work_orders) = self.snapshot(tenant, point_in_time).await?;

        Ok(MaintenanceReport::compute(
            &equipment,
            &work_orders,
            point_in_time,
            &self.policy,
        ))
    }
}

#[automock]
#[async_trait]
pub trait MetricsService: Send + Sync {
    /// Health of every piece of equipment and the fleet score.
    async fn equipment_health(
        &self,
        tenant: CompanyUuid,
        point_in_time: Timestamp,
    ) -> Result<FleetHealth, MetricsServiceError>;

    /// Dashboard counters.
    async fn fleet_stats(
        &self,
        tenant: CompanyUuid,
        point_in_time: Timestamp,
    ) -> Result<FleetStats, MetricsServiceError>;

    /// Per-technician workload.
    async fn technicians(
        &self,
        tenant: CompanyUuid,
        point_in_time: Timestamp,
    ) -> Result<Vec<TechnicianSummary>, MetricsServiceError>;

    /// Everything above plus failure ranking and reliability.
    async fn report(
        &self,
        tenant: CompanyUuid,
        point_in_time: Timestamp,
    ) -> Result<MaintenanceReport, MetricsServiceError>;
}
