//! Work orders service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        companies::records::CompanyUuid,
        work_orders::{
            data::{NewWorkOrder, WorkOrderDetails},
            errors::WorkOrdersServiceError,
            records::{WorkOrderRecord, WorkOrderUuid},
            repository::PgWorkOrdersRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgWorkOrdersService {
    db: Db,
    repository: PgWorkOrdersRepository,
}

impl PgWorkOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgWorkOrdersRepository::new(),
        }
    }
}

#[async_trait]
impl WorkOrdersService for PgWorkOrdersService {
    async fn list_work_orders(
        &self,
        tenant: CompanyUuid,
        point_in_time: Timestamp,
    ) -> Result<Vec<WorkOrderRecord>, WorkOrdersServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let work_orders = self
            .repository
            .list_work_orders(&mut tx, point_in_time)
            .await?;

        tx.commit().await?;

        Ok(work_orders)
    }

    async fn get_work_order(
        &self,
        tenant: CompanyUuid,
        work_order: WorkOrderUuid,
        point_in_time: Timestamp,
    ) -> Result<WorkOrderRecord, WorkOrdersServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let work_order = self
            .repository
            .get_work_order(&mut tx, work_order, point_in_time)
            .await?;

        tx.commit().await?;

        Ok(work_order)
    }

    async fn create_work_order(
        &self,
        tenant: CompanyUuid,
        work_order: NewWorkOrder,
    ) -> Result<WorkOrderRecord, WorkOrdersServiceError> {
        work_order.details.validate()?;

        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let equipment_name = self
            .repository
            .find_equipment_name(&mut tx, work_order.details.equipment_uuid)
            .await?
            .ok_or(WorkOrdersServiceError::InvalidReference)?;

        let created = self
            .repository
            .create_work_order(&mut tx, work_order, equipment_name)
            .await?;

        tx.commit().await?;

        info!(
            %tenant,
            work_order = %created.uuid,
            status = %created.status,
            "work order opened"
        );

        Ok(created)
    }

    async fn update_work_order(
        &self,
        tenant: CompanyUuid,
        work_order: WorkOrderUuid,
        details: WorkOrderDetails,
    ) -> Result<WorkOrderRecord, WorkOrdersServiceError> {
        details.validate()?;

        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let current = self.repository.lock_status(&mut tx, work_order).await?;

        if !current.can_transition_to(details.status) {
            return Err(WorkOrdersServiceError::InvalidTransition {
                from: current,
                to: details.status,
            });
        }

        let equipment_name = self
            .repository
            .find_equipment_name(&mut tx, details.equipment_uuid)
            .await?
            .ok_or(WorkOrdersServiceError::InvalidReference)?;

        let updated = self
            .repository
            .update_work_order(&mut tx, work_order, details, equipment_name)
            .await?;

        tx.commit().await?;

        if current != updated.status {
            info!(
                %tenant,
                work_order = %updated.uuid,
                from = %current,
                to = %updated.status,
                "work order status changed"
            );
        }

        Ok(updated)
    }

    async fn delete_work_order(
        &self,
        tenant: CompanyUuid,
        work_order: WorkOrderUuid,
    ) -> Result<(), WorkOrdersServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let rows_affected = self
            .repository
            .delete_work_order(&mut tx, work_order)
            .await?;

        if rows_affected == 0 {
            return Err(WorkOrdersServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait WorkOrdersService: Send + Sync {
    /// Retrieves all work orders that existed at `point_in_time`, oldest first.
    async fn list_work_orders(
        &self,
        tenant: CompanyUuid,
        point_in_time: Timestamp,
    ) -> Result<Vec<WorkOrderRecord>, WorkOrdersServiceError>;

    /// Retrieve a single work order.
    async fn get_work_order(
        &self,
        tenant: CompanyUuid,
        work_order: WorkOrderUuid,
        point_in_time: Timestamp,
    ) -> Result<WorkOrderRecord, WorkOrdersServiceError>;

    /// Opens a work order against existing equipment.
    ///
    /// The stored equipment name is copied from the equipment row.
    async fn create_work_order(
        &self,
        tenant: CompanyUuid,
        work_order: NewWorkOrder,
    ) -> Result<WorkOrderRecord, WorkOrdersServiceError>;

    /// Replaces a work order's fields, enforcing the status lifecycle.
    async fn update_work_order(
        &self,
        tenant: CompanyUuid,
        work_order: WorkOrderUuid,
        details: WorkOrderDetails,
    ) -> Result<WorkOrderRecord, WorkOrdersServiceError>;

    /// Soft-deletes a work order.
    async fn delete_work_order(
        &self,
        tenant: CompanyUuid,
        work_order: WorkOrderUuid,
    ) -> Result<(), WorkOrdersServiceError>;
}
