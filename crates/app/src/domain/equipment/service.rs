//! Equipment service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::debug;

use crate::{
    database::Db,
    domain::{
        companies::records::CompanyUuid,
        equipment::{
            data::{EquipmentUpdate, NewEquipment},
            errors::EquipmentServiceError,
            records::{EquipmentRecord, EquipmentUuid},
            repository::PgEquipmentRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgEquipmentService {
    db: Db,
    repository: PgEquipmentRepository,
}

impl PgEquipmentService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgEquipmentRepository::new(),
        }
    }
}

#[async_trait]
impl EquipmentService for PgEquipmentService {
    async fn list_equipment(
        &self,
        tenant: CompanyUuid,
        point_in_time: Timestamp,
    ) -> Result<Vec<EquipmentRecord>, EquipmentServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let equipment = self
            .repository
            .list_equipment(&mut tx, point_in_time)
            .await?;

        tx.commit().await?;

        debug!(%tenant, count = equipment.len(), "listed equipment");

        Ok(equipment)
    }

    async fn get_equipment(
        &self,
        tenant: CompanyUuid,
        equipment: EquipmentUuid,
        point_in_time: Timestamp,
    ) -> Result<EquipmentRecord, EquipmentServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let equipment = self
            .repository
            .get_equipment(&mut tx, equipment, point_in_time)
            .await?;

        tx.commit().await?;

        Ok(equipment)
    }

    async fn create_equipment(
        &self,
        tenant: CompanyUuid,
        equipment: NewEquipment,
    ) -> Result<EquipmentRecord, EquipmentServiceError> {
        equipment.validate(Timestamp::now())?;

        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let created = self
            .repository
            .create_equipment(&mut tx, equipment)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_equipment(
        &self,
        tenant: CompanyUuid,
        equipment: EquipmentUuid,
        update: EquipmentUpdate,
    ) -> Result<EquipmentRecord, EquipmentServiceError> {
        update.validate(Timestamp::now())?;

        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let updated = self
            .repository
            .update_equipment(&mut tx, equipment, update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_equipment(
        &self,
        tenant: CompanyUuid,
        equipment: EquipmentUuid,
    ) -> Result<(), EquipmentServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let rows_affected = self.repository.delete_equipment(&mut tx, equipment).await?;

        if rows_affected == 0 {
            return Err(EquipmentServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait EquipmentService: Send + Sync {
    /// Retrieves all equipment that existed at `point_in_time`.
    async fn list_equipment(
        &self,
        tenant: CompanyUuid,
        point_in_time: Timestamp,
    ) -> Result<Vec<EquipmentRecord>, EquipmentServiceError>;

    /// Retrieve a single piece of equipment.
    async fn get_equipment(
        &self,
        tenant: CompanyUuid,
        equipment: EquipmentUuid,
        point_in_time: Timestamp,
    ) -> Result<EquipmentRecord, EquipmentServiceError>;

    /// Registers new equipment.
    async fn create_equipment(
        &self,
        tenant: CompanyUuid,
        equipment: NewEquipment,
    ) -> Result<EquipmentRecord, EquipmentServiceError>;

    /// Replaces the editable fields of a piece of equipment.
    async fn update_equipment(
        &self,
        tenant: CompanyUuid,
        equipment: EquipmentUuid,
        update: EquipmentUpdate,
    ) -> Result<EquipmentRecord, EquipmentServiceError>;

    /// Soft-deletes a piece of equipment.
    async fn delete_equipment(
        &self,
        tenant: CompanyUuid,
        equipment: EquipmentUuid,
    ) -> Result<(), EquipmentServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::{Timestamp, ToSpan};
    use pcm::equipment::MaintenanceType;
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    fn new_equipment(uuid: EquipmentUuid, name: &str) -> Result<NewEquipment, jiff::Error> {
        Ok(NewEquipment {
            uuid,
            name: name.to_string(),
            location: "Hall A".to_string(),
            maintenance_type: MaintenanceType::Preventive,
            installed_at: Timestamp::now().checked_sub(240.hours())?,
        })
    }

    #[tokio::test]
    async fn create_equipment_returns_created_record() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = EquipmentUuid::new();
        let new = new_equipment(uuid, "Compressor A1")?;
        let installed_at = new.installed_at;

        let created = ctx.equipment.create_equipment(ctx.tenant_uuid, new).await?;

        assert_eq!(created.uuid, uuid);
        assert_eq!(created.name, "Compressor A1");
        assert_eq!(created.maintenance_type, MaintenanceType::Preventive);
        assert_eq!(created.installed_at, installed_at);
        assert!(created.deleted_at.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn create_equipment_rejects_future_installation() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .equipment
            .create_equipment(
                ctx.tenant_uuid,
                NewEquipment {
                    installed_at: Timestamp::now().checked_add(48.hours())?,
                    ..new_equipment(EquipmentUuid::new(), "Future")?
                },
            )
            .await;

        assert!(
            matches!(result, Err(EquipmentServiceError::Validation(_))),
            "expected Validation, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_equipment_returns_created_equipment() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid_a = EquipmentUuid::new();
        let uuid_b = EquipmentUuid::new();

        ctx.equipment
            .create_equipment(ctx.tenant_uuid, new_equipment(uuid_a, "Pump")?)
            .await?;
        ctx.equipment
            .create_equipment(ctx.tenant_uuid, new_equipment(uuid_b, "Boiler")?)
            .await?;

        let equipment = ctx
            .equipment
            .list_equipment(ctx.tenant_uuid, Timestamp::now())
            .await?;

        let uuids: Vec<EquipmentUuid> = equipment.iter().map(|item| item.uuid).collect();

        assert_eq!(uuids, [uuid_a, uuid_b]);

        Ok(())
    }

    #[tokio::test]
    async fn update_equipment_replaces_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = EquipmentUuid::new();

        ctx.equipment
            .create_equipment(ctx.tenant_uuid, new_equipment(uuid, "Lathe")?)
            .await?;

        let updated = ctx
            .equipment
            .update_equipment(
                ctx.tenant_uuid,
                uuid,
                EquipmentUpdate {
                    name: "Lathe CNC".to_string(),
                    location: "Hall B".to_string(),
                    maintenance_type: MaintenanceType::Corrective,
                    installed_at: Timestamp::now().checked_sub(24.hours())?,
                },
            )
            .await?;

        assert_eq!(updated.name, "Lathe CNC");
        assert_eq!(updated.location, "Hall B");
        assert_eq!(updated.maintenance_type, MaintenanceType::Corrective);

        Ok(())
    }

    #[tokio::test]
    async fn update_unknown_equipment_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .equipment
            .update_equipment(
                ctx.tenant_uuid,
                EquipmentUuid::new(),
                EquipmentUpdate {
                    name: "Ghost".to_string(),
                    location: String::new(),
                    maintenance_type: MaintenanceType::Preventive,
                    installed_at: Timestamp::now().checked_sub(1.hours())?,
                },
            )
            .await;

        assert!(
            matches!(result, Err(EquipmentServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_equipment_makes_it_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = EquipmentUuid::new();

        ctx.equipment
            .create_equipment(ctx.tenant_uuid, new_equipment(uuid, "Fan")?)
            .await?;

        ctx.equipment.delete_equipment(ctx.tenant_uuid, uuid).await?;

        let result = ctx
            .equipment
            .get_equipment(ctx.tenant_uuid, uuid, Timestamp::now())
            .await;

        assert!(
            matches!(result, Err(EquipmentServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        let again = ctx.equipment.delete_equipment(ctx.tenant_uuid, uuid).await;

        assert!(
            matches!(again, Err(EquipmentServiceError::NotFound)),
            "expected NotFound on second delete, got {again:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn equipment_not_visible_to_other_tenant() -> TestResult {
        let ctx = TestContext::new().await;
        let other = ctx.create_company("Other Co", "other@tenant.com").await;
        let uuid = EquipmentUuid::new();

        ctx.equipment
            .create_equipment(ctx.tenant_uuid, new_equipment(uuid, "Private")?)
            .await?;

        let result = ctx
            .equipment
            .get_equipment(other, uuid, Timestamp::now())
            .await;

        assert!(
            matches!(result, Err(EquipmentServiceError::NotFound)),
            "expected NotFound across tenants, got {result:?}"
        );

        let listed = ctx.equipment.list_equipment(other, Timestamp::now()).await?;

        assert!(listed.is_empty());

        Ok(())
    }
}
