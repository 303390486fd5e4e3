//! Work Orders Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use pcm::{equipment::MaintenanceType, work_orders::WorkOrderStatus};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::{
    equipment::records::EquipmentUuid,
    work_orders::{
        data::{NewWorkOrder, WorkOrderDetails},
        records::{WorkOrderRecord, WorkOrderUuid},
    },
};

const LIST_WORK_ORDERS_SQL: &str = include_str!("sql/list_work_orders.sql");
const GET_WORK_ORDER_SQL: &str = include_str!("sql/get_work_order.sql");
const LOCK_WORK_ORDER_STATUS_SQL: &str = include_str!("sql/lock_work_order_status.sql");
const FIND_EQUIPMENT_NAME_SQL: &str = include_str!("sql/find_equipment_name.sql");
const CREATE_WORK_ORDER_SQL: &str = include_str!("sql/create_work_order.sql");
const UPDATE_WORK_ORDER_SQL: &str = include_str!("sql/update_work_order.sql");
const DELETE_WORK_ORDER_SQL: &str = include_str!("sql/delete_work_order.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgWorkOrdersRepository;

impl PgWorkOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_work_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        point_in_time: Timestamp,
    ) -> Result<Vec<WorkOrderRecord>, sqlx::Error> {
        query_as::<Postgres, WorkOrderRecord>(LIST_WORK_ORDERS_SQL)
            .bind(SqlxTimestamp::from(point_in_time))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_work_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        work_order: WorkOrderUuid,
        point_in_time: Timestamp,
    ) -> Result<WorkOrderRecord, sqlx::Error> {
        query_as::<Postgres, WorkOrderRecord>(GET_WORK_ORDER_SQL)
            .bind(work_order.into_uuid())
            .bind(SqlxTimestamp::from(point_in_time))
            .fetch_one(&mut **tx)
            .await
    }

    /// Current status of a live order, locked until the transaction ends.
    pub(crate) async fn lock_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        work_order: WorkOrderUuid,
    ) -> Result<WorkOrderStatus, sqlx::Error> {
        let status = query_scalar::<Postgres, String>(LOCK_WORK_ORDER_STATUS_SQL)
            .bind(work_order.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        decode_status(&status)
    }

    /// Name of live equipment visible to the current tenant.
    pub(crate) async fn find_equipment_name(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        equipment: EquipmentUuid,
    ) -> Result<Option<String>, sqlx::Error> {
        query_scalar::<Postgres, String>(FIND_EQUIPMENT_NAME_SQL)
            .bind(equipment.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_work_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        work_order: NewWorkOrder,
        equipment_name: String,
    ) -> Result<WorkOrderRecord, sqlx::Error> {
        let details = work_order.details;

        query_as::<Postgres, WorkOrderRecord>(CREATE_WORK_ORDER_SQL)
            .bind(work_order.uuid.into_uuid())
            .bind(details.equipment_uuid.into_uuid())
            .bind(equipment_name)
            .bind(details.technician_name)
            .bind(details.technician_tax_id)
            .bind(SqlxTimestamp::from(details.opened_at))
            .bind(details.completed_at.map(SqlxTimestamp::from))
            .bind(details.maintenance_type.as_str())
            .bind(details.downtime_hours)
            .bind(details.status.as_str())
            .bind(details.notes)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_work_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        work_order: WorkOrderUuid,
        details: WorkOrderDetails,
        equipment_name: String,
    ) -> Result<WorkOrderRecord, sqlx::Error> {
        query_as::<Postgres, WorkOrderRecord>(UPDATE_WORK_ORDER_SQL)
            .bind(work_order.into_uuid())
            .bind(details.equipment_uuid.into_uuid())
            .bind(equipment_name)
            .bind(details.technician_name)
            .bind(details.technician_tax_id)
            .bind(SqlxTimestamp::from(details.opened_at))
            .bind(details.completed_at.map(SqlxTimestamp::from))
            .bind(details.maintenance_type.as_str())
            .bind(details.downtime_hours)
            .bind(details.status.as_str())
            .bind(details.notes)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_work_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        work_order: WorkOrderUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_WORK_ORDER_SQL)
            .bind(work_order.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

fn decode_status(status: &str) -> Result<WorkOrderStatus, sqlx::Error> {
    status
        .parse::<WorkOrderStatus>()
        .map_err(|error| sqlx::Error::ColumnDecode {
            index: "status".to_string(),
            source: Box::new(error),
        })
}

impl<'r> FromRow<'r, PgRow> for WorkOrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let maintenance_type: String = row.try_get("maintenance_type")?;
        let status: String = row.try_get("status")?;

        Ok(Self {
            uuid: WorkOrderUuid::from_uuid(row.try_get("uuid")?),
            equipment_uuid: EquipmentUuid::from_uuid(row.try_get("equipment_uuid")?),
            equipment_name: row.try_get("equipment_name")?,
            technician_name: row.try_get("technician_name")?,
            technician_tax_id: row.try_get("technician_tax_id")?,
            opened_at: row.try_get::<SqlxTimestamp, _>("opened_at")?.to_jiff(),
            completed_at: row
                .try_get::<Option<SqlxTimestamp>, _>("completed_at")?
                .map(SqlxTimestamp::to_jiff),
            maintenance_type: maintenance_type.parse::<MaintenanceType>().map_err(|error| {
                sqlx::Error::ColumnDecode {
                    index: "maintenance_type".to_string(),
                    source: Box::new(error),
                }
            })?,
            downtime_hours: row.try_get("downtime_hours")?,
            status: decode_status(&status)?,
            notes: row.try_get("notes")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
