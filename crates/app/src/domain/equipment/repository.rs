//! Equipment Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use pcm::equipment::MaintenanceType;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::equipment::{
    data::{EquipmentUpdate, NewEquipment},
    records::{EquipmentRecord, EquipmentUuid},
};

const LIST_EQUIPMENT_SQL: &str = include_str!("sql/list_equipment.sql");
const GET_EQUIPMENT_SQL: &str = include_str!("sql/get_equipment.sql");
const CREATE_EQUIPMENT_SQL: &str = include_str!("sql/create_equipment.sql");
const UPDATE_EQUIPMENT_SQL: &str = include_str!("sql/update_equipment.sql");
const DELETE_EQUIPMENT_SQL: &str = include_str!("sql/delete_equipment.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgEquipmentRepository;

impl PgEquipmentRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_equipment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        point_in_time: Timestamp,
    ) -> Result<Vec<EquipmentRecord>, sqlx::Error> {
        query_as::<Postgres, EquipmentRecord>(LIST_EQUIPMENT_SQL)
            .bind(SqlxTimestamp::from(point_in_time))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_equipment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        equipment: EquipmentUuid,
        point_in_time: Timestamp,
    ) -> Result<EquipmentRecord, sqlx::Error> {
        query_as::<Postgres, EquipmentRecord>(GET_EQUIPMENT_SQL)
            .bind(equipment.into_uuid())
            .bind(SqlxTimestamp::from(point_in_time))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_equipment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        equipment: NewEquipment,
    ) -> Result<EquipmentRecord, sqlx::Error> {
        query_as::<Postgres, EquipmentRecord>(CREATE_EQUIPMENT_SQL)
            .bind(equipment.uuid.into_uuid())
            .bind(equipment.name)
            .bind(equipment.location)
            .bind(equipment.maintenance_type.as_str())
            .bind(SqlxTimestamp::from(equipment.installed_at))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_equipment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        equipment: EquipmentUuid,
        update: EquipmentUpdate,
    ) -> Result<EquipmentRecord, sqlx::Error> {
        query_as::<Postgres, EquipmentRecord>(UPDATE_EQUIPMENT_SQL)
            .bind(equipment.into_uuid())
            .bind(update.name)
            .bind(update.location)
            .bind(update.maintenance_type.as_str())
            .bind(SqlxTimestamp::from(update.installed_at))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_equipment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        equipment: EquipmentUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_EQUIPMENT_SQL)
            .bind(equipment.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for EquipmentRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let maintenance_type: String = row.try_get("maintenance_type")?;

        Ok(Self {
            uuid: EquipmentUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            location: row.try_get("location")?,
            maintenance_type: maintenance_type.parse::<MaintenanceType>().map_err(|error| {
                sqlx::Error::ColumnDecode {
                    index: "maintenance_type".to_string(),
                    source: Box::new(error),
                }
            })?,
            installed_at: row.try_get::<SqlxTimestamp, _>("installed_at")?.to_jiff(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
