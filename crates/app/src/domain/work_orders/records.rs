//! Work Order Records

use jiff::Timestamp;
use pcm::{
    equipment::MaintenanceType,
    work_orders::{Technician, WorkOrder, WorkOrderStatus},
};

use crate::{domain::equipment::records::EquipmentUuid, uuids::TypedUuid};

/// Work Order UUID
pub type WorkOrderUuid = TypedUuid<WorkOrderRecord>;

/// Work Order Record
#[derive(Debug, Clone)]
pub struct WorkOrderRecord {
    pub uuid: WorkOrderUuid,
    pub equipment_uuid: EquipmentUuid,
    pub equipment_name: String,
    pub technician_name: String,
    pub technician_tax_id: String,
    pub opened_at: Timestamp,
    pub completed_at: Option<Timestamp>,
    pub maintenance_type: MaintenanceType,
    pub downtime_hours: f64,
    pub status: WorkOrderStatus,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

impl From<&WorkOrderRecord> for WorkOrder {
    fn from(record: &WorkOrderRecord) -> Self {
        Self {
            uuid: record.uuid.into_uuid(),
            equipment_uuid: record.equipment_uuid.into_uuid(),
            equipment_name: record.equipment_name.clone(),
            technician: Technician {
                name: record.technician_name.clone(),
                tax_id: record.technician_tax_id.clone(),
            },
            opened_at: record.opened_at,
            completed_at: record.completed_at,
            maintenance_type: record.maintenance_type,
            downtime_hours: record.downtime_hours,
            status: record.status,
            notes: record.notes.clone(),
        }
    }
}
