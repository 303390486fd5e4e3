//! Equipment Records

use jiff::Timestamp;
use pcm::equipment::{Equipment, MaintenanceType};

use crate::uuids::TypedUuid;

/// Equipment UUID
pub type EquipmentUuid = TypedUuid<EquipmentRecord>;

/// Equipment Record
#[derive(Debug, Clone)]
pub struct EquipmentRecord {
    pub uuid: EquipmentUuid,
    pub name: String,
    pub location: String,
    pub maintenance_type: MaintenanceType,
    pub installed_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

impl From<&EquipmentRecord> for Equipment {
    fn from(record: &EquipmentRecord) -> Self {
        Self {
            uuid: record.uuid.into_uuid(),
            name: record.name.clone(),
            location: record.location.clone(),
            maintenance_type: record.maintenance_type,
            installed_at: record.installed_at,
        }
    }
}
