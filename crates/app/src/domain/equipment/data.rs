//! Equipment Data

use jiff::Timestamp;
use pcm::equipment::MaintenanceType;

use crate::domain::equipment::{errors::EquipmentServiceError, records::EquipmentUuid};

/// New Equipment Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewEquipment {
    pub uuid: EquipmentUuid,
    pub name: String,
    pub location: String,
    pub maintenance_type: MaintenanceType,
    pub installed_at: Timestamp,
}

/// Equipment Update Data
#[derive(Debug, Clone, PartialEq)]
pub struct EquipmentUpdate {
    pub name: String,
    pub location: String,
    pub maintenance_type: MaintenanceType,
    pub installed_at: Timestamp,
}

impl NewEquipment {
    /// Check the equipment against the server clock.
    ///
    /// # Errors
    ///
    /// Returns [`EquipmentServiceError::Validation`] for a blank name or a future installation.
    pub fn validate(&self, now: Timestamp) -> Result<(), EquipmentServiceError> {
        validate(&self.name, self.installed_at, now)
    }
}

impl EquipmentUpdate {
    /// Check the update against the server clock.
    ///
    /// # Errors
    ///
    /// Returns [`EquipmentServiceError::Validation`] for a blank name or a future installation.
    pub fn validate(&self, now: Timestamp) -> Result<(), EquipmentServiceError> {
        validate(&self.name, self.installed_at, now)
    }
}

fn validate(name: &str, installed_at: Timestamp, now: Timestamp) -> Result<(), EquipmentServiceError> {
    if name.trim().is_empty() {
        return Err(EquipmentServiceError::Validation("name cannot be empty"));
    }

    if installed_at > now {
        return Err(EquipmentServiceError::Validation(
            "installation date cannot be in the future",
        ));
    }

    Ok(())
}
