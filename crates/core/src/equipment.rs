//! Equipment

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Maintenance classification shared by equipment and work orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceType {
    /// Scheduled maintenance carried out before a failure.
    Preventive,

    /// Repair triggered by a failure.
    Corrective,
}

impl MaintenanceType {
    /// Wire and storage name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Preventive => "preventive",
            Self::Corrective => "corrective",
        }
    }
}

impl fmt::Display for MaintenanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown maintenance type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown maintenance type: {0}")]
pub struct UnknownMaintenanceType(pub String);

impl FromStr for MaintenanceType {
    type Err = UnknownMaintenanceType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "preventive" => Ok(Self::Preventive),
            "corrective" => Ok(Self::Corrective),
            other => Err(UnknownMaintenanceType(other.to_string())),
        }
    }
}

/// A piece of equipment under maintenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    /// Equipment identifier.
    pub uuid: Uuid,

    /// Display name.
    pub name: String,

    /// Where the equipment is installed.
    pub location: String,

    /// Default maintenance regime for the equipment.
    pub maintenance_type: MaintenanceType,

    /// When the equipment entered service.
    pub installed_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn maintenance_type_parses_storage_names() -> TestResult {
        assert_eq!(
            "preventive".parse::<MaintenanceType>()?,
            MaintenanceType::Preventive
        );
        assert_eq!(
            "corrective".parse::<MaintenanceType>()?,
            MaintenanceType::Corrective
        );

        Ok(())
    }

    #[test]
    fn maintenance_type_rejects_unknown_names() {
        let result = "preventiva".parse::<MaintenanceType>();

        assert_eq!(
            result,
            Err(UnknownMaintenanceType("preventiva".to_string()))
        );
    }
}
