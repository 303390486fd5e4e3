//! Work Orders

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::{equipment::MaintenanceType, utils::hours_between};

/// Lifecycle status of a work order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkOrderStatus {
    /// Opened and waiting for a technician.
    Open,

    /// A technician is working on it.
    InProgress,

    /// Work finished.
    Completed,

    /// Abandoned before completion.
    Cancelled,
}

impl WorkOrderStatus {
    /// Wire and storage name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Open or in progress.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Open | Self::InProgress)
    }

    /// Completed and cancelled orders never change status again.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Whether a stored order may move from `self` to `next`.
    ///
    /// Staying in the same status is always allowed so that other fields can be edited.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Open, Self::Open | Self::InProgress | Self::Completed | Self::Cancelled)
                | (
                    Self::InProgress,
                    Self::InProgress | Self::Completed | Self::Cancelled
                )
                | (Self::Completed, Self::Completed)
                | (Self::Cancelled, Self::Cancelled)
        )
    }
}

impl fmt::Display for WorkOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown work order status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown work order status: {0}")]
pub struct UnknownWorkOrderStatus(pub String);

impl FromStr for WorkOrderStatus {
    type Err = UnknownWorkOrderStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "open" => Ok(Self::Open),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(UnknownWorkOrderStatus(other.to_string())),
        }
    }
}

/// Technician assigned to a work order.
///
/// Names may collide, so a technician is identified by the name and tax id together.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Technician {
    /// Technician display name.
    pub name: String,

    /// Technician tax identifier.
    pub tax_id: String,
}

/// A maintenance work order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkOrder {
    /// Work order identifier.
    pub uuid: Uuid,

    /// Equipment the order was raised against.
    pub equipment_uuid: Uuid,

    /// Equipment name at the time the order was written.
    pub equipment_name: String,

    /// Assigned technician.
    pub technician: Technician,

    /// When the order was opened.
    pub opened_at: Timestamp,

    /// When the order was completed, if it has been.
    pub completed_at: Option<Timestamp>,

    /// Preventive or corrective.
    pub maintenance_type: MaintenanceType,

    /// Equipment downtime caused by the intervention, in hours.
    pub downtime_hours: f64,

    /// Lifecycle status.
    pub status: WorkOrderStatus,

    /// Free-text notes.
    pub notes: Option<String>,
}

impl WorkOrder {
    /// Whether this order records a failure.
    #[must_use]
    pub fn is_corrective(&self) -> bool {
        self.maintenance_type == MaintenanceType::Corrective
    }

    /// Completion timestamp of a completed order, as seen at `now`.
    ///
    /// A completion later than `now` has not happened yet.
    #[must_use]
    pub fn completion_at(&self, now: Timestamp) -> Option<Timestamp> {
        match self.status {
            WorkOrderStatus::Completed => {
                self.completed_at.filter(|completed_at| *completed_at <= now)
            }
            _ => None,
        }
    }

    /// Hours from opening to completion, for orders completed by `now`.
    #[must_use]
    pub fn resolution_hours(&self, now: Timestamp) -> Option<f64> {
        self.completion_at(now)
            .map(|completed_at| hours_between(self.opened_at, completed_at))
    }
}
