//! Wire enums shared by request and response bodies.
//!
//! These mirror the domain enums so they can carry an OpenAPI schema.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use pcm::{equipment, health, work_orders};
use pcm_app::domain::companies::records;

/// Maintenance classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum MaintenanceType {
    Preventive,
    Corrective,
}

impl From<MaintenanceType> for equipment::MaintenanceType {
    fn from(value: MaintenanceType) -> Self {
        match value {
            MaintenanceType::Preventive => Self::Preventive,
            MaintenanceType::Corrective => Self::Corrective,
        }
    }
}

impl From<equipment::MaintenanceType> for MaintenanceType {
    fn from(value: equipment::MaintenanceType) -> Self {
        match value {
            equipment::MaintenanceType::Preventive => Self::Preventive,
            equipment::MaintenanceType::Corrective => Self::Corrective,
        }
    }
}

/// Work order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum WorkOrderStatus {
    Open,
    InProgress,
    Completed,
    Cancelled,
}

impl From<WorkOrderStatus> for work_orders::WorkOrderStatus {
    fn from(value: WorkOrderStatus) -> Self {
        match value {
            WorkOrderStatus::Open => Self::Open,
            WorkOrderStatus::InProgress => Self::InProgress,
            WorkOrderStatus::Completed => Self::Completed,
            WorkOrderStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<work_orders::WorkOrderStatus> for WorkOrderStatus {
    fn from(value: work_orders::WorkOrderStatus) -> Self {
        match value {
            work_orders::WorkOrderStatus::Open => Self::Open,
            work_orders::WorkOrderStatus::InProgress => Self::InProgress,
            work_orders::WorkOrderStatus::Completed => Self::Completed,
            work_orders::WorkOrderStatus::Cancelled => Self::Cancelled,
        }
    }
}

/// Subscription tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum SubscriptionPlan {
    #[default]
    Basic,
    Professional,
    Enterprise,
}

impl From<SubscriptionPlan> for records::SubscriptionPlan {
    fn from(value: SubscriptionPlan) -> Self {
        match value {
            SubscriptionPlan::Basic => Self::Basic,
            SubscriptionPlan::Professional => Self::Professional,
            SubscriptionPlan::Enterprise => Self::Enterprise,
        }
    }
}

impl From<records::SubscriptionPlan> for SubscriptionPlan {
    fn from(value: records::SubscriptionPlan) -> Self {
        match value {
            records::SubscriptionPlan::Basic => Self::Basic,
            records::SubscriptionPlan::Professional => Self::Professional,
            records::SubscriptionPlan::Enterprise => Self::Enterprise,
        }
    }
}

/// Equipment health classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum HealthStatus {
    Healthy,
    Warning,
    Critical,
}

impl From<health::HealthStatus> for HealthStatus {
    fn from(value: health::HealthStatus) -> Self {
        match value {
            health::HealthStatus::Healthy => Self::Healthy,
            health::HealthStatus::Warning => Self::Warning,
            health::HealthStatus::Critical => Self::Critical,
        }
    }
}
