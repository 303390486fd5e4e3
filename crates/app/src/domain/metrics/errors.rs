//! Metrics service errors.

use thiserror::Error;

use crate::domain::{equipment::EquipmentServiceError, work_orders::WorkOrdersServiceError};

#[derive(Debug, Error)]
pub enum MetricsServiceError {
    #[error("failed to load equipment")]
    Equipment(#[from] EquipmentServiceError),

    #[error("failed to load work orders")]
    WorkOrders(#[from] WorkOrdersServiceError),
}
