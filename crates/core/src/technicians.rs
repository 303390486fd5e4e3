//! Technician Performance

use jiff::Timestamp;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::{
    utils::mean,
    work_orders::{Technician, WorkOrder, WorkOrderStatus},
};

/// Order counts for one technician, by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    /// Open orders.
    pub open: usize,

    /// In-progress orders.
    pub in_progress: usize,

    /// Completed orders.
    pub completed: usize,

    /// Cancelled orders.
    pub cancelled: usize,
}

impl StatusCounts {
    /// Count one more order in `status`.
    pub fn record(&mut self, status: WorkOrderStatus) {
        match status {
            WorkOrderStatus::Open => self.open += 1,
            WorkOrderStatus::InProgress => self.in_progress += 1,
            WorkOrderStatus::Completed => self.completed += 1,
            WorkOrderStatus::Cancelled => self.cancelled += 1,
        }
    }

    /// Orders in `status`.
    #[must_use]
    pub const fn get(&self, status: WorkOrderStatus) -> usize {
        match status {
            WorkOrderStatus::Open => self.open,
            WorkOrderStatus::InProgress => self.in_progress,
            WorkOrderStatus::Completed => self.completed,
            WorkOrderStatus::Cancelled => self.cancelled,
        }
    }
}

/// Workload and resolution time for one technician.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechnicianSummary {
    /// Technician identity.
    pub technician: Technician,

    /// All orders assigned to the technician.
    pub total_orders: usize,

    /// Orders by status.
    pub by_status: StatusCounts,

    /// Mean hours from opening to completion over the technician's completed orders.
    pub average_resolution_hours: f64,
}

/// Summarize work orders per technician.
///
/// Technicians are keyed by name and tax id together and returned in the order they first
/// appear in `orders`.
pub fn summarize_technicians(orders: &[WorkOrder], now: Timestamp) -> Vec<TechnicianSummary> {
    let mut positions: FxHashMap<&Technician, usize> = FxHashMap::default();
    let mut groups: Vec<(&Technician, StatusCounts, Vec<f64>)> = Vec::new();

    for order in orders {
        let position = *positions.entry(&order.technician).or_insert_with(|| {
            groups.push((&order.technician, StatusCounts::default(), Vec::new()));
            groups.len() - 1
        });

        if let Some((_, counts, resolutions)) = groups.get_mut(position) {
            counts.record(order.status);
            resolutions.extend(order.resolution_hours(now));
        }
    }

    groups
        .into_iter()
        .map(|(technician, by_status, resolutions)| TechnicianSummary {
            technician: technician.clone(),
            total_orders: by_status.open
                + by_status.in_progress
                + by_status.completed
                + by_status.cancelled,
            by_status,
            average_resolution_hours: mean(resolutions),
        })
        .collect()
}
