//! Fleet Statistics

use jiff::{Timestamp, tz::TimeZone};
use serde::Serialize;

use crate::{
    equipment::MaintenanceType,
    policy::MaintenancePolicy,
    utils::{count_as_f64, days, mean, percent_change},
    work_orders::{WorkOrder, WorkOrderStatus},
};

/// Order counts by maintenance type, across every status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MaintenanceSplit {
    /// Preventive orders.
    pub preventive: usize,

    /// Corrective orders.
    pub corrective: usize,
}

impl MaintenanceSplit {
    /// Preventive share of all orders as a percentage, `0.0` without orders.
    #[must_use]
    pub fn preventive_percent(&self) -> f64 {
        let total = self.preventive + self.corrective;

        if total == 0 {
            return 0.0;
        }

        count_as_f64(self.preventive) / count_as_f64(total) * 100.0
    }
}

/// Dashboard counters for a tenant's work orders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetStats {
    /// Equipment under maintenance.
    pub equipment_count: usize,

    /// All work orders.
    pub total_orders: usize,

    /// Open or in-progress orders.
    pub active_orders: usize,

    /// Orders completed since the start of the current month.
    pub completed_this_month: usize,

    /// Orders completed during the previous calendar month.
    pub completed_last_month: usize,

    /// Open orders waiting longer than the overdue threshold.
    pub overdue_orders: usize,

    /// Mean hours from opening to completion over completed orders.
    pub average_resolution_hours: f64,

    /// Preventive and corrective order counts.
    pub split: MaintenanceSplit,

    /// Month-over-month change in completions, as a percentage.
    pub monthly_trend: f64,
}

impl FleetStats {
    /// Aggregate `orders` as seen at `now`.
    pub fn compute(
        equipment_count: usize,
        orders: &[WorkOrder],
        now: Timestamp,
        policy: &MaintenancePolicy,
    ) -> Self {
        let months = MonthWindows::new(now, &policy.time_zone);
        let overdue_after = days(policy.overdue_after_days);

        let mut stats = Self {
            equipment_count,
            total_orders: orders.len(),
            active_orders: 0,
            completed_this_month: 0,
            completed_last_month: 0,
            overdue_orders: 0,
            average_resolution_hours: 0.0,
            split: MaintenanceSplit::default(),
            monthly_trend: 0.0,
        };

        for order in orders {
            if order.status.is_active() {
                stats.active_orders += 1;
            }

            if order.status == WorkOrderStatus::Open
                && now.duration_since(order.opened_at) > overdue_after
            {
                stats.overdue_orders += 1;
            }

            if let Some(completed_at) = order.completion_at(now) {
                match months.classify(completed_at, now) {
                    Some(Month::Current) => stats.completed_this_month += 1,
                    Some(Month::Previous) => stats.completed_last_month += 1,
                    None => {}
                }
            }

            match order.maintenance_type {
                MaintenanceType::Preventive => stats.split.preventive += 1,
                MaintenanceType::Corrective => stats.split.corrective += 1,
            }
        }

        stats.average_resolution_hours =
            mean(orders.iter().filter_map(|order| order.resolution_hours(now)));
        stats.monthly_trend = percent_change(stats.completed_last_month, stats.completed_this_month);

        stats
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Month {
    Current,
    Previous,
}

/// Calendar months around `now`, as civil (year, month) pairs in the policy time zone.
#[derive(Debug)]
struct MonthWindows<'a> {
    time_zone: &'a TimeZone,
    current: (i16, i8),
    previous: (i16, i8),
}

impl<'a> MonthWindows<'a> {
    fn new(now: Timestamp, time_zone: &'a TimeZone) -> Self {
        let current = year_month(now, time_zone);

        let previous = match current {
            (year, 1) => (year - 1, 12),
            (year, month) => (year, month - 1),
        };

        Self {
            time_zone,
            current,
            previous,
        }
    }

    fn classify(&self, completed_at: Timestamp, now: Timestamp) -> Option<Month> {
        let month = year_month(completed_at, self.time_zone);

        if month == self.current && completed_at <= now {
            Some(Month::Current)
        } else if month == self.previous {
            Some(Month::Previous)
        } else {
            None
        }
    }
}

fn year_month(timestamp: Timestamp, time_zone: &TimeZone) -> (i16, i8) {
    let date = timestamp.to_zoned(time_zone.clone()).date();

    (date.year(), date.month())
}
