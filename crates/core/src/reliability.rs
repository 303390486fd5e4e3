//! Fleet Reliability
//!
//! Fleet-wide MTBF and MTTR as shown on maintenance reports. MTBF here assumes every piece of
//! equipment ran around the clock for the whole reliability window.

use jiff::Timestamp;
use serde::Serialize;

use crate::{
    policy::MaintenancePolicy,
    utils::{count_as_f64, mean},
    work_orders::WorkOrder,
};

const HOURS_PER_DAY: f64 = 24.0;

/// Fleet reliability figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Reliability {
    /// Operating hours in the window divided by completed corrective orders.
    pub mtbf_hours: f64,

    /// Mean repair time over completed corrective orders.
    pub mttr_hours: f64,

    /// Downtime recorded across all orders.
    pub total_downtime_hours: f64,

    /// Completed corrective orders.
    pub completed_failures: usize,
}

impl Reliability {
    /// Compute reliability for `equipment_count` machines and their `orders`.
    pub fn compute(
        equipment_count: usize,
        orders: &[WorkOrder],
        now: Timestamp,
        policy: &MaintenancePolicy,
    ) -> Self {
        let repairs: Vec<f64> = orders
            .iter()
            .filter(|order| order.is_corrective())
            .filter_map(|order| order.resolution_hours(now))
            .collect();

        let completed_failures = repairs.len();

        let mtbf_hours = if completed_failures == 0 {
            0.0
        } else {
            let operating_hours = f64::from(policy.reliability_window_days)
                * HOURS_PER_DAY
                * count_as_f64(equipment_count);

            operating_hours / count_as_f64(completed_failures)
        };

        Self {
            mtbf_hours,
            mttr_hours: mean(repairs),
            total_downtime_hours: orders.iter().map(|order| order.downtime_hours).sum(),
            completed_failures,
        }
    }

    /// Availability over the window as a percentage: MTBF / (MTBF + MTTR).
    ///
    /// `0.0` when there is no completed failure to measure.
    #[must_use]
    pub fn availability_percent(&self) -> f64 {
        let cycle = self.mtbf_hours + self.mttr_hours;

        if cycle <= 0.0 {
            return 0.0;
        }

        self.mtbf_hours / cycle * 100.0
    }
}

#[cfg(test)]
mod tests {
    use jiff::ToSpan;
    use testresult::TestResult;

    use crate::{
        equipment::MaintenanceType,
        fixtures::{now, work_order},
    };

    use super::*;

    #[test]
    fn mtbf_spreads_window_hours_over_completed_failures() -> TestResult {
        let now = now()?;

        let orders = [
            work_order(MaintenanceType::Corrective)
                .opened(now.checked_sub(6.hours())?)
                .completed(now)
                .downtime(5.0)
                .build(),
            work_order(MaintenanceType::Corrective)
                .opened(now.checked_sub(2.hours())?)
                .completed(now)
                .downtime(1.5)
                .build(),
            // Open repairs and preventive work do not count as completed failures.
            work_order(MaintenanceType::Corrective)
                .opened(now)
                .downtime(0.5)
                .build(),
            work_order(MaintenanceType::Preventive)
                .opened(now.checked_sub(10.hours())?)
                .completed(now)
                .build(),
        ];

        let reliability = Reliability::compute(4, &orders, now, &MaintenancePolicy::default());

        assert_eq!(reliability.completed_failures, 2);
        assert!((reliability.mtbf_hours - 1_440.0).abs() < 1e-9);
        assert!((reliability.mttr_hours - 4.0).abs() < 1e-9);
        assert!((reliability.total_downtime_hours - 7.0).abs() < 1e-9);
        assert!((reliability.availability_percent() - 1_440.0 / 1_444.0 * 100.0).abs() < 1e-9);

        Ok(())
    }

    #[test]
    fn no_completed_failures_yields_zeroes() -> TestResult {
        let reliability = Reliability::compute(3, &[], now()?, &MaintenancePolicy::default());

        assert!(reliability.mtbf_hours.abs() < f64::EPSILON);
        assert!(reliability.mttr_hours.abs() < f64::EPSILON);
        assert!(reliability.availability_percent().abs() < f64::EPSILON);

        Ok(())
    }

    #[test]
    fn repairs_completed_after_now_are_not_failures_yet() -> TestResult {
        let now = now()?;

        let orders = [
            work_order(MaintenanceType::Corrective)
                .opened(now.checked_sub(3.hours())?)
                .completed(now)
                .build(),
            work_order(MaintenanceType::Corrective)
                .opened(now.checked_sub(1.hours())?)
                .completed(now.checked_add(47.hours())?)
                .build(),
        ];

        let reliability = Reliability::compute(1, &orders, now, &MaintenancePolicy::default());

        assert_eq!(reliability.completed_failures, 1);
        assert!((reliability.mttr_hours - 3.0).abs() < 1e-9);
        assert!((reliability.mtbf_hours - 720.0).abs() < 1e-9);

        Ok(())
    }
}
