//! Equipment Health
//!
//! Health is derived from how long equipment has gone without maintenance, how often it has
//! failed, and the resulting MTBF estimate. The time-based tier is computed first and the
//! failure count may only escalate it, never relax it.

use std::fmt;

use jiff::Timestamp;
use rustc_hash::FxHashMap;
use serde::Serialize;
use smallvec::SmallVec;
use uuid::Uuid;

use crate::{
    equipment::Equipment,
    policy::MaintenancePolicy,
    utils::{count_as_f64, days, mean, whole_days_between},
    work_orders::WorkOrder,
};

const MAX_SCORE: i32 = 100;
const CRITICAL_PENALTY: i32 = 40;
const WARNING_PENALTY: i32 = 20;
const CHRONIC_FAILURE_PENALTY: i32 = 20;
const FREQUENT_FAILURE_PENALTY: i32 = 10;
const SHORT_MTBF_PENALTY: i32 = 20;
const LOW_MTBF_PENALTY: i32 = 10;
const SHORT_MTBF_DAYS: f64 = 30.0;
const LOW_MTBF_DAYS: f64 = 60.0;

/// Categorical health, ordered from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    /// Maintained recently and failing rarely.
    Healthy,

    /// Maintenance is due soon or failures are recurring.
    Warning,

    /// Maintenance is overdue or failures are chronic.
    Critical,
}

impl HealthStatus {
    /// Display name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }

    /// Raise the status to at least `floor`.
    #[must_use]
    pub fn escalate_to(self, floor: Self) -> Self {
        self.max(floor)
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Health evaluation for one piece of equipment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquipmentHealth {
    /// Equipment identifier.
    pub equipment_uuid: Uuid,

    /// Equipment name.
    pub equipment_name: String,

    /// Categorical status.
    pub status: HealthStatus,

    /// Number of corrective orders raised against the equipment.
    pub failure_count: usize,

    /// Whole days since installation.
    pub days_since_installation: i64,

    /// Whole days since the last completed maintenance, or since installation.
    pub days_since_maintenance: i64,

    /// Mean time between failures, in days.
    pub mtbf_days: f64,

    /// Completion time of the most recent completed order.
    pub last_maintenance: Option<Timestamp>,

    /// When the next preventive maintenance is due.
    pub next_maintenance: Timestamp,

    /// Health score between 0 and 100.
    pub score: u8,
}

impl EquipmentHealth {
    /// Evaluate `equipment` from its work orders.
    ///
    /// Orders that reference other equipment are skipped, so the whole order list may be
    /// passed in.
    pub fn evaluate<'a>(
        equipment: &Equipment,
        orders: impl IntoIterator<Item = &'a WorkOrder>,
        now: Timestamp,
        policy: &MaintenancePolicy,
    ) -> Self {
        let mut failure_count = 0_usize;
        let mut last_maintenance: Option<Timestamp> = None;

        for order in orders
            .into_iter()
            .filter(|order| order.equipment_uuid == equipment.uuid)
        {
            if order.is_corrective() {
                failure_count += 1;
            }

            if let Some(completed_at) = order.completion_at(now) {
                last_maintenance = last_maintenance.max(Some(completed_at));
            }
        }

        // A future installation date is malformed input; treat it as installed today.
        let days_since_installation = whole_days_between(equipment.installed_at, now).max(0);

        let mtbf_days = if failure_count > 0 {
            days_as_f64(days_since_installation) / count_as_f64(failure_count)
        } else {
            days_as_f64(days_since_installation)
        };

        let maintained_from = last_maintenance.unwrap_or(equipment.installed_at);

        let next_maintenance = maintained_from
            .checked_add(days(policy.preventive_interval_days))
            .unwrap_or(Timestamp::MAX);

        let days_since_maintenance = last_maintenance.map_or(days_since_installation, |last| {
            whole_days_between(last, now)
        });

        let status = health_status(days_since_maintenance, failure_count, policy);

        Self {
            equipment_uuid: equipment.uuid,
            equipment_name: equipment.name.clone(),
            status,
            failure_count,
            days_since_installation,
            days_since_maintenance,
            mtbf_days,
            last_maintenance,
            next_maintenance,
            score: health_score(status, failure_count, mtbf_days, policy),
        }
    }

    /// Whether the next preventive maintenance date has passed.
    #[must_use]
    pub fn maintenance_due(&self, now: Timestamp) -> bool {
        self.next_maintenance <= now
    }
}

/// Status from days without maintenance, escalated by the failure count.
#[must_use]
pub fn health_status(
    days_since_maintenance: i64,
    failure_count: usize,
    policy: &MaintenancePolicy,
) -> HealthStatus {
    let by_time = if days_since_maintenance > policy.critical_after_days {
        HealthStatus::Critical
    } else if days_since_maintenance > policy.warning_after_days {
        HealthStatus::Warning
    } else {
        HealthStatus::Healthy
    };

    if failure_count > policy.chronic_failures {
        by_time.escalate_to(HealthStatus::Critical)
    } else if failure_count >= policy.frequent_failures {
        by_time.escalate_to(HealthStatus::Warning)
    } else {
        by_time
    }
}

/// Score out of 100 after status, failure and MTBF penalties.
#[must_use]
pub fn health_score(
    status: HealthStatus,
    failure_count: usize,
    mtbf_days: f64,
    policy: &MaintenancePolicy,
) -> u8 {
    let mut score = MAX_SCORE;

    score -= match status {
        HealthStatus::Critical => CRITICAL_PENALTY,
        HealthStatus::Warning => WARNING_PENALTY,
        HealthStatus::Healthy => 0,
    };

    if failure_count > policy.chronic_failures {
        score -= CHRONIC_FAILURE_PENALTY;
    } else if failure_count >= policy.frequent_failures {
        score -= FREQUENT_FAILURE_PENALTY;
    }

    if mtbf_days < SHORT_MTBF_DAYS {
        score -= SHORT_MTBF_PENALTY;
    } else if mtbf_days < LOW_MTBF_DAYS {
        score -= LOW_MTBF_PENALTY;
    }

    u8::try_from(score.clamp(0, MAX_SCORE)).unwrap_or(0)
}

/// Health of every piece of equipment in a fleet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetHealth {
    /// Per-equipment evaluations, in input order.
    pub equipment: Vec<EquipmentHealth>,

    /// Mean equipment score, `0.0` for an empty fleet.
    pub score: f64,
}

impl FleetHealth {
    /// Evaluate every piece of equipment.
    ///
    /// Orders referencing equipment that is not in `equipment` are ignored.
    pub fn evaluate(
        equipment: &[Equipment],
        orders: &[WorkOrder],
        now: Timestamp,
        policy: &MaintenancePolicy,
    ) -> Self {
        let mut by_equipment: FxHashMap<Uuid, SmallVec<[&WorkOrder; 8]>> = FxHashMap::default();

        for order in orders {
            by_equipment
                .entry(order.equipment_uuid)
                .or_default()
                .push(order);
        }

        let equipment: Vec<EquipmentHealth> = equipment
            .iter()
            .map(|item| {
                let orders = by_equipment
                    .get(&item.uuid)
                    .map(SmallVec::as_slice)
                    .unwrap_or_default();

                EquipmentHealth::evaluate(item, orders.iter().copied(), now, policy)
            })
            .collect();

        let score = mean(equipment.iter().map(|health| f64::from(health.score)));

        Self { equipment, score }
    }

    /// Number of pieces of equipment in `status`.
    #[must_use]
    pub fn count(&self, status: HealthStatus) -> usize {
        self.equipment
            .iter()
            .filter(|health| health.status == status)
            .count()
    }
}

fn days_as_f64(days: i64) -> f64 {
    i32::try_from(days).map_or(f64::from(i32::MAX), f64::from)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        equipment::MaintenanceType,
        fixtures::{days_ago, equipment, now, work_order},
    };

    use super::*;

    fn no_orders<'a>() -> std::iter::Empty<&'a WorkOrder> {
        std::iter::empty()
    }

    #[test]
    fn equipment_without_orders_is_healthy_with_full_score() -> TestResult {
        let now = now()?;
        let policy = MaintenancePolicy::default();
        let pump = equipment("Pump B2", days_ago(now, 45)?);

        let health = EquipmentHealth::evaluate(&pump, no_orders(), now, &policy);

        assert_eq!(health.status, HealthStatus::Healthy);
        assert_eq!(health.failure_count, 0);
        assert_eq!(health.days_since_installation, 45);
        assert!((health.mtbf_days - 45.0).abs() < f64::EPSILON);
        assert_eq!(health.last_maintenance, None);
        assert_eq!(health.next_maintenance, pump.installed_at.checked_add(days(90))?);

        // 45 days of MTBF still costs 10 points.
        assert_eq!(health.score, 90);

        Ok(())
    }

    #[test]
    fn recently_serviced_equipment_scores_100() -> TestResult {
        let now = now()?;
        let policy = MaintenancePolicy::default();
        let motor = equipment("Motor C3", days_ago(now, 20)?);
        let mut health = EquipmentHealth::evaluate(&motor, no_orders(), now, &policy);

        assert_eq!(health.status, HealthStatus::Healthy);

        // Without orders the MTBF is the age, which is penalized below 60 days, while the
        // warning tier starts after 60 days. Only exactly 60 days scores 100.
        let old_motor = equipment("Motor C3", days_ago(now, 59)?);
        health = EquipmentHealth::evaluate(&old_motor, no_orders(), now, &policy);

        assert_eq!(health.score, 90);

        let boundary_motor = equipment("Motor C3", days_ago(now, 60)?);
        health = EquipmentHealth::evaluate(&boundary_motor, no_orders(), now, &policy);

        assert_eq!(health.score, 100);

        let recently_serviced = work_order(MaintenanceType::Preventive)
            .for_equipment(&motor)
            .opened(days_ago(now, 2)?)
            .completed(days_ago(now, 1)?)
            .build();

        let installed_long_ago = Equipment {
            installed_at: days_ago(now, 400)?,
            ..motor
        };

        health = EquipmentHealth::evaluate(&installed_long_ago, [&recently_serviced], now, &policy);

        assert_eq!(health.status, HealthStatus::Healthy);
        assert_eq!(health.score, 100);

        Ok(())
    }

    #[test]
    fn worked_example_is_critical_with_score_60() -> TestResult {
        let now = now()?;
        let policy = MaintenancePolicy::default();
        let compressor = equipment("Compressor A1", days_ago(now, 200)?);

        let repair = work_order(MaintenanceType::Corrective)
            .for_equipment(&compressor)
            .opened(days_ago(now, 101)?)
            .completed(days_ago(now, 100)?)
            .build();

        let health = EquipmentHealth::evaluate(&compressor, [&repair], now, &policy);

        assert!((health.mtbf_days - 200.0).abs() < f64::EPSILON);
        assert_eq!(health.days_since_maintenance, 100);
        assert_eq!(health.status, HealthStatus::Critical);
        assert_eq!(health.score, 60);
        assert_eq!(health.last_maintenance, Some(days_ago(now, 100)?));

        Ok(())
    }

    #[test]
    fn last_maintenance_uses_latest_completion() -> TestResult {
        let now = now()?;
        let policy = MaintenancePolicy::default();
        let fan = equipment("Fan D4", days_ago(now, 300)?);

        let older = work_order(MaintenanceType::Preventive)
            .for_equipment(&fan)
            .opened(days_ago(now, 50)?)
            .completed(days_ago(now, 40)?)
            .build();

        let newer = work_order(MaintenanceType::Preventive)
            .for_equipment(&fan)
            .opened(days_ago(now, 12)?)
            .completed(days_ago(now, 10)?)
            .build();

        let cancelled = work_order(MaintenanceType::Preventive)
            .for_equipment(&fan)
            .opened(days_ago(now, 3)?)
            .cancelled()
            .build();

        let health = EquipmentHealth::evaluate(&fan, [&newer, &older, &cancelled], now, &policy);

        assert_eq!(health.last_maintenance, Some(days_ago(now, 10)?));
        assert_eq!(health.next_maintenance, days_ago(now, 10)?.checked_add(days(90))?);
        assert_eq!(health.days_since_maintenance, 10);

        Ok(())
    }

    #[test]
    fn completion_after_now_is_not_last_maintenance() -> TestResult {
        let now = now()?;
        let policy = MaintenancePolicy::default();
        let lathe = equipment("Lathe E5", days_ago(now, 200)?);

        let scheduled = work_order(MaintenanceType::Preventive)
            .for_equipment(&lathe)
            .opened(days_ago(now, 1)?)
            .completed(now.checked_add(days(10))?)
            .build();

        let health = EquipmentHealth::evaluate(&lathe, [&scheduled], now, &policy);

        assert_eq!(health.last_maintenance, None);
        assert_eq!(health.days_since_maintenance, 200);
        assert_eq!(health.status, HealthStatus::Critical);
        assert_eq!(health.next_maintenance, lathe.installed_at.checked_add(days(90))?);

        Ok(())
    }

    #[test]
    fn time_tiers_follow_thresholds() {
        let policy = MaintenancePolicy::default();

        assert_eq!(health_status(60, 0, &policy), HealthStatus::Healthy);
        assert_eq!(health_status(61, 0, &policy), HealthStatus::Warning);
        assert_eq!(health_status(90, 0, &policy), HealthStatus::Warning);
        assert_eq!(health_status(91, 0, &policy), HealthStatus::Critical);
    }

    #[test]
    fn failures_escalate_but_never_downgrade() {
        let policy = MaintenancePolicy::default();

        assert_eq!(health_status(0, 1, &policy), HealthStatus::Healthy);
        assert_eq!(health_status(0, 2, &policy), HealthStatus::Warning);
        assert_eq!(health_status(0, 3, &policy), HealthStatus::Warning);
        assert_eq!(health_status(0, 4, &policy), HealthStatus::Critical);
        assert_eq!(health_status(120, 2, &policy), HealthStatus::Critical);
        assert_eq!(health_status(75, 3, &policy), HealthStatus::Warning);
    }

    #[test]
    fn score_applies_every_penalty() {
        let policy = MaintenancePolicy::default();

        assert_eq!(health_score(HealthStatus::Healthy, 0, 365.0, &policy), 100);
        assert_eq!(health_score(HealthStatus::Warning, 2, 45.0, &policy), 60);
        assert_eq!(health_score(HealthStatus::Critical, 4, 10.0, &policy), 20);
    }

    #[test]
    fn orders_for_other_equipment_are_ignored() -> TestResult {
        let now = now()?;
        let policy = MaintenancePolicy::default();
        let pump = equipment("Pump B2", days_ago(now, 100)?);

        let stray = work_order(MaintenanceType::Corrective)
            .equipment_uuid(Uuid::from_u128(42))
            .opened(days_ago(now, 5)?)
            .build();

        let health = EquipmentHealth::evaluate(&pump, [&stray], now, &policy);

        assert_eq!(health.failure_count, 0);

        Ok(())
    }

    #[test]
    fn fleet_score_is_mean_of_equipment_scores() -> TestResult {
        let now = now()?;
        let policy = MaintenancePolicy::default();
        let healthy = equipment("Press", days_ago(now, 10)?);
        let neglected = equipment("Lathe", days_ago(now, 200)?);

        let fleet = FleetHealth::evaluate(
            &[healthy, neglected],
            &[],
            now,
            &policy,
        );

        let total: u32 = fleet
            .equipment
            .iter()
            .map(|health| u32::from(health.score))
            .sum();
        let expected = f64::from(total) / 2.0;

        assert!((fleet.score - expected).abs() < f64::EPSILON);
        assert_eq!(fleet.count(HealthStatus::Critical), 1);

        Ok(())
    }

    #[test]
    fn empty_fleet_scores_zero() -> TestResult {
        let fleet = FleetHealth::evaluate(&[], &[], now()?, &MaintenancePolicy::default());

        assert!(fleet.equipment.is_empty());
        assert!(fleet.score.abs() < f64::EPSILON);

        Ok(())
    }

    #[test]
    fn maintenance_due_compares_next_maintenance() -> TestResult {
        let now = now()?;
        let policy = MaintenancePolicy::default();
        let old = equipment("Boiler", days_ago(now, 120)?);

        let health = EquipmentHealth::evaluate(&old, no_orders(), now, &policy);

        assert!(health.maintenance_due(now));

        Ok(())
    }
}
