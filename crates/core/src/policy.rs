//! Maintenance Policy
//!
//! Thresholds that drive health status, preventive cadence and overdue detection.

use jiff::tz::TimeZone;
use thiserror::Error;

/// Days an open order may wait before it is overdue.
pub const DEFAULT_OVERDUE_AFTER_DAYS: i64 = 7;

/// Days between preventive interventions.
pub const DEFAULT_PREVENTIVE_INTERVAL_DAYS: i64 = 90;

/// Days without maintenance after which equipment needs attention.
pub const DEFAULT_WARNING_AFTER_DAYS: i64 = 60;

/// Days without maintenance after which equipment is critical.
pub const DEFAULT_CRITICAL_AFTER_DAYS: i64 = 90;

/// Failure count from which equipment is flagged as failing frequently.
pub const DEFAULT_FREQUENT_FAILURES: usize = 2;

/// Failure count above which equipment is considered chronically failing.
pub const DEFAULT_CHRONIC_FAILURES: usize = 3;

/// Operating window used for fleet MTBF, in days.
pub const DEFAULT_RELIABILITY_WINDOW_DAYS: u32 = 30;

/// Errors raised by [`MaintenancePolicy::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// The warning threshold must come before the critical threshold.
    #[error("warning threshold ({warning}) must be lower than critical threshold ({critical})")]
    WarningNotBeforeCritical {
        /// Warning threshold in days.
        warning: i64,

        /// Critical threshold in days.
        critical: i64,
    },

    /// A threshold expressed in days was negative or zero where it must be positive.
    #[error("{0} must be positive")]
    NotPositive(&'static str),

    /// The frequent failure count exceeds the chronic failure count.
    #[error("frequent failure count ({frequent}) exceeds chronic failure count ({chronic})")]
    FailureCountsOutOfOrder {
        /// Frequent failure count.
        frequent: usize,

        /// Chronic failure count.
        chronic: usize,
    },
}

/// Thresholds applied by the metric calculations.
#[derive(Debug, Clone)]
pub struct MaintenancePolicy {
    /// Open orders older than this many days are overdue.
    pub overdue_after_days: i64,

    /// Preventive cadence used to schedule the next maintenance.
    pub preventive_interval_days: i64,

    /// More than this many days since maintenance raises a warning.
    pub warning_after_days: i64,

    /// More than this many days since maintenance is critical.
    pub critical_after_days: i64,

    /// At least this many failures raises a warning.
    pub frequent_failures: usize,

    /// More than this many failures is critical.
    pub chronic_failures: usize,

    /// Operating window for fleet MTBF.
    pub reliability_window_days: u32,

    /// Time zone that defines calendar month boundaries.
    pub time_zone: TimeZone,
}

impl Default for MaintenancePolicy {
    fn default() -> Self {
        Self {
            overdue_after_days: DEFAULT_OVERDUE_AFTER_DAYS,
            preventive_interval_days: DEFAULT_PREVENTIVE_INTERVAL_DAYS,
            warning_after_days: DEFAULT_WARNING_AFTER_DAYS,
            critical_after_days: DEFAULT_CRITICAL_AFTER_DAYS,
            frequent_failures: DEFAULT_FREQUENT_FAILURES,
            chronic_failures: DEFAULT_CHRONIC_FAILURES,
            reliability_window_days: DEFAULT_RELIABILITY_WINDOW_DAYS,
            time_zone: TimeZone::UTC,
        }
    }
}

impl MaintenancePolicy {
    /// Use `time_zone` for calendar month boundaries.
    #[must_use]
    pub fn with_time_zone(mut self, time_zone: TimeZone) -> Self {
        self.time_zone = time_zone;
        self
    }

    /// Check that the thresholds are consistent with each other.
    ///
    /// # Errors
    ///
    /// Returns a [`PolicyError`] describing the first inconsistency found.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.preventive_interval_days <= 0 {
            return Err(PolicyError::NotPositive("preventive interval"));
        }

        if self.overdue_after_days <= 0 {
            return Err(PolicyError::NotPositive("overdue threshold"));
        }

        if self.reliability_window_days == 0 {
            return Err(PolicyError::NotPositive("reliability window"));
        }

        if self.warning_after_days >= self.critical_after_days {
            return Err(PolicyError::WarningNotBeforeCritical {
                warning: self.warning_after_days,
                critical: self.critical_after_days,
            });
        }

        if self.frequent_failures > self.chronic_failures {
            return Err(PolicyError::FailureCountsOutOfOrder {
                frequent: self.frequent_failures,
                chronic: self.chronic_failures,
            });
        }

        Ok(())
    }
}
