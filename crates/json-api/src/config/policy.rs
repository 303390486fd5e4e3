//! Maintenance Policy Config

use clap::Args;
use jiff::tz::TimeZone;
use pcm::policy::MaintenancePolicy;

/// Maintenance policy settings.
#[derive(Debug, Args)]
pub struct PolicyConfig {
    /// IANA time zone used for calendar-month boundaries
    #[arg(long = "time-zone", env = "PCM_TIME_ZONE", default_value = "UTC")]
    pub time_zone: String,
}

impl PolicyConfig {
    /// Build the maintenance policy with the configured time zone.
    ///
    /// # Errors
    ///
    /// Returns an error when the time zone is not in the tz database.
    pub fn to_policy(&self) -> Result<MaintenancePolicy, jiff::Error> {
        Ok(MaintenancePolicy::default().with_time_zone(TimeZone::get(&self.time_zone)?))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn utc_resolves() -> TestResult {
        let config = PolicyConfig {
            time_zone: "UTC".to_string(),
        };

        assert_eq!(config.to_policy()?.time_zone.iana_name(), Some("UTC"));

        Ok(())
    }

    #[test]
    fn unknown_zone_is_rejected() {
        let config = PolicyConfig {
            time_zone: "Mars/Olympus_Mons".to_string(),
        };

        assert!(config.to_policy().is_err());
    }
}
