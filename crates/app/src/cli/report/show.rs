use std::{io, sync::Arc};

use clap::Args;
use jiff::{Timestamp, tz::TimeZone};
use pcm::policy::MaintenancePolicy;
use pcm_app::{
    database::{self, Db},
    domain::{
        companies::records::CompanyUuid,
        equipment::PgEquipmentService,
        metrics::{MetricsService, StoreMetricsService},
        work_orders::PgWorkOrdersService,
    },
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct ShowReportArgs {
    /// PostgreSQL connection string for the application role
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Company to report on
    #[arg(long)]
    tenant_uuid: Uuid,

    /// Point in time to report at (RFC 3339); defaults to now
    #[arg(long)]
    at: Option<Timestamp>,

    /// IANA time zone for calendar months
    #[arg(long, env = "PCM_TIME_ZONE", default_value = "UTC")]
    time_zone: String,

    /// Print JSON instead of tables
    #[arg(long)]
    json: bool,
}

pub(crate) async fn run(args: ShowReportArgs) -> Result<(), String> {
    let time_zone = TimeZone::get(&args.time_zone)
        .map_err(|error| format!("unknown time zone `{}`: {error}", args.time_zone))?;

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    database::ensure_rls_enforced_role(&pool)
        .await
        .map_err(|error| error.to_string())?;

    let db = Db::new(pool);

    let metrics = StoreMetricsService::new(
        Arc::new(PgEquipmentService::new(db.clone())),
        Arc::new(PgWorkOrdersService::new(db)),
        MaintenancePolicy::default().with_time_zone(time_zone),
    );

    let report = metrics
        .report(
            CompanyUuid::from_uuid(args.tenant_uuid),
            args.at.unwrap_or_else(Timestamp::now),
        )
        .await
        .map_err(|error| format!("failed to compute report: {error}"))?;

    if args.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|error| format!("failed to serialize report: {error}"))?;

        println!("{json}");

        return Ok(());
    }

    report
        .write_to(io::stdout().lock())
        .map_err(|error| format!("failed to print report: {error}"))
}
