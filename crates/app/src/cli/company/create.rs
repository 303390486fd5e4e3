use clap::Args;
use pcm_app::{
    database,
    domain::companies::{
        CompaniesService, PgCompaniesService,
        data::NewCompany,
        records::{CompanyUuid, SubscriptionPlan},
    },
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateCompanyArgs {
    /// Company display name
    #[arg(long)]
    name: String,

    /// Manager email, used to log in
    #[arg(long)]
    manager_email: String,

    /// Subscription plan: basic, professional or enterprise
    #[arg(long, default_value = "basic")]
    plan: SubscriptionPlan,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Optional company UUID; generated when omitted
    #[arg(long)]
    company_uuid: Option<Uuid>,
}

pub(crate) async fn run(args: CreateCompanyArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgCompaniesService::new(pool);
    let uuid = args
        .company_uuid
        .map_or_else(CompanyUuid::new, CompanyUuid::from_uuid);

    let company = service
        .create_company(NewCompany {
            uuid,
            name: args.name,
            manager_email: args.manager_email,
            plan: args.plan,
        })
        .await
        .map_err(|error| format!("failed to create company: {error}"))?;

    println!("company_uuid: {}", company.uuid);
    println!("company_name: {}", company.name);
    println!("manager_email: {}", company.manager_email);
    println!("plan: {}", company.plan);

    Ok(())
}
