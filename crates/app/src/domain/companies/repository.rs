//! Companies Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as, query_scalar};

use crate::domain::companies::{
    data::NewCompany,
    records::{CompanyRecord, CompanyUuid, SubscriptionPlan},
};

const CREATE_COMPANY_SQL: &str = include_str!("sql/create_company.sql");
const FIND_COMPANY_BY_MANAGER_EMAIL_SQL: &str = include_str!("sql/find_company_by_manager_email.sql");
const GET_COMPANY_SQL: &str = include_str!("sql/get_company.sql");
const MANAGER_EMAIL_EXISTS_SQL: &str = include_str!("sql/manager_email_exists.sql");

#[derive(Debug, Clone)]
/// PostgreSQL-backed companies repository.
pub(crate) struct PgCompaniesRepository {
    pool: PgPool,
}

impl PgCompaniesRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn create_company(
        &self,
        company: NewCompany,
    ) -> Result<CompanyRecord, sqlx::Error> {
        query_as::<Postgres, CompanyRecord>(CREATE_COMPANY_SQL)
            .bind(company.uuid.into_uuid())
            .bind(company.name)
            .bind(company.manager_email)
            .bind(company.plan.as_str())
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn find_by_manager_email(
        &self,
        manager_email: &str,
    ) -> Result<CompanyRecord, sqlx::Error> {
        query_as::<Postgres, CompanyRecord>(FIND_COMPANY_BY_MANAGER_EMAIL_SQL)
            .bind(manager_email)
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn get_company(
        &self,
        company: CompanyUuid,
    ) -> Result<CompanyRecord, sqlx::Error> {
        query_as::<Postgres, CompanyRecord>(GET_COMPANY_SQL)
            .bind(company.into_uuid())
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn manager_email_exists(
        &self,
        manager_email: &str,
    ) -> Result<bool, sqlx::Error> {
        query_scalar(MANAGER_EMAIL_EXISTS_SQL)
            .bind(manager_email)
            .fetch_one(&self.pool)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for CompanyRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let plan: String = row.try_get("plan")?;

        Ok(Self {
            uuid: CompanyUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            manager_email: row.try_get("manager_email")?,
            plan: plan
                .parse::<SubscriptionPlan>()
                .map_err(|error| sqlx::Error::ColumnDecode {
                    index: "plan".to_string(),
                    source: Box::new(error),
                })?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
