//! Companies service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;
use tracing::info;

use crate::domain::companies::{
    data::NewCompany,
    errors::CompaniesServiceError,
    records::{CompanyRecord, CompanyUuid, normalize_email},
    repository::PgCompaniesRepository,
};

#[derive(Debug, Clone)]
pub struct PgCompaniesService {
    repository: PgCompaniesRepository,
}

impl PgCompaniesService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgCompaniesRepository::new(pool),
        }
    }
}

#[async_trait]
impl CompaniesService for PgCompaniesService {
    async fn create_company(
        &self,
        company: NewCompany,
    ) -> Result<CompanyRecord, CompaniesServiceError> {
        let manager_email = normalize_email(&company.manager_email);
        let name = company.name.trim().to_string();

        if name.is_empty() || manager_email.is_empty() {
            return Err(CompaniesServiceError::MissingRequiredData);
        }

        let created = self
            .repository
            .create_company(NewCompany {
                name,
                manager_email,
                ..company
            })
            .await?;

        info!(company = %created.uuid, plan = %created.plan, "created company");

        Ok(created)
    }

    async fn find_by_manager_email(
        &self,
        manager_email: &str,
    ) -> Result<CompanyRecord, CompaniesServiceError> {
        self.repository
            .find_by_manager_email(&normalize_email(manager_email))
            .await
            .map_err(Into::into)
    }

    async fn manager_email_exists(&self, manager_email: &str) -> Result<bool, CompaniesServiceError> {
        self.repository
            .manager_email_exists(&normalize_email(manager_email))
            .await
            .map_err(Into::into)
    }

    async fn get_company(&self, company: CompanyUuid) -> Result<CompanyRecord, CompaniesServiceError> {
        self.repository
            .get_company(company)
            .await
            .map_err(Into::into)
    }
}

#[automock]
#[async_trait]
/// Company persistence operations.
pub trait CompaniesService: Send + Sync {
    /// Creates a new company.
    async fn create_company(
        &self,
        company: NewCompany,
    ) -> Result<CompanyRecord, CompaniesServiceError>;

    /// Finds the company managed by `manager_email`.
    async fn find_by_manager_email(
        &self,
        manager_email: &str,
    ) -> Result<CompanyRecord, CompaniesServiceError>;

    /// Whether a company is already registered for `manager_email`.
    async fn manager_email_exists(&self, manager_email: &str) -> Result<bool, CompaniesServiceError>;

    /// Retrieves a company by UUID.
    async fn get_company(&self, company: CompanyUuid) -> Result<CompanyRecord, CompaniesServiceError>;
}
