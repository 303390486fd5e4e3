//! App Context

use std::sync::Arc;

use pcm::policy::{MaintenancePolicy, PolicyError};
use thiserror::Error;

use crate::{
    auth::{AuthService, IdentityClient, IdentityConfig, PgAuthService},
    database::{self, Db, RoleCheckError},
    domain::{
        companies::{CompaniesService, PgCompaniesService},
        equipment::{EquipmentService, PgEquipmentService},
        metrics::{MetricsService, StoreMetricsService},
        work_orders::{PgWorkOrdersService, WorkOrdersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("database role is not safe for tenant traffic")]
    Role(#[source] RoleCheckError),

    #[error("invalid maintenance policy")]
    Policy(#[source] PolicyError),
}

#[derive(Clone)]
pub struct AppContext {
    pub companies: Arc<dyn CompaniesService>,
    pub equipment: Arc<dyn EquipmentService>,
    pub work_orders: Arc<dyn WorkOrdersService>,
    pub metrics: Arc<dyn MetricsService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails, when the
    /// connecting role bypasses row-level security, or when `policy` is inconsistent.
    pub async fn from_database_url(
        url: &str,
        identity: IdentityConfig,
        policy: MaintenancePolicy,
    ) -> Result<Self, AppInitError> {
        policy.validate().map_err(AppInitError::Policy)?;

        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::ensure_rls_enforced_role(&pool)
            .await
            .map_err(AppInitError::Role)?;

        let db = Db::new(pool.clone());

        let companies: Arc<dyn CompaniesService> = Arc::new(PgCompaniesService::new(pool.clone()));
        let equipment: Arc<dyn EquipmentService> = Arc::new(PgEquipmentService::new(db.clone()));
        let work_orders: Arc<dyn WorkOrdersService> = Arc::new(PgWorkOrdersService::new(db));

        Ok(Self {
            metrics: Arc::new(StoreMetricsService::new(
                equipment.clone(),
                work_orders.clone(),
                policy,
            )),
            auth: Arc::new(PgAuthService::new(
                pool,
                companies.clone(),
                Arc::new(IdentityClient::new(identity)),
            )),
            companies,
            equipment,
            work_orders,
        })
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}
