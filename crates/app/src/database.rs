//! Database connection management

use sqlx::{PgPool, Postgres, Transaction, query, query_scalar};
use thiserror::Error;

use crate::domain::companies::records::CompanyUuid;

/// SQL used to set tenant context for row-level security.
pub const SET_TENANT_CONTEXT_SQL: &str = "SELECT set_config('app.current_tenant_uuid', $1, true)";

const CURRENT_ROLE_BYPASSES_RLS_SQL: &str =
    "SELECT rolsuper OR rolbypassrls FROM pg_roles WHERE rolname = current_user";

/// Connection pool wrapper that scopes work to a tenant.
#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool, for queries that are not tenant scoped.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Begin a transaction and set tenant context for RLS policies.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction or setting tenant context fails.
    pub async fn begin_tenant_transaction(
        &self,
        tenant: CompanyUuid,
    ) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        query(SET_TENANT_CONTEXT_SQL)
            .bind(tenant.into_uuid().to_string())
            .execute(&mut *tx)
            .await?;

        Ok(tx)
    }
}

/// Errors raised when checking the runtime database role.
#[derive(Debug, Error)]
pub enum RoleCheckError {
    /// The role would see every tenant's rows.
    #[error("database role bypasses row-level security; run `pcm-app db ensure-app-role`")]
    BypassesRls,

    /// The check itself failed.
    #[error("failed to inspect database role")]
    Sql(#[from] sqlx::Error),
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}

/// Refuse to run tenant traffic as a role that ignores row-level security.
///
/// # Errors
///
/// Returns [`RoleCheckError::BypassesRls`] for superusers and `BYPASSRLS` roles.
pub async fn ensure_rls_enforced_role(pool: &PgPool) -> Result<(), RoleCheckError> {
    let bypasses: bool = query_scalar(CURRENT_ROLE_BYPASSES_RLS_SQL)
        .fetch_one(pool)
        .await?;

    if bypasses {
        return Err(RoleCheckError::BypassesRls);
    }

    Ok(())
}
