use clap::Args;
use pcm_app::database;
use sqlx::{Postgres, Transaction, query, query_scalar};

/// Flags that keep the runtime role subject to row-level security.
const ROLE_FLAGS: &str = "LOGIN NOSUPERUSER NOCREATEDB NOCREATEROLE NOREPLICATION NOBYPASSRLS";

#[derive(Debug, Args)]
pub(crate) struct EnsureAppRoleArgs {
    /// Administrative PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Application runtime role name
    #[arg(long, default_value = "pcm_app")]
    role_name: String,

    /// Application role password
    #[arg(long, env = "APP_DB_PASSWORD", hide_env_values = true)]
    password: String,
}

pub(crate) async fn run(args: EnsureAppRoleArgs) -> Result<(), String> {
    if args.role_name.trim().is_empty() {
        return Err("role_name cannot be empty".to_string());
    }

    if args.password.trim().is_empty() {
        return Err("password cannot be empty".to_string());
    }

    // CREATE ROLE and GRANT need an administrative connection.
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let mut tx = pool
        .begin()
        .await
        .map_err(|error| format!("failed to start transaction: {error}"))?;

    let created = upsert_role(&mut tx, &args.role_name, &args.password).await?;

    let role = quote(&mut tx, "SELECT quote_ident($1)", &args.role_name).await?;

    let database: String = query_scalar("SELECT quote_ident(current_database())")
        .fetch_one(&mut *tx)
        .await
        .map_err(|error| format!("failed to resolve database name: {error}"))?;

    for statement in grant_statements(&database, &role) {
        query(&statement)
            .execute(&mut *tx)
            .await
            .map_err(|error| format!("failed to apply `{statement}`: {error}"))?;
    }

    tx.commit()
        .await
        .map_err(|error| format!("failed to commit changes: {error}"))?;

    let action = if created { "created" } else { "updated" };

    println!("{action} app role: {}", args.role_name);
    println!("granted table access on the public schema of {database}");

    Ok(())
}

/// Create the role or reset its flags and password; returns whether it was created.
async fn upsert_role(
    tx: &mut Transaction<'_, Postgres>,
    role_name: &str,
    password: &str,
) -> Result<bool, String> {
    // Identifiers cannot be bound as parameters, so the server quotes them first.
    let role = quote(tx, "SELECT quote_ident($1)", role_name).await?;
    let password = quote(tx, "SELECT quote_literal($1)", password).await?;

    let exists: bool = query_scalar("SELECT EXISTS (SELECT 1 FROM pg_roles WHERE rolname = $1)")
        .bind(role_name)
        .fetch_one(&mut **tx)
        .await
        .map_err(|error| format!("failed to check role existence: {error}"))?;

    let verb = if exists { "ALTER" } else { "CREATE" };

    query(&format!("{verb} ROLE {role} {ROLE_FLAGS} PASSWORD {password}"))
        .execute(&mut **tx)
        .await
        .map_err(|error| format!("failed to {} role: {error}", verb.to_lowercase()))?;

    Ok(!exists)
}

async fn quote(
    tx: &mut Transaction<'_, Postgres>,
    quote_sql: &'static str,
    value: &str,
) -> Result<String, String> {
    query_scalar(quote_sql)
        .bind(value)
        .fetch_one(&mut **tx)
        .await
        .map_err(|error| format!("failed to quote value: {error}"))
}

/// Privileges the runtime role needs now and on tables created by later migrations.
fn grant_statements(database: &str, role: &str) -> Vec<String> {
    vec![
        format!("GRANT CONNECT ON DATABASE {database} TO {role}"),
        format!("GRANT USAGE ON SCHEMA public TO {role}"),
        format!("GRANT SELECT, INSERT, UPDATE, DELETE ON ALL TABLES IN SCHEMA public TO {role}"),
        format!(
            "ALTER DEFAULT PRIVILEGES IN SCHEMA public GRANT SELECT, INSERT, UPDATE, DELETE ON TABLES TO {role}"
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grants_cover_database_schema_and_future_tables() {
        let statements = grant_statements("\"pcm\"", "pcm_app");

        assert_eq!(statements.len(), 4);
        assert!(statements.iter().all(|statement| statement.contains("pcm_app")));
        assert!(
            statements
                .iter()
                .any(|statement| statement.starts_with("ALTER DEFAULT PRIVILEGES"))
        );
    }

    #[test]
    fn role_flags_forbid_rls_bypass() {
        assert!(ROLE_FLAGS.contains("NOBYPASSRLS"));
        assert!(ROLE_FLAGS.contains("NOSUPERUSER"));
    }
}
