use clap::Args;
use pcm_app::{
    auth::{PgAuthRepository, parse_session_token},
    database,
};

#[derive(Debug, Args)]
pub(crate) struct RevokeSessionArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Session token to revoke
    #[arg(long, env = "PCM_SESSION_TOKEN", hide_env_values = true)]
    token: String,
}

pub(crate) async fn run(args: RevokeSessionArgs) -> Result<(), String> {
    let parsed = parse_session_token(args.token.trim())
        .map_err(|error| format!("invalid session token: {error}"))?;

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let repository = PgAuthRepository::new(pool);

    let revoked = repository
        .revoke_session(parsed.session_uuid)
        .await
        .map_err(|error| format!("failed to revoke session: {error}"))?
        .is_some();

    if revoked {
        println!("revoked session {}", parsed.session_uuid);
    } else {
        println!("session {} was not active", parsed.session_uuid);
    }

    Ok(())
}
