//! Auth service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    auth::{
        AuthServiceError, IdentityProvider, IssuedSession, ParsedSessionToken, Registration,
        SessionTokenVersion, build_verifier_input, format_session_token, generate_session_secret,
        hash_verifier,
        models::{ActiveSession, NewSession},
        parse_session_token,
        repository::PgAuthRepository,
    },
    domain::companies::{
        CompaniesService,
        data::NewCompany,
        records::{CompanyRecord, CompanyUuid, normalize_email},
    },
};

/// How long a login session stays valid.
pub const DEFAULT_SESSION_TTL: SignedDuration = SignedDuration::from_hours(30 * 24);

#[derive(Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
    companies: Arc<dyn CompaniesService>,
    identity: Arc<dyn IdentityProvider>,
    session_ttl: SignedDuration,
}

impl PgAuthService {
    #[must_use]
    pub fn new(
        pool: PgPool,
        companies: Arc<dyn CompaniesService>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
            companies,
            identity,
            session_ttl: DEFAULT_SESSION_TTL,
        }
    }

    #[must_use]
    pub fn with_session_ttl(mut self, session_ttl: SignedDuration) -> Self {
        self.session_ttl = session_ttl;
        self
    }

    /// Issue a new session token for the given company.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insertion fails.
    pub async fn issue_session(
        &self,
        tenant_uuid: CompanyUuid,
    ) -> Result<IssuedSession, AuthServiceError> {
        let session_uuid = Uuid::now_v7();
        let version = SessionTokenVersion::V1;
        let secret = generate_session_secret();
        let token = format_session_token(session_uuid, version, &secret);

        let token_hash = hash_verifier(&build_verifier_input(
            &session_uuid,
            version,
            &tenant_uuid,
            &secret,
        ));

        let expires_at = Timestamp::now().checked_add(self.session_ttl).ok();

        let metadata = self
            .repository
            .create_session(&NewSession {
                uuid: session_uuid,
                tenant_uuid,
                version,
                token_hash,
                expires_at,
            })
            .await?;

        Ok(IssuedSession { token, metadata })
    }

    /// Parse `bearer_token` and find the live session it proves.
    async fn verify(
        &self,
        bearer_token: &str,
    ) -> Result<(ParsedSessionToken, ActiveSession), AuthServiceError> {
        let parsed = parse_session_token(bearer_token).map_err(|_error| AuthServiceError::NotFound)?;

        let session = self
            .repository
            .find_active_session(parsed.session_uuid, parsed.version)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        let expected = hash_verifier(&build_verifier_input(
            &parsed.session_uuid,
            parsed.version,
            &session.tenant_uuid,
            &parsed.secret,
        ));

        if expected != session.token_hash {
            return Err(AuthServiceError::NotFound);
        }

        Ok((parsed, session))
    }
}

impl std::fmt::Debug for PgAuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgAuthService")
            .field("repository", &self.repository)
            .field("session_ttl", &self.session_ttl)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn register(&self, registration: Registration) -> Result<CompanyRecord, AuthServiceError> {
        let manager_email = normalize_email(&registration.manager_email);

        if registration.company_name.trim().is_empty() || manager_email.is_empty() {
            return Err(AuthServiceError::Validation(
                "company name and manager email are required",
            ));
        }

        if registration.password.is_empty() {
            return Err(AuthServiceError::Validation("password is required"));
        }

        if self.companies.manager_email_exists(&manager_email).await? {
            return Err(AuthServiceError::AlreadyRegistered);
        }

        let account = self
            .identity
            .sign_up(&manager_email, &registration.password)
            .await?;

        let company = self
            .companies
            .create_company(NewCompany {
                uuid: CompanyUuid::new(),
                name: registration.company_name,
                manager_email,
                plan: registration.plan,
            })
            .await?;

        info!(
            company = %company.uuid,
            identity = %account.user_id,
            "registered company"
        );

        Ok(company)
    }

    async fn login(&self, email: &str, password: &str) -> Result<IssuedSession, AuthServiceError> {
        let manager_email = normalize_email(email);

        self.identity.sign_in(&manager_email, password).await?;

        let company = self.companies.find_by_manager_email(&manager_email).await?;

        self.issue_session(company.uuid).await
    }

    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<CompanyUuid, AuthServiceError> {
        let (parsed, session) = self.verify(bearer_token).await?;

        // Auth success does not depend on this write.
        if let Err(error) = self.repository.touch_session(parsed.session_uuid).await {
            warn!(%error, "failed to record session use");
        }

        Ok(session.tenant_uuid)
    }

    async fn logout(&self, bearer_token: &str) -> Result<(), AuthServiceError> {
        let (parsed, session) = self.verify(bearer_token).await?;

        self.repository
            .revoke_session(parsed.session_uuid)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        info!(company = %session.tenant_uuid, "session revoked");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create the identity account and the company it manages.
    async fn register(&self, registration: Registration) -> Result<CompanyRecord, AuthServiceError>;

    /// Sign in and issue a session token.
    async fn login(&self, email: &str, password: &str) -> Result<IssuedSession, AuthServiceError>;

    /// Resolve a bearer token to the company it was issued for.
    async fn authenticate_bearer(&self, bearer_token: &str)
    -> Result<CompanyUuid, AuthServiceError>;

    /// Revoke the session behind a bearer token.
    async fn logout(&self, bearer_token: &str) -> Result<(), AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        auth::{IdentityAccount, IdentityError, MockIdentityProvider},
        domain::companies::{PgCompaniesService, records::SubscriptionPlan},
        test::TestContext,
    };

    use super::*;

    fn account(email: &str) -> IdentityAccount {
        IdentityAccount {
            user_id: "uid-1".to_string(),
            email: email.to_string(),
        }
    }

    fn registration(email: &str) -> Registration {
        Registration {
            company_name: "Metalurgica Sul".to_string(),
            manager_email: email.to_string(),
            password: "s3cret!".to_string(),
            plan: SubscriptionPlan::Professional,
        }
    }

    fn service(ctx: &TestContext, identity: MockIdentityProvider) -> PgAuthService {
        let pool = ctx.db.pool().clone();

        PgAuthService::new(
            pool.clone(),
            Arc::new(PgCompaniesService::new(pool)),
            Arc::new(identity),
        )
    }

    #[tokio::test]
    async fn register_creates_company_with_normalized_email() -> TestResult {
        let ctx = TestContext::new().await;
        let mut identity = MockIdentityProvider::new();

        identity
            .expect_sign_up()
            .once()
            .withf(|email, password| email == "boss@sul.com" && password == "s3cret!")
            .return_once(|email, _| Ok(account(email)));

        let company = service(&ctx, identity)
            .register(registration("  Boss@Sul.com "))
            .await?;

        assert_eq!(company.manager_email, "boss@sul.com");
        assert_eq!(company.plan, SubscriptionPlan::Professional);

        Ok(())
    }

    #[tokio::test]
    async fn register_rejects_known_email_before_identity_call() -> TestResult {
        let ctx = TestContext::new().await;
        let mut identity = MockIdentityProvider::new();

        identity
            .expect_sign_up()
            .once()
            .return_once(|email, _| Ok(account(email)));

        let service = service(&ctx, identity);

        service.register(registration("boss@sul.com")).await?;

        let result = service.register(registration("BOSS@sul.com")).await;

        assert!(
            matches!(result, Err(AuthServiceError::AlreadyRegistered)),
            "expected AlreadyRegistered, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn login_issues_token_that_authenticates() -> TestResult {
        let ctx = TestContext::new().await;
        let mut identity = MockIdentityProvider::new();

        identity
            .expect_sign_up()
            .once()
            .return_once(|email, _| Ok(account(email)));
        identity
            .expect_sign_in()
            .once()
            .return_once(|email, _| Ok(account(email)));

        let service = service(&ctx, identity);
        let company = service.register(registration("boss@sul.com")).await?;

        let issued = service.login("boss@sul.com", "s3cret!").await?;

        assert!(issued.token.starts_with("pcm_v1_"));
        assert_eq!(issued.metadata.tenant_uuid, company.uuid);
        assert!(issued.metadata.expires_at.is_some());

        let tenant = service.authenticate_bearer(&issued.token).await?;

        assert_eq!(tenant, company.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn login_with_bad_password_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let mut identity = MockIdentityProvider::new();

        identity
            .expect_sign_in()
            .once()
            .return_once(|_, _| Err(IdentityError::InvalidCredentials));

        let result = service(&ctx, identity).login("boss@sul.com", "wrong").await;

        assert!(
            matches!(result, Err(AuthServiceError::InvalidCredentials)),
            "expected InvalidCredentials, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn login_without_company_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let mut identity = MockIdentityProvider::new();

        identity
            .expect_sign_in()
            .once()
            .return_once(|email, _| Ok(account(email)));

        let result = service(&ctx, identity)
            .login("nobody@nowhere.com", "s3cret!")
            .await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn logout_revokes_the_session() -> TestResult {
        let ctx = TestContext::new().await;
        let service = service(&ctx, MockIdentityProvider::new());
        let issued = service.issue_session(ctx.tenant_uuid).await?;

        service.logout(&issued.token).await?;

        let result = service.authenticate_bearer(&issued.token).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound after logout, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn tampered_secret_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let service = service(&ctx, MockIdentityProvider::new());
        let issued = service.issue_session(ctx.tenant_uuid).await?;

        let (id, _secret) = issued.token.split_once('.').ok_or("token has no secret")?;
        let forged = format!("{id}.{}", "A".repeat(43));

        let result = service.authenticate_bearer(&forged).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn expired_session_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let service = service(&ctx, MockIdentityProvider::new())
            .with_session_ttl(SignedDuration::from_secs(-60));
        let issued = service.issue_session(ctx.tenant_uuid).await?;

        let result = service.authenticate_bearer(&issued.token).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound for expired session, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn malformed_token_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let result = service(&ctx, MockIdentityProvider::new())
            .authenticate_bearer("not-a-token")
            .await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }
}
