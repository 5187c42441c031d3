use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenIssuer;
use chrono::Utc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::LoginResponse;
use crate::domain::auth::models::RefreshedTokens;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::models::SessionHandle;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::FailureDelay;
use crate::domain::credential::models::Credential;
use crate::domain::credential::models::EmailAddress;
use crate::domain::credential::ports::CredentialStore;
use crate::domain::profile::models::AccountStatus;
use crate::domain::profile::models::Profile;
use crate::domain::profile::models::ProfileId;
use crate::domain::profile::models::ProfileUpdate;
use crate::domain::profile::ports::ProfileStore;
use crate::domain::session::models::Session;
use crate::domain::session::models::SessionFilter;
use crate::domain::session::models::SessionId;
use crate::domain::session::ports::SessionStore;
use crate::domain::transaction::StoreWrite;
use crate::domain::transaction::TransactionCoordinator;

/// Session lifecycle manager.
///
/// Orchestrates login, registration, refresh, and logout over the store
/// ports. Secrets, expiries, and hashing costs arrive packaged inside the
/// injected `TokenIssuer` and `PasswordHasher`; nothing here reads ambient
/// configuration.
pub struct AuthService<CS, PS, SS, TC, D>
where
    CS: CredentialStore,
    PS: ProfileStore,
    SS: SessionStore,
    TC: TransactionCoordinator,
    D: FailureDelay,
{
    credentials: Arc<CS>,
    profiles: Arc<PS>,
    sessions: Arc<SS>,
    coordinator: Arc<TC>,
    failure_delay: Arc<D>,
    token_issuer: TokenIssuer,
    password_hasher: PasswordHasher,
}

impl<CS, PS, SS, TC, D> AuthService<CS, PS, SS, TC, D>
where
    CS: CredentialStore,
    PS: ProfileStore,
    SS: SessionStore,
    TC: TransactionCoordinator,
    D: FailureDelay,
{
    /// Create a new lifecycle manager with injected dependencies.
    pub fn new(
        credentials: Arc<CS>,
        profiles: Arc<PS>,
        sessions: Arc<SS>,
        coordinator: Arc<TC>,
        failure_delay: Arc<D>,
        token_issuer: TokenIssuer,
        password_hasher: PasswordHasher,
    ) -> Self {
        Self {
            credentials,
            profiles,
            sessions,
            coordinator,
            failure_delay,
            token_issuer,
            password_hasher,
        }
    }

    /// Every invalid-credential exit goes through here so failure latency
    /// does not reveal which check rejected the attempt.
    async fn invalid_credentials(&self) -> AuthError {
        self.failure_delay.delay().await;
        AuthError::InvalidCredentials
    }

    /// Look up a credential by email and verify the password against its
    /// stored hash. Unknown email and wrong password are indistinguishable.
    async fn verify_credential(
        &self,
        email: &EmailAddress,
        password: &str,
    ) -> Result<Option<Credential>, AuthError> {
        let credential = match self.credentials.find_by_email(email).await? {
            Some(credential) => credential,
            None => return Ok(None),
        };

        let matches = self
            .password_hasher
            .verify(password, &credential.password_hash)
            .map_err(|e| AuthError::Storage(e.to_string()))?;

        Ok(matches.then_some(credential))
    }

    /// Look up a session and enforce its expiry, deleting expired sessions
    /// as a side effect (cleanup is lazy; there is no background sweep).
    async fn validate_session(&self, id: &SessionId) -> Result<Option<Session>, AuthError> {
        let session = match self.sessions.find_by_id(id).await? {
            Some(session) => session,
            None => {
                tracing::warn!(session_id = %id, "Session validation failed, session not found");
                return Ok(None);
            }
        };

        if session.is_expired(Utc::now()) {
            tracing::warn!(session_id = %id, "Session validation failed, session expired");
            self.sessions.remove(id).await?;
            return Ok(None);
        }

        Ok(Some(session))
    }
}

#[async_trait]
impl<CS, PS, SS, TC, D> AuthServicePort for AuthService<CS, PS, SS, TC, D>
where
    CS: CredentialStore,
    PS: ProfileStore,
    SS: SessionStore,
    TC: TransactionCoordinator,
    D: FailureDelay,
{
    async fn login(&self, command: LoginCommand) -> Result<LoginResponse, AuthError> {
        let email = match EmailAddress::new(command.email) {
            Ok(email) => email,
            Err(_) => {
                tracing::warn!("Login failed, unparseable email");
                return Err(self.invalid_credentials().await);
            }
        };

        tracing::info!(email = %email, "Login attempt");

        let credential = match self.verify_credential(&email, &command.password).await? {
            Some(credential) => credential,
            None => {
                tracing::warn!(email = %email, "Login failed, invalid credentials");
                return Err(self.invalid_credentials().await);
            }
        };

        let profile = self.profiles.find_by_id(&credential.account_id).await?;
        let profile = match profile.filter(Profile::is_active) {
            Some(profile) => profile,
            None => {
                tracing::warn!(email = %email, "Login failed, account inactive or missing");
                return Err(self.invalid_credentials().await);
            }
        };

        let session_id = SessionId::new();
        let account_id = credential.account_id.to_string();

        let access = self
            .token_issuer
            .mint_access(&account_id, email.as_str(), &session_id.to_string())
            .map_err(|e| AuthError::Storage(e.to_string()))?;
        let refresh = self
            .token_issuer
            .mint_refresh(&account_id, email.as_str(), &session_id.to_string())
            .map_err(|e| AuthError::Storage(e.to_string()))?;

        // Only the hash is stored; the raw refresh token never touches disk
        let refresh_token_hash = self
            .password_hasher
            .hash(&refresh.token)
            .map_err(|e| AuthError::Storage(e.to_string()))?;

        let session = Session {
            id: session_id,
            account_id: credential.account_id,
            refresh_token_hash,
            expires_at: refresh.expires_at,
            ip_address: command.ip_address,
            user_agent: command.user_agent,
            created_at: Utc::now(),
        };
        let handle = SessionHandle {
            id: session.id,
            expires_at: session.expires_at,
        };

        // Session creation and the login counter commit together or not at all
        self.coordinator
            .run(vec![
                StoreWrite::CreateSession(session),
                StoreWrite::UpdateProfile {
                    id: profile.id,
                    update: ProfileUpdate::login_count(profile.login_count + 1),
                },
            ])
            .await?;

        tracing::info!(session_id = %handle.id, account_id = %account_id, "Login succeeded");

        Ok(LoginResponse {
            access_token: access.token,
            refresh_token: refresh.token,
            session: handle,
        })
    }

    async fn register(&self, command: RegisterCommand) -> Result<(), AuthError> {
        let email = command.email;

        tracing::info!(email = %email, "Register attempt");

        if self.credentials.find_by_email(&email).await?.is_some() {
            tracing::warn!(email = %email, "Registration failed, email already in use");
            return Err(AuthError::EmailAlreadyInUse);
        }

        let password_hash = self
            .password_hasher
            .hash(&command.password)
            .map_err(|e| AuthError::Storage(e.to_string()))?;

        let profile = self
            .profiles
            .create(Profile::new(
                command.first_name,
                command.last_name,
                command.status.unwrap_or(AccountStatus::Active),
            ))
            .await?;

        let credential = Credential::new(profile.id, email, password_hash);

        match self.credentials.create(credential).await {
            Ok(_) => {
                tracing::info!(account_id = %profile.id, "Registered new account");
                Ok(())
            }
            Err(err) => {
                tracing::error!(account_id = %profile.id, error = %err, "Failed to create credential");

                // Compensating delete: the profile and credential are one
                // logical unit, and no transaction spans the two stores here.
                // The compensation's own failure is logged, not surfaced.
                if let Err(e) = self.profiles.remove(&profile.id).await {
                    tracing::error!(
                        account_id = %profile.id,
                        error = %e,
                        "Failed deleting profile after credential creation failure"
                    );
                }

                Err(err.into())
            }
        }
    }

    /// Three-outcome decision: match (reissue access token), mismatch
    /// (revoke, then fail), not-found-or-expired (fail). The refresh token
    /// itself is not rotated on use; it stays valid until its own expiry or
    /// an explicit logout. That is a weaker policy than rotate-on-use,
    /// preserved deliberately from the original design.
    async fn refresh(&self, refresh_token: &str) -> Result<RefreshedTokens, AuthError> {
        let claims = match self.token_issuer.verify_refresh(refresh_token) {
            Ok(claims) => claims,
            Err(e) => {
                // Expired, bad-signature, and malformed collapse externally
                tracing::warn!(error = %e, "Refresh token rejected");
                return Err(AuthError::InvalidRefreshToken);
            }
        };

        let session_id = match SessionId::from_string(&claims.sid) {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(error = %e, "Refresh token carries invalid session id");
                return Err(AuthError::InvalidRefreshToken);
            }
        };

        let session = match self.validate_session(&session_id).await? {
            Some(session) => session,
            None => return Err(AuthError::InvalidRefreshToken),
        };

        let matches = self
            .password_hasher
            .verify(refresh_token, &session.refresh_token_hash)
            .map_err(|e| AuthError::Storage(e.to_string()))?;

        if !matches {
            tracing::warn!(
                session_id = %session_id,
                "Refresh token does not match stored hash, possible token theft"
            );

            // Revoke before reporting failure. The conditional delete only
            // fires if the row still carries the hash this decision was
            // computed against, and its own failure must not mask the
            // invalid-refresh-token outcome.
            if let Err(e) = self
                .sessions
                .remove_matching(&session_id, &session.refresh_token_hash)
                .await
            {
                tracing::error!(
                    session_id = %session_id,
                    error = %e,
                    "Failed to revoke session after reuse detection"
                );
            }

            return Err(AuthError::InvalidRefreshToken);
        }

        let access = self
            .token_issuer
            .mint_access(&claims.sub, &claims.email, &claims.sid)
            .map_err(|e| AuthError::Storage(e.to_string()))?;

        tracing::info!(session_id = %session_id, "Access token reissued");

        Ok(RefreshedTokens {
            access_token: access.token,
        })
    }

    async fn logout(
        &self,
        session_id: &SessionId,
        account_id: &ProfileId,
    ) -> Result<(), AuthError> {
        tracing::info!(session_id = %session_id, "Logout requested");

        // Scoped to both ids so one account cannot log out another's session
        let filter = SessionFilter {
            id: Some(*session_id),
            account_id: Some(*account_id),
        };

        let session = match self.sessions.find_one(&filter).await? {
            Some(session) => session,
            None => {
                tracing::warn!(session_id = %session_id, "Logout failed, session not found");
                return Err(AuthError::SessionNotFound);
            }
        };

        self.sessions.remove(&session.id).await?;

        tracing::info!(session_id = %session_id, "Session deleted");

        Ok(())
    }

    async fn logout_all(&self, account_id: &ProfileId) -> Result<u64, AuthError> {
        let removed = self.sessions.remove_all_for_account(account_id).await?;

        tracing::info!(account_id = %account_id, removed, "All sessions deleted for account");

        Ok(removed)
    }
}
