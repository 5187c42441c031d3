use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::HashingParams;
use auth::PasswordHasher;
use auth::TokenIssuer;
use chrono::Duration;
use chrono::Utc;
use identity_service::domain::auth::errors::AuthError;
use identity_service::domain::auth::models::LoginCommand;
use identity_service::domain::auth::models::LoginResponse;
use identity_service::domain::auth::models::RegisterCommand;
use identity_service::domain::auth::ports::AuthServicePort;
use identity_service::domain::auth::ports::FailureDelay;
use identity_service::domain::auth::service::AuthService;
use identity_service::domain::credential::errors::CredentialError;
use identity_service::domain::credential::models::Credential;
use identity_service::domain::credential::models::EmailAddress;
use identity_service::domain::credential::ports::CredentialStore;
use identity_service::domain::profile::errors::ProfileError;
use identity_service::domain::profile::models::AccountStatus;
use identity_service::domain::profile::models::Profile;
use identity_service::domain::profile::models::ProfileId;
use identity_service::domain::profile::models::ProfileUpdate;
use identity_service::domain::profile::ports::ProfileStore;
use identity_service::domain::session::errors::SessionError;
use identity_service::domain::session::models::Session;
use identity_service::domain::session::models::SessionFilter;
use identity_service::domain::session::models::SessionId;
use identity_service::domain::session::ports::SessionStore;
use identity_service::domain::transaction::StoreWrite;
use identity_service::domain::transaction::TransactionCoordinator;
use identity_service::domain::transaction::TransactionError;
use uuid::Uuid;

pub const ACCESS_SECRET: &[u8] = b"access_secret_at_least_32_bytes_long!";
pub const REFRESH_SECRET: &[u8] = b"refresh_secret_at_least_32_bytes_long";

/// In-memory implementation of every store port plus the coordinator.
///
/// Substitutes for the Postgres adapters in lifecycle tests; also supports
/// injecting failures to exercise the compensation paths.
#[derive(Default)]
pub struct InMemoryStores {
    profiles: Mutex<HashMap<Uuid, Profile>>,
    credentials: Mutex<HashMap<String, Credential>>,
    sessions: Mutex<HashMap<Uuid, Session>>,
    fail_next_commit: AtomicBool,
    fail_next_credential_create: AtomicBool,
}

impl InMemoryStores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn profile(&self, id: &ProfileId) -> Option<Profile> {
        self.profiles.lock().unwrap().get(&id.0).cloned()
    }

    pub fn profile_count(&self) -> usize {
        self.profiles.lock().unwrap().len()
    }

    pub fn account_id_by_email(&self, email: &str) -> Option<ProfileId> {
        self.credentials
            .lock()
            .unwrap()
            .get(&email.to_lowercase())
            .map(|credential| credential.account_id)
    }

    pub fn session_exists(&self, id: &SessionId) -> bool {
        self.sessions.lock().unwrap().contains_key(&id.0)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    /// Backdate a session's expiry so lazy cleanup can be observed.
    pub fn expire_session(&self, id: &SessionId) {
        if let Some(session) = self.sessions.lock().unwrap().get_mut(&id.0) {
            session.expires_at = Utc::now() - Duration::hours(1);
        }
    }

    /// Replace a session's stored hash, simulating a rotation that happened
    /// elsewhere and turned the caller's token stale.
    pub fn supersede_session_hash(&self, id: &SessionId, hash: &str) {
        if let Some(session) = self.sessions.lock().unwrap().get_mut(&id.0) {
            session.refresh_token_hash = hash.to_string();
        }
    }

    pub fn fail_next_commit(&self) {
        self.fail_next_commit.store(true, Ordering::SeqCst);
    }

    pub fn fail_next_credential_create(&self) {
        self.fail_next_credential_create.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl CredentialStore for InMemoryStores {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Credential>, CredentialError> {
        Ok(self.credentials.lock().unwrap().get(email.as_str()).cloned())
    }

    async fn create(&self, credential: Credential) -> Result<Credential, CredentialError> {
        if self.fail_next_credential_create.swap(false, Ordering::SeqCst) {
            return Err(CredentialError::DatabaseError(
                "injected credential failure".to_string(),
            ));
        }

        let mut credentials = self.credentials.lock().unwrap();
        if credentials.contains_key(credential.email.as_str()) {
            return Err(CredentialError::EmailAlreadyExists(
                credential.email.as_str().to_string(),
            ));
        }

        credentials.insert(credential.email.as_str().to_string(), credential.clone());
        Ok(credential)
    }
}

#[async_trait]
impl ProfileStore for InMemoryStores {
    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, ProfileError> {
        Ok(self.profiles.lock().unwrap().get(&id.0).cloned())
    }

    async fn create(&self, profile: Profile) -> Result<Profile, ProfileError> {
        self.profiles
            .lock()
            .unwrap()
            .insert(profile.id.0, profile.clone());
        Ok(profile)
    }

    async fn update(
        &self,
        id: &ProfileId,
        update: ProfileUpdate,
    ) -> Result<Profile, ProfileError> {
        let mut profiles = self.profiles.lock().unwrap();
        let profile = profiles
            .get_mut(&id.0)
            .ok_or_else(|| ProfileError::NotFound(id.to_string()))?;

        apply_profile_update(profile, update);
        Ok(profile.clone())
    }

    async fn remove(&self, id: &ProfileId) -> Result<(), ProfileError> {
        self.profiles.lock().unwrap().remove(&id.0);
        Ok(())
    }
}

fn apply_profile_update(profile: &mut Profile, update: ProfileUpdate) {
    if let Some(first_name) = update.first_name {
        profile.first_name = first_name;
    }
    if let Some(last_name) = update.last_name {
        profile.last_name = last_name;
    }
    if let Some(status) = update.status {
        profile.status = status;
    }
    if let Some(login_count) = update.login_count {
        profile.login_count = login_count;
    }
}

#[async_trait]
impl SessionStore for InMemoryStores {
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, SessionError> {
        Ok(self.sessions.lock().unwrap().get(&id.0).cloned())
    }

    async fn find_one(&self, filter: &SessionFilter) -> Result<Option<Session>, SessionError> {
        let sessions = self.sessions.lock().unwrap();
        Ok(sessions
            .values()
            .find(|session| {
                filter.id.map_or(true, |id| session.id == id)
                    && filter
                        .account_id
                        .map_or(true, |account_id| session.account_id == account_id)
            })
            .cloned())
    }

    async fn create(&self, session: Session) -> Result<(), SessionError> {
        self.sessions.lock().unwrap().insert(session.id.0, session);
        Ok(())
    }

    async fn remove(&self, id: &SessionId) -> Result<bool, SessionError> {
        Ok(self.sessions.lock().unwrap().remove(&id.0).is_some())
    }

    async fn remove_matching(
        &self,
        id: &SessionId,
        refresh_token_hash: &str,
    ) -> Result<bool, SessionError> {
        let mut sessions = self.sessions.lock().unwrap();
        match sessions.get(&id.0) {
            Some(session) if session.refresh_token_hash == refresh_token_hash => {
                sessions.remove(&id.0);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn remove_all_for_account(&self, account_id: &ProfileId) -> Result<u64, SessionError> {
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|_, session| session.account_id != *account_id);
        Ok((before - sessions.len()) as u64)
    }
}

#[async_trait]
impl TransactionCoordinator for InMemoryStores {
    async fn run(&self, writes: Vec<StoreWrite>) -> Result<(), TransactionError> {
        if self.fail_next_commit.swap(false, Ordering::SeqCst) {
            return Err(TransactionError::DatabaseError(
                "injected commit failure".to_string(),
            ));
        }

        let mut profiles = self.profiles.lock().unwrap();
        let mut sessions = self.sessions.lock().unwrap();

        // Validate everything before touching state so a failing write set
        // commits nothing
        for write in &writes {
            if let StoreWrite::UpdateProfile { id, .. } = write {
                if !profiles.contains_key(&id.0) {
                    return Err(TransactionError::ProfileNotFound(id.to_string()));
                }
            }
        }

        for write in writes {
            match write {
                StoreWrite::CreateSession(session) => {
                    sessions.insert(session.id.0, session);
                }
                StoreWrite::UpdateProfile { id, update } => {
                    if let Some(profile) = profiles.get_mut(&id.0) {
                        apply_profile_update(profile, update);
                    }
                }
            }
        }

        Ok(())
    }
}

/// Counting no-op delay so tests can assert the anti-enumeration delay was
/// imposed without waiting on the clock.
#[derive(Default)]
pub struct CountingDelay {
    invocations: AtomicUsize,
}

impl CountingDelay {
    pub fn invocations(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FailureDelay for CountingDelay {
    async fn delay(&self) {
        self.invocations.fetch_add(1, Ordering::SeqCst);
    }
}

pub type TestService =
    AuthService<InMemoryStores, InMemoryStores, InMemoryStores, InMemoryStores, CountingDelay>;

/// Fully wired lifecycle manager over in-memory stores.
pub struct TestApp {
    pub service: TestService,
    pub stores: Arc<InMemoryStores>,
    pub delay: Arc<CountingDelay>,
}

impl TestApp {
    pub fn new() -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("identity_service=debug")
            .with_test_writer()
            .try_init();

        let stores = Arc::new(InMemoryStores::new());
        let delay = Arc::new(CountingDelay::default());

        let service = AuthService::new(
            Arc::clone(&stores),
            Arc::clone(&stores),
            Arc::clone(&stores),
            Arc::clone(&stores),
            Arc::clone(&delay),
            token_issuer(),
            password_hasher(),
        );

        Self {
            service,
            stores,
            delay,
        }
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<(), AuthError> {
        self.register_with_status(email, password, None).await
    }

    pub async fn register_with_status(
        &self,
        email: &str,
        password: &str,
        status: Option<AccountStatus>,
    ) -> Result<(), AuthError> {
        self.service
            .register(RegisterCommand {
                email: EmailAddress::new(email.to_string()).expect("valid test email"),
                password: password.to_string(),
                first_name: "Alice".to_string(),
                last_name: "A".to_string(),
                status,
            })
            .await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AuthError> {
        self.service
            .login(LoginCommand {
                email: email.to_string(),
                password: password.to_string(),
                ip_address: "203.0.113.7".to_string(),
                user_agent: "lifecycle-tests".to_string(),
            })
            .await
    }
}

/// Issuer sharing the test secrets, for decoding tokens in assertions.
pub fn token_issuer() -> TokenIssuer {
    TokenIssuer::new(
        ACCESS_SECRET,
        REFRESH_SECRET,
        Duration::minutes(15),
        Duration::days(7),
    )
}

// Low-cost parameters keep Argon2 fast in tests
pub fn password_hasher() -> PasswordHasher {
    PasswordHasher::new(&HashingParams {
        memory_cost_kib: 8,
        time_cost: 1,
        parallelism: 1,
        output_len: 32,
    })
    .expect("test hashing params are valid")
}
