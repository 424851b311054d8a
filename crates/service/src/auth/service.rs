use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::domain::{AuthSession, LoginInput, PublicProfile, RegisterInput};
use super::errors::{AuthError, RepositoryError};
use super::password::{Argon2Hasher, CredentialHasher};
use super::repository::AuthRepository;

/// Auth service configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Password hashing work factor.
    pub hash_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { hash_cost: Argon2Hasher::DEFAULT_COST }
    }
}

/// Auth business service independent of web framework
#[derive(Clone)]
pub struct AuthService {
    repo: Arc<dyn AuthRepository>,
    hasher: Arc<dyn CredentialHasher>,
}

impl AuthService {
    /// Build the service with an Argon2 hasher at the configured work factor.
    pub fn new(repo: Arc<dyn AuthRepository>, cfg: AuthConfig) -> Result<Self, AuthError> {
        let hasher = Argon2Hasher::new(cfg.hash_cost)?;
        Ok(Self::with_hasher(repo, Arc::new(hasher)))
    }

    pub fn with_hasher(repo: Arc<dyn AuthRepository>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { repo, hasher }
    }

    /// Register a new user with a hashed password.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::RegisterInput;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo, AuthConfig { hash_cost: 1 }).unwrap();
    /// let input = RegisterInput { email: "user@example.com".into(), fullname: "Test".into(), password: "Secret123".into() };
    /// let user = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(user.email, "user@example.com");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<PublicProfile, AuthError> {
        let RegisterInput { email, fullname, password } = input;
        let hash = self.hash_off_thread(password).await?;

        // No existence pre-check: the store's unique index decides races.
        let user = match self.repo.create_user(&email, &fullname, &hash).await {
            Ok(user) => user,
            Err(RepositoryError::UniqueViolation(detail)) => {
                debug!(%detail, "email already registered");
                return Err(AuthError::EmailAlreadyExists);
            }
            Err(e) => return Err(AuthError::Repository(e)),
        };

        info!(user_id = %user.id, email = %user.email, "user_registered");
        Ok(user.profile())
    }

    /// Check a user's password and return their public profile.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::{RegisterInput, LoginInput};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo, AuthConfig { hash_cost: 1 }).unwrap();
    /// let registered = tokio_test::block_on(svc.register(RegisterInput { email: "u@e.com".into(), fullname: "N".into(), password: "Passw0rd".into() })).unwrap();
    /// let session = tokio_test::block_on(svc.login(LoginInput { email: "u@e.com".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(session.user_id, registered.user_id);
    /// assert_eq!(session.data.email, "u@e.com");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let LoginInput { email, password } = input;
        let Some(user) = self.repo.find_user_by_email(&email).await.map_err(AuthError::Repository)? else {
            debug!("login rejected");
            return Err(AuthError::InvalidCredentials);
        };

        if !self.verify_off_thread(password, user.password_hash.clone()).await? {
            debug!("login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        Ok(AuthSession::from(user.profile()))
    }

    async fn hash_off_thread(&self, password: String) -> Result<String, AuthError> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AuthError::Hash(e.to_string()))?
    }

    async fn verify_off_thread(&self, password: String, hash: String) -> Result<bool, AuthError> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| AuthError::Hash(e.to_string()))?
    }
}
