use async_trait::async_trait;

use super::domain::UserRecord;
use super::errors::RepositoryError;

/// Credential store adapter: the only path from the service to persisted users.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// Insert a user atomically; a taken email yields [`RepositoryError::UniqueViolation`]
    /// and leaves no record behind.
    async fn create_user(&self, email: &str, fullname: &str, password_hash: &str) -> Result<UserRecord, RepositoryError>;
    /// Absence is `Ok(None)`, not an error.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, RepositoryError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;
    use uuid::Uuid;

    #[derive(Default)]
    pub struct MockAuthRepository {
        users: Mutex<HashMap<String, UserRecord>>, // key: email
        unavailable: AtomicBool,
    }

    impl MockAuthRepository {
        /// Make every subsequent call fail as if the datastore were down.
        pub fn set_unavailable(&self, down: bool) {
            self.unavailable.store(down, Ordering::SeqCst);
        }

        /// Number of stored users. Panics on a poisoned lock so a test never reads a false zero.
        pub fn len(&self) -> usize {
            self.users.lock().expect("mock user map poisoned").len()
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }

        fn check_available(&self) -> Result<(), RepositoryError> {
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(RepositoryError::Unavailable("connection refused".into()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn create_user(&self, email: &str, fullname: &str, password_hash: &str) -> Result<UserRecord, RepositoryError> {
            self.check_available()?;
            let mut users = self.users.lock().map_err(|e| RepositoryError::Unavailable(e.to_string()))?;
            if users.contains_key(email) {
                return Err(RepositoryError::UniqueViolation(format!("email {email}")));
            }
            let user = UserRecord {
                id: Uuid::new_v4(),
                email: email.to_string(),
                fullname: fullname.to_string(),
                password_hash: password_hash.to_string(),
            };
            users.insert(email.to_string(), user.clone());
            Ok(user)
        }

        async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, RepositoryError> {
            self.check_available()?;
            let users = self.users.lock().map_err(|e| RepositoryError::Unavailable(e.to_string()))?;
            Ok(users.get(email).cloned())
        }
    }

}
