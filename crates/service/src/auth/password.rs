//! Salted one-way password hashing.

use argon2::{
    password_hash::{self, PasswordHasher as _, PasswordVerifier as _, SaltString},
    Algorithm, Argon2, Params, PasswordHash, Version,
};
use rand::rngs::OsRng;

use super::errors::AuthError;

/// Hashing primitive used for both storing and checking passwords.
///
/// Implementations are CPU-bound; callers run them off the async executor.
pub trait CredentialHasher: Send + Sync {
    /// Produce a self-describing salted hash of `password`.
    fn hash(&self, password: &str) -> Result<String, AuthError>;
    /// `Ok(false)` on mismatch; `Err` only when `hash` is unreadable.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Argon2id in PHC string format. The work factor is the iteration count.
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
}

impl Argon2Hasher {
    pub const DEFAULT_COST: u32 = 10;

    pub fn new(cost: u32) -> Result<Self, AuthError> {
        let params = Params::new(Params::DEFAULT_M_COST, cost, Params::DEFAULT_P_COST, None)
            .map_err(|e| AuthError::Hash(e.to_string()))?;
        Ok(Self { argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params) })
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::Hash(e.to_string()))?
            .to_string();
        Ok(hash)
    }

    // Parameters are read back from the PHC string, so hashes made under an
    // older work factor keep verifying.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(hash).map_err(|e| AuthError::Hash(e.to_string()))?;
        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AuthError::Hash(e.to_string())),
        }
    }
}

/// Instrumented hasher for tests and doc examples
pub mod mock {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Wraps another hasher and counts calls.
    pub struct CountingHasher<H> {
        inner: H,
        hashes: AtomicUsize,
        verifies: AtomicUsize,
    }

    impl<H: CredentialHasher> CountingHasher<H> {
        pub fn new(inner: H) -> Self {
            Self { inner, hashes: AtomicUsize::new(0), verifies: AtomicUsize::new(0) }
        }

        pub fn hash_calls(&self) -> usize { self.hashes.load(Ordering::SeqCst) }

        pub fn verify_calls(&self) -> usize { self.verifies.load(Ordering::SeqCst) }
    }

    impl<H: CredentialHasher> CredentialHasher for CountingHasher<H> {
        fn hash(&self, password: &str) -> Result<String, AuthError> {
            self.hashes.fetch_add(1, Ordering::SeqCst);
            self.inner.hash(password)
        }

        fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
            self.verifies.fetch_add(1, Ordering::SeqCst);
            self.inner.verify(password, hash)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast() -> Argon2Hasher {
        Argon2Hasher::new(1).unwrap()
    }

    #[test]
    fn hash_is_salted_phc_string() {
        let h = fast();
        let a = h.hash("password123").unwrap();
        let b = h.hash("password123").unwrap();
        assert!(a.starts_with("$argon2id$"));
        assert_ne!(a, b);
        assert!(!a.contains("password123"));
    }

    #[test]
    fn verify_matches_only_the_hashed_password() {
        let h = fast();
        let hash = h.hash("password123").unwrap();
        assert!(h.verify("password123", &hash).unwrap());
        assert!(!h.verify("password124", &hash).unwrap());
    }

    #[test]
    fn verify_reads_cost_from_stored_hash() {
        let old = Argon2Hasher::new(2).unwrap().hash("password123").unwrap();
        assert!(fast().verify("password123", &old).unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error_not_a_mismatch() {
        assert!(matches!(fast().verify("password123", "not-a-hash"), Err(AuthError::Hash(_))));
    }

    #[test]
    fn zero_cost_is_rejected() {
        assert!(Argon2Hasher::new(0).is_err());
    }

    #[test]
    fn counting_hasher_counts() {
        let h = mock::CountingHasher::new(fast());
        let hash = h.hash("password123").unwrap();
        let _ = h.verify("password123", &hash).unwrap();
        let _ = h.verify("nope-nope", &hash).unwrap();
        assert_eq!(h.hash_calls(), 1);
        assert_eq!(h.verify_calls(), 2);
    }
}
