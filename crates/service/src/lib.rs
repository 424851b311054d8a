//! Service layer holding the credential business rules.
//! - Separates business logic from data access (`auth::repository`).
//! - Owns password hashing and the mapping of store failures to business errors.
//! - Provides clear error types and documented interfaces.

pub mod auth;
#[cfg(test)]
pub mod test_support;
