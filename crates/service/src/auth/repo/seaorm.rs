use sea_orm::DatabaseConnection;

use models::errors::ModelError;
use crate::auth::domain::UserRecord;
use crate::auth::errors::RepositoryError;
use crate::auth::repository::AuthRepository;

/// Postgres-backed adapter. Holds a handle to the shared pool, not a connection of its own.
#[derive(Clone)]
pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmAuthRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn to_record(u: models::user::Model) -> UserRecord {
    UserRecord { id: u.id, email: u.email, fullname: u.fullname, password_hash: u.password_hash }
}

fn map_model_err(e: ModelError) -> RepositoryError {
    match e {
        ModelError::UniqueViolation(detail) => RepositoryError::UniqueViolation(detail),
        ModelError::Db(msg) => RepositoryError::Unavailable(msg),
    }
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn create_user(&self, email: &str, fullname: &str, password_hash: &str) -> Result<UserRecord, RepositoryError> {
        let created = models::user::create(&self.db, email, fullname, password_hash)
            .await
            .map_err(map_model_err)?;
        Ok(to_record(created))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, RepositoryError> {
        let res = models::user::find_by_email(&self.db, email)
            .await
            .map_err(map_model_err)?;
        Ok(res.map(to_record))
    }
}
