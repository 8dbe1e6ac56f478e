use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use super::{models::UserModel, DUPLICATE_USERNAME};
use crate::shared::{is_unique_violation, AppError};

/// Trait for user repository operations
#[async_trait]
pub trait UserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserModel>, AppError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<UserModel>, AppError>;

    /// Inserts a user and returns it with its store-assigned id.
    /// A taken username is reported as a `BadRequest`, even if it slipped past an earlier lookup.
    async fn create_user(&self, username: &str, password_hash: &str)
        -> Result<UserModel, AppError>;
}

#[derive(Default)]
struct InMemoryUsers {
    last_id: i32,
    users: HashMap<i32, UserModel>,
}

/// In-memory implementation of UserRepository for development and testing
///
/// Ids are assigned sequentially starting at 1, mirroring a SERIAL column.
/// Data is lost when the application restarts.
#[derive(Default)]
pub struct InMemoryUserRepository {
    state: RwLock<InMemoryUsers>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn user_count(&self) -> usize {
        self.state.read().await.users.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> Result<Option<UserModel>, AppError> {
        debug!(username = %username, "Fetching user by username from memory");

        let state = self.state.read().await;
        let user = state
            .users
            .values()
            .find(|user| user.username == username)
            .cloned();

        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i32) -> Result<Option<UserModel>, AppError> {
        debug!(user_id = id, "Fetching user by id from memory");

        let state = self.state.read().await;
        Ok(state.users.get(&id).cloned())
    }

    #[instrument(skip(self, password_hash))]
    async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<UserModel, AppError> {
        debug!(username = %username, "Creating user in memory");

        let mut state = self.state.write().await;
        if state.users.values().any(|user| user.username == username) {
            warn!(username = %username, "Username already exists in memory");
            return Err(AppError::BadRequest(DUPLICATE_USERNAME.to_string()));
        }

        state.last_id += 1;
        let user = UserModel {
            id: state.last_id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        };
        state.users.insert(user.id, user.clone());

        debug!(user_id = user.id, "User created successfully in memory");
        Ok(user)
    }
}

/// PostgreSQL implementation of user repository
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> Result<Option<UserModel>, AppError> {
        debug!(username = %username, "Fetching user by username from database");

        sqlx::query_as::<_, UserModel>("SELECT id, username, password FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, username = %username, "Failed to fetch user from database");
                AppError::from(e)
            })
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i32) -> Result<Option<UserModel>, AppError> {
        debug!(user_id = id, "Fetching user by id from database");

        sqlx::query_as::<_, UserModel>("SELECT id, username, password FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, user_id = id, "Failed to fetch user from database");
                AppError::from(e)
            })
    }

    #[instrument(skip(self, password_hash))]
    async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<UserModel, AppError> {
        debug!(username = %username, "Creating user in database");

        let user = sqlx::query_as::<_, UserModel>(
            "INSERT INTO users (username, password) VALUES ($1, $2) RETURNING id, username, password",
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                warn!(username = %username, "Username already exists in database");
                return AppError::BadRequest(DUPLICATE_USERNAME.to_string());
            }
            warn!(error = %e, "Failed to create user in database");
            AppError::from(e)
        })?;

        debug!(user_id = user.id, "User created successfully in database");
        Ok(user)
    }
}
