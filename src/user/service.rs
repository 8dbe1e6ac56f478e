use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::{
    repository::UserRepository,
    types::{CredentialsRequest, LoginResponse, UserDataResponse},
    DUPLICATE_USERNAME,
};
use crate::{
    auth::{Claims, PasswordHasher, TokenConfig},
    country::{repository::CountryRepository, types::CountryResponse},
    shared::{AppError, MessageResponse},
};

/// Service for registration, login and profile lookups
pub struct UserService {
    repository: Arc<dyn UserRepository + Send + Sync>,
    country_repository: Arc<dyn CountryRepository + Send + Sync>,
    token_config: TokenConfig,
    password_hasher: PasswordHasher,
}

impl UserService {
    pub fn new(
        repository: Arc<dyn UserRepository + Send + Sync>,
        country_repository: Arc<dyn CountryRepository + Send + Sync>,
        token_config: TokenConfig,
        password_hasher: PasswordHasher,
    ) -> Self {
        Self {
            repository,
            country_repository,
            token_config,
            password_hasher,
        }
    }

    /// Registers a new user after checking the username is free
    #[instrument(skip(self, request), fields(username = %request.username.trim()))]
    pub async fn register(&self, request: CredentialsRequest) -> Result<MessageResponse, AppError> {
        let username = request.username.trim().to_string();
        if username.is_empty() || request.password.is_empty() {
            warn!("Registration rejected: empty username or password");
            return Err(AppError::BadRequest(
                "Username and password are required".to_string(),
            ));
        }

        if self.repository.find_by_username(&username).await?.is_some() {
            warn!(username = %username, "Registration rejected: username taken");
            return Err(AppError::BadRequest(DUPLICATE_USERNAME.to_string()));
        }

        let hasher = self.password_hasher;
        let password = request.password;
        let digest = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| {
                warn!(error = %e, "Password hashing task failed");
                AppError::Internal
            })??;

        let user = self.repository.create_user(&username, &digest).await?;
        info!(user_id = user.id, username = %user.username, "User registered");

        Ok(MessageResponse::new(
            "Thank you very much for registering! Please proceed to log in.",
        ))
    }

    /// Checks credentials and issues a token on success
    #[instrument(skip(self, request), fields(username = %request.username.trim()))]
    pub async fn login(&self, request: CredentialsRequest) -> Result<LoginResponse, AppError> {
        let user = self
            .repository
            .find_by_username(request.username.trim())
            .await?
            .ok_or_else(|| {
                warn!("Login rejected: unknown user");
                AppError::NotFound("User not found".to_string())
            })?;

        let hasher = self.password_hasher;
        let password = request.password;
        let digest = user.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || hasher.verify(&password, &digest))
            .await
            .map_err(|e| {
                warn!(error = %e, "Password verification task failed");
                AppError::Internal
            })?;

        if !matches {
            warn!(user_id = user.id, "Login rejected: incorrect password");
            return Err(AppError::Unauthorized("Incorrect password".to_string()));
        }

        let token = self.token_config.create_token(user.id, &user.username)?;
        info!(user_id = user.id, "User logged in");

        Ok(LoginResponse {
            message: "You are logged in!".to_string(),
            token,
        })
    }

    /// Returns the caller's username together with every country they have recorded
    #[instrument(skip(self, claims), fields(user_id = claims.id))]
    pub async fn get_user_data(&self, claims: &Claims) -> Result<UserDataResponse, AppError> {
        let user = self
            .repository
            .find_by_id(claims.id)
            .await?
            .ok_or_else(|| {
                warn!("Token refers to a user that no longer exists");
                AppError::BadRequest("User not found".to_string())
            })?;

        let existed_countries: Vec<CountryResponse> = self
            .country_repository
            .list_for_user(user.id)
            .await?
            .into_iter()
            .map(CountryResponse::from)
            .collect();

        info!(
            country_count = existed_countries.len(),
            "User data fetched successfully"
        );

        Ok(UserDataResponse {
            username: user.username,
            existed_countries,
        })
    }
}
