use std::sync::Arc;

use axum::Router;

use visited_countries::{
    auth::password::MIN_COST,
    country::repository::InMemoryCountryRepository,
    create_router,
    user::repository::InMemoryUserRepository,
    AppState, PasswordHasher, TokenConfig,
};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub const TEST_SECRET: &str = "integration-secret";

pub struct TestApp {
    pub router: Router,
    pub users: Arc<InMemoryUserRepository>,
    pub countries: Arc<InMemoryCountryRepository>,
    pub token_config: TokenConfig,
}

pub struct TestAppBuilder {
    secret: String,
    expiration_days: i64,
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self {
            secret: TEST_SECRET.to_string(),
            expiration_days: 4,
        }
    }

    #[allow(dead_code)]
    pub fn with_secret(mut self, secret: &str) -> Self {
        self.secret = secret.to_string();
        self
    }

    pub fn build(self) -> TestApp {
        let users = Arc::new(InMemoryUserRepository::new());
        let countries = Arc::new(InMemoryCountryRepository::new());
        let token_config = TokenConfig::new(&self.secret, self.expiration_days);

        let state = AppState::new(
            users.clone(),
            countries.clone(),
            token_config.clone(),
            PasswordHasher::new(MIN_COST),
        );

        TestApp {
            router: create_router(state),
            users,
            countries,
            token_config,
        }
    }
}
