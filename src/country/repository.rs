use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use super::models::VisitedCountryModel;
use crate::shared::{is_unique_violation, AppError};

/// Trait for visited-country repository operations
#[async_trait]
pub trait CountryRepository {
    async fn find_for_user(
        &self,
        user_id: i32,
        country_code: &str,
    ) -> Result<Option<VisitedCountryModel>, AppError>;

    /// All of a user's countries, oldest first
    async fn list_for_user(&self, user_id: i32) -> Result<Vec<VisitedCountryModel>, AppError>;

    async fn add_country(
        &self,
        user_id: i32,
        country_code: &str,
    ) -> Result<VisitedCountryModel, AppError>;

    /// Deletes the record only if it belongs to `user_id`. Returns whether a row was removed.
    async fn delete_country(&self, id: i32, user_id: i32) -> Result<bool, AppError>;
}

fn duplicate_country(country_code: &str) -> AppError {
    AppError::BadRequest(format!("{} already exists", country_code))
}

#[derive(Default)]
struct InMemoryCountries {
    last_id: i32,
    countries: BTreeMap<i32, VisitedCountryModel>,
}

/// In-memory implementation of CountryRepository for development and testing
#[derive(Default)]
pub struct InMemoryCountryRepository {
    state: RwLock<InMemoryCountries>,
}

impl InMemoryCountryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn country_count(&self) -> usize {
        self.state.read().await.countries.len()
    }
}

#[async_trait]
impl CountryRepository for InMemoryCountryRepository {
    #[instrument(skip(self))]
    async fn find_for_user(
        &self,
        user_id: i32,
        country_code: &str,
    ) -> Result<Option<VisitedCountryModel>, AppError> {
        let state = self.state.read().await;
        Ok(state
            .countries
            .values()
            .find(|c| c.user_id == user_id && c.country_code == country_code)
            .cloned())
    }

    #[instrument(skip(self))]
    async fn list_for_user(&self, user_id: i32) -> Result<Vec<VisitedCountryModel>, AppError> {
        let state = self.state.read().await;
        let countries: Vec<VisitedCountryModel> = state
            .countries
            .values()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect();

        debug!(count = countries.len(), "Countries listed from memory");
        Ok(countries)
    }

    #[instrument(skip(self))]
    async fn add_country(
        &self,
        user_id: i32,
        country_code: &str,
    ) -> Result<VisitedCountryModel, AppError> {
        let mut state = self.state.write().await;
        if state
            .countries
            .values()
            .any(|c| c.user_id == user_id && c.country_code == country_code)
        {
            warn!("Country already recorded for user in memory");
            return Err(duplicate_country(country_code));
        }

        state.last_id += 1;
        let country = VisitedCountryModel {
            id: state.last_id,
            user_id,
            country_code: country_code.to_string(),
        };
        state.countries.insert(country.id, country.clone());

        debug!(country_id = country.id, "Country added in memory");
        Ok(country)
    }

    #[instrument(skip(self))]
    async fn delete_country(&self, id: i32, user_id: i32) -> Result<bool, AppError> {
        let mut state = self.state.write().await;
        let owned = state
            .countries
            .get(&id)
            .is_some_and(|c| c.user_id == user_id);

        if owned {
            state.countries.remove(&id);
        }

        debug!(deleted = owned, "Country delete processed in memory");
        Ok(owned)
    }
}

/// PostgreSQL implementation of country repository
pub struct PostgresCountryRepository {
    pool: PgPool,
}

impl PostgresCountryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CountryRepository for PostgresCountryRepository {
    #[instrument(skip(self))]
    async fn find_for_user(
        &self,
        user_id: i32,
        country_code: &str,
    ) -> Result<Option<VisitedCountryModel>, AppError> {
        sqlx::query_as::<_, VisitedCountryModel>(
            "SELECT id, user_id, country_code FROM users_visited_countries WHERE user_id = $1 AND country_code = $2",
        )
        .bind(user_id)
        .bind(country_code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to look up country in database");
            AppError::from(e)
        })
    }

    #[instrument(skip(self))]
    async fn list_for_user(&self, user_id: i32) -> Result<Vec<VisitedCountryModel>, AppError> {
        let countries = sqlx::query_as::<_, VisitedCountryModel>(
            "SELECT id, user_id, country_code FROM users_visited_countries WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to list countries from database");
            AppError::from(e)
        })?;

        debug!(count = countries.len(), "Countries listed from database");
        Ok(countries)
    }

    #[instrument(skip(self))]
    async fn add_country(
        &self,
        user_id: i32,
        country_code: &str,
    ) -> Result<VisitedCountryModel, AppError> {
        let country = sqlx::query_as::<_, VisitedCountryModel>(
            "INSERT INTO users_visited_countries (user_id, country_code) VALUES ($1, $2) RETURNING id, user_id, country_code",
        )
        .bind(user_id)
        .bind(country_code)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                warn!("Country already recorded for user in database");
                return duplicate_country(country_code);
            }
            warn!(error = %e, "Failed to add country in database");
            AppError::from(e)
        })?;

        debug!(country_id = country.id, "Country added in database");
        Ok(country)
    }

    #[instrument(skip(self))]
    async fn delete_country(&self, id: i32, user_id: i32) -> Result<bool, AppError> {
        let result =
            sqlx::query("DELETE FROM users_visited_countries WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    warn!(error = %e, "Failed to delete country from database");
                    AppError::from(e)
                })?;

        debug!(rows_affected = result.rows_affected(), "Country delete processed in database");
        Ok(result.rows_affected() > 0)
    }
}
