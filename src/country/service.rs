use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::{
    repository::CountryRepository,
    types::{AddCountryRequest, AddCountryResponse, DeleteCountryRequest},
};
use crate::{
    auth::Claims,
    shared::{AppError, MessageResponse},
    user::repository::UserRepository,
};

/// Service for handling visited-country business logic
pub struct CountryService {
    repository: Arc<dyn CountryRepository + Send + Sync>,
    user_repository: Arc<dyn UserRepository + Send + Sync>,
}

impl CountryService {
    pub fn new(
        repository: Arc<dyn CountryRepository + Send + Sync>,
        user_repository: Arc<dyn UserRepository + Send + Sync>,
    ) -> Self {
        Self {
            repository,
            user_repository,
        }
    }

    /// Records a country for the caller unless they already have it
    #[instrument(skip(self, claims, request), fields(user_id = claims.id, code = %request.code.trim()))]
    pub async fn add_country(
        &self,
        claims: &Claims,
        request: AddCountryRequest,
    ) -> Result<AddCountryResponse, AppError> {
        let code = request.code.trim();
        if code.is_empty() {
            return Err(AppError::BadRequest("Country code is required".to_string()));
        }

        if self.user_repository.find_by_id(claims.id).await?.is_none() {
            warn!("Token refers to a user that no longer exists");
            return Err(AppError::BadRequest("User not exists!".to_string()));
        }

        if self
            .repository
            .find_for_user(claims.id, code)
            .await?
            .is_some()
        {
            let name = request.country.as_deref().unwrap_or(code);
            warn!("Country already recorded for user");
            return Err(AppError::BadRequest(format!("{} already exists", name)));
        }

        let country = self.repository.add_country(claims.id, code).await?;
        info!(country_id = country.id, "Country added successfully");

        Ok(AddCountryResponse {
            added_country_id: country.id,
        })
    }

    /// Removes one of the caller's countries. Records owned by other users are treated as missing.
    #[instrument(skip(self, claims, request), fields(user_id = claims.id, country_id = request.country_id_to_delete))]
    pub async fn delete_country(
        &self,
        claims: &Claims,
        request: DeleteCountryRequest,
    ) -> Result<MessageResponse, AppError> {
        let deleted = self
            .repository
            .delete_country(request.country_id_to_delete, claims.id)
            .await?;

        if !deleted {
            warn!("Country not found for caller");
            return Err(AppError::NotFound("Country not found".to_string()));
        }

        info!("Country deleted successfully");
        Ok(MessageResponse::new("country deleted successfully"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::country::repository::InMemoryCountryRepository;
    use crate::user::repository::InMemoryUserRepository;

    fn claims(id: i32, username: &str) -> Claims {
        Claims {
            id,
            username: username.to_string(),
            iat: 0,
            exp: usize::MAX,
        }
    }

    fn add_request(code: &str, country: Option<&str>) -> AddCountryRequest {
        AddCountryRequest {
            code: code.to_string(),
            country: country.map(str::to_string),
        }
    }

    async fn service_with_users(
        names: &[&str],
    ) -> (CountryService, Arc<InMemoryCountryRepository>) {
        let users = Arc::new(InMemoryUserRepository::new());
        for name in names {
            users.create_user(name, "digest").await.unwrap();
        }
        let countries = Arc::new(InMemoryCountryRepository::new());
        (CountryService::new(countries.clone(), users), countries)
    }

    #[tokio::test]
    async fn test_add_country() {
        let (service, countries) = service_with_users(&["alice"]).await;

        let response = service
            .add_country(&claims(1, "alice"), add_request("FR", Some("France")))
            .await
            .unwrap();

        assert_eq!(response.added_country_id, 1);
        assert_eq!(countries.country_count().await, 1);
    }

    #[tokio::test]
    async fn test_add_duplicate_country_uses_display_name() {
        let (service, _) = service_with_users(&["alice"]).await;
        let alice = claims(1, "alice");
        service
            .add_country(&alice, add_request("FR", Some("France")))
            .await
            .unwrap();

        let result = service
            .add_country(&alice, add_request("FR", Some("France")))
            .await;
        assert!(matches!(result, Err(AppError::BadRequest(msg)) if msg == "France already exists"));

        let result = service.add_country(&alice, add_request("FR", None)).await;
        assert!(matches!(result, Err(AppError::BadRequest(msg)) if msg == "FR already exists"));
    }

    #[tokio::test]
    async fn test_add_country_unknown_user() {
        let (service, countries) = service_with_users(&[]).await;

        let result = service
            .add_country(&claims(1, "ghost"), add_request("FR", None))
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
        assert_eq!(countries.country_count().await, 0);
    }

    #[tokio::test]
    async fn test_add_country_requires_code() {
        let (service, _) = service_with_users(&["alice"]).await;

        let result = service
            .add_country(&claims(1, "alice"), add_request("  ", None))
            .await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_add_country_trims_code() {
        let (service, countries) = service_with_users(&["alice"]).await;
        let alice = claims(1, "alice");
        service
            .add_country(&alice, add_request(" FR ", None))
            .await
            .unwrap();

        let result = service.add_country(&alice, add_request("FR", None)).await;
        assert!(matches!(result, Err(AppError::BadRequest(msg)) if msg == "FR already exists"));

        let stored = countries.list_for_user(1).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].country_code, "FR");
    }

    #[tokio::test]
    async fn test_delete_own_country() {
        let (service, countries) = service_with_users(&["alice"]).await;
        let alice = claims(1, "alice");
        let added = service
            .add_country(&alice, add_request("FR", None))
            .await
            .unwrap();

        let response = service
            .delete_country(
                &alice,
                DeleteCountryRequest {
                    country_id_to_delete: added.added_country_id,
                },
            )
            .await
            .unwrap();

        assert_eq!(response.message, "country deleted successfully");
        assert_eq!(countries.country_count().await, 0);
    }

    #[tokio::test]
    async fn test_cannot_delete_other_users_country() {
        let (service, countries) = service_with_users(&["alice", "bob"]).await;
        let added = service
            .add_country(&claims(1, "alice"), add_request("FR", None))
            .await
            .unwrap();

        let result = service
            .delete_country(
                &claims(2, "bob"),
                DeleteCountryRequest {
                    country_id_to_delete: added.added_country_id,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert_eq!(countries.country_count().await, 1);
    }
}
