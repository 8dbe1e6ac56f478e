use serde::{Deserialize, Serialize};

use crate::country::types::CountryResponse;

/// Request payload for both registration and login
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

/// Response for a successful login
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub message: String,
    pub token: String, // The JWT token
}

/// Response for the authenticated user's profile
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct UserDataResponse {
    pub username: String,
    #[serde(rename = "existedCountries")]
    pub existed_countries: Vec<CountryResponse>,
}
