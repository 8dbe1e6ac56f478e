use serde::{Deserialize, Serialize};

use super::models::VisitedCountryModel;

/// Request payload for recording a visited country
#[derive(Debug, Deserialize)]
pub struct AddCountryRequest {
    pub code: String,
    /// Display name, only used in the duplicate message
    pub country: Option<String>,
}

/// Response for a newly recorded country
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct AddCountryResponse {
    #[serde(rename = "addedCountryId")]
    pub added_country_id: i32,
}

/// Request payload for removing a visited country
#[derive(Debug, Deserialize)]
pub struct DeleteCountryRequest {
    #[serde(rename = "countryIdToDelete")]
    pub country_id_to_delete: i32,
}

/// A visited country as listed in the user's data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CountryResponse {
    pub id: i32,
    pub country_code: String,
}

impl From<VisitedCountryModel> for CountryResponse {
    fn from(model: VisitedCountryModel) -> Self {
        Self {
            id: model.id,
            country_code: model.country_code,
        }
    }
}
