use sqlx::FromRow;

/// Database model for users_visited_countries table
#[derive(Debug, Clone, FromRow, PartialEq)]
pub struct VisitedCountryModel {
    pub id: i32,
    pub user_id: i32,
    pub country_code: String,
}
