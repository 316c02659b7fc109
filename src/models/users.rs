use chrono::{DateTime, Utc};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UsersRow {
    pub user_id: String,
    pub display_name: Option<String>,
    pub age: Option<i64>,
    pub verified_student: Option<i64>,
    pub age_verified: Option<i64>,
    pub current_city: Option<String>,
    pub destination_city: Option<String>,
    pub cultural_backgrounds: Option<String>,
    pub languages: Option<String>,
    pub goals: Option<String>,
    pub bio: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub last_active_at: Option<DateTime<Utc>>,
    pub prefer_near_age: Option<i64>,
    pub verified_only: Option<i64>,
}

/// Directory profile as the recommendation pipeline sees it: list columns
/// parsed, flags resolved, timestamps concrete. Immutable for the duration
/// of one recommendation request.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub id: String,
    pub display_name: String,
    pub age: i64,
    pub verified_student: bool,
    pub age_verified: bool,
    pub current_city: String,
    pub destination_city: Option<String>,
    pub cultural_backgrounds: Vec<String>,
    pub languages: Vec<String>,
    pub goals: Vec<String>,
    pub bio: String,
    pub created_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
    pub prefer_near_age: bool,
    pub verified_only: bool,
}
