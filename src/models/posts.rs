use chrono::{DateTime, NaiveDate, Utc};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PostsRow {
    pub post_id: String,
    pub author_id: String,
    pub content: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub coarse_location: Option<String>,
    pub tags: Option<String>,
}

/// Post as the recommendation pipeline sees it. The location is
/// city/area-level text only; exact coordinates never enter the system.
#[derive(Debug, Clone)]
pub struct Post {
    pub id: String,
    pub author_id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub coarse_location: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LikeRow {
    pub post_id: String,
    pub user_id: String,
}
