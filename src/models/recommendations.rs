use chrono::NaiveDate;
use serde::Serialize;

/// API response shape for one recommended person. Location is a hard
/// product invariant: coarse only, so the payload carries a constant
/// `location_hidden` marker instead of any place data.
#[derive(Debug, Clone, Serialize)]
pub struct PersonRecommendation {
    pub id: String,
    pub display_name: String,
    pub bio: String,
    pub verified_student: bool,
    pub age_verified: bool,
    pub tags: Vec<String>,
    pub mutual_friends_count: usize,
    pub location_hidden: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_score: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DateRange {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostRecommendation {
    pub id: String,
    pub author_id: String,
    pub author_name: String,
    pub author_verified_student: bool,
    pub text: String,
    pub coarse_location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
    pub liked_by_friends_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_score: Option<f64>,
}

/// Transient per-request scoring record for a person candidate. Primary
/// culture/language are filled during reranking, where the diversity caps
/// need them.
#[derive(Debug, Clone)]
pub struct ScoredPerson {
    pub id: String,
    pub score: f64,
    pub primary_culture: Option<String>,
    pub primary_language: Option<String>,
}

/// Transient per-request scoring record for a post candidate.
#[derive(Debug, Clone)]
pub struct ScoredPost {
    pub id: String,
    pub score: f64,
    pub author_id: String,
}
