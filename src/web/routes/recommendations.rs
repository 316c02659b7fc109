use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::models::{PersonRecommendation, PostRecommendation};
use crate::services::recommendation_service;
use crate::state::AppState;

pub const DEFAULT_PEOPLE_LIMIT: usize = 20;
pub const DEFAULT_POSTS_LIMIT: usize = 30;
pub const MAX_LIMIT: usize = 100;

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub user_id: String,
    pub limit: Option<usize>,
    pub debug: Option<bool>,
    pub record_impressions: Option<bool>,
}

pub async fn people_recommendations_handler(
    State(state): State<AppState>,
    Query(q): Query<RecommendationQuery>,
) -> Result<Json<Vec<PersonRecommendation>>, (StatusCode, Json<Value>)> {
    let limit = q.limit.unwrap_or(DEFAULT_PEOPLE_LIMIT).clamp(1, MAX_LIMIT);

    let results = recommendation_service::recommend_people(
        &state.pool,
        &state.people_impressions,
        &q.user_id,
        limit,
        q.debug.unwrap_or(false),
        q.record_impressions.unwrap_or(true),
    )
    .await
    .map_err(|e| {
        warn!(user_id = %q.user_id, "people recommendations failed: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": "internal" })),
        )
    })?;

    let Some(results) = results else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "user not found" })),
        ));
    };

    Ok(Json(results))
}

pub async fn post_recommendations_handler(
    State(state): State<AppState>,
    Query(q): Query<RecommendationQuery>,
) -> Result<Json<Vec<PostRecommendation>>, (StatusCode, Json<Value>)> {
    let limit = q.limit.unwrap_or(DEFAULT_POSTS_LIMIT).clamp(1, MAX_LIMIT);

    let results = recommendation_service::recommend_posts(
        &state.pool,
        &state.post_impressions,
        &q.user_id,
        limit,
        q.debug.unwrap_or(false),
        q.record_impressions.unwrap_or(true),
    )
    .await
    .map_err(|e| {
        warn!(user_id = %q.user_id, "post recommendations failed: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": "internal" })),
        )
    })?;

    let Some(results) = results else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "user not found" })),
        ));
    };

    Ok(Json(results))
}
