use sqlx::SqlitePool;

use crate::models::{BlockEdgeRow, FriendEdgeRow, UsersRow};

pub const SQL_LOAD_DIRECTORY: &str = r#"
SELECT
    user_id,
    display_name,
    age,
    verified_student,
    age_verified,
    current_city,
    destination_city,
    cultural_backgrounds,
    languages,
    goals,
    bio,
    created_at,
    last_active_at,
    prefer_near_age,
    verified_only
FROM users
"#;

pub const SQL_LOAD_FRIEND_EDGES: &str = r#"
SELECT user_id, friend_id
FROM friends
"#;

pub const SQL_LOAD_BLOCK_EDGES: &str = r#"
SELECT user_id, blocked_id
FROM blocks
"#;

pub async fn load_directory(pool: &SqlitePool) -> sqlx::Result<Vec<UsersRow>> {
    sqlx::query_as::<_, UsersRow>(SQL_LOAD_DIRECTORY)
        .fetch_all(pool)
        .await
}

pub async fn load_friend_edges(pool: &SqlitePool) -> sqlx::Result<Vec<FriendEdgeRow>> {
    sqlx::query_as::<_, FriendEdgeRow>(SQL_LOAD_FRIEND_EDGES)
        .fetch_all(pool)
        .await
}

pub async fn load_block_edges(pool: &SqlitePool) -> sqlx::Result<Vec<BlockEdgeRow>> {
    sqlx::query_as::<_, BlockEdgeRow>(SQL_LOAD_BLOCK_EDGES)
        .fetch_all(pool)
        .await
}
