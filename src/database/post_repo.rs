use sqlx::SqlitePool;

use crate::models::{LikeRow, PostsRow};

pub const SQL_LOAD_POSTS: &str = r#"
SELECT
    post_id,
    author_id,
    content,
    created_at,
    start_date,
    end_date,
    coarse_location,
    tags
FROM posts
"#;

pub const SQL_LOAD_LIKES: &str = r#"
SELECT post_id, user_id
FROM likes
"#;

pub async fn load_posts(pool: &SqlitePool) -> sqlx::Result<Vec<PostsRow>> {
    sqlx::query_as::<_, PostsRow>(SQL_LOAD_POSTS)
        .fetch_all(pool)
        .await
}

pub async fn load_likes(pool: &SqlitePool) -> sqlx::Result<Vec<LikeRow>> {
    sqlx::query_as::<_, LikeRow>(SQL_LOAD_LIKES)
        .fetch_all(pool)
        .await
}
