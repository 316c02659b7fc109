use sqlx::SqlitePool;

pub mod post_repo;
pub mod seed;
pub mod user_repo;

/// Shared by the seed binary and the integration tests so both always
/// run against the same schema.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    user_id TEXT PRIMARY KEY,
    display_name TEXT,
    age INTEGER,
    verified_student INTEGER,
    age_verified INTEGER,
    current_city TEXT,
    destination_city TEXT,
    cultural_backgrounds TEXT,
    languages TEXT,
    goals TEXT,
    bio TEXT,
    created_at TEXT,
    last_active_at TEXT,
    prefer_near_age INTEGER,
    verified_only INTEGER
);

CREATE TABLE IF NOT EXISTS friends (
    user_id TEXT NOT NULL,
    friend_id TEXT NOT NULL,
    PRIMARY KEY (user_id, friend_id)
);

CREATE TABLE IF NOT EXISTS blocks (
    user_id TEXT NOT NULL,
    blocked_id TEXT NOT NULL,
    PRIMARY KEY (user_id, blocked_id)
);

CREATE TABLE IF NOT EXISTS posts (
    post_id TEXT PRIMARY KEY,
    author_id TEXT NOT NULL,
    content TEXT,
    created_at TEXT,
    start_date TEXT,
    end_date TEXT,
    coarse_location TEXT,
    tags TEXT
);

CREATE TABLE IF NOT EXISTS likes (
    post_id TEXT NOT NULL,
    user_id TEXT NOT NULL,
    PRIMARY KEY (post_id, user_id)
);
"#;

pub async fn ensure_schema(pool: &SqlitePool) -> sqlx::Result<()> {
    sqlx::raw_sql(SCHEMA_SQL).execute(pool).await?;
    Ok(())
}
