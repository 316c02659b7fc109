use dotenvy::dotenv;
use sqlx::sqlite::SqlitePoolOptions;
use std::env;

use travelmate::database;
use travelmate::database::seed;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let db_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://travelmate.db?mode=rwc".to_string());
    let pool = SqlitePoolOptions::new()
        .connect(&db_url)
        .await
        .expect("cannot connect to the database");

    if let Err(e) = database::ensure_schema(&pool).await {
        eprintln!("schema setup failed: {}", e);
        std::process::exit(1);
    }

    match seed::seed_demo_data(&pool).await {
        Ok(()) => println!("seeded demo users, friendships, blocks, posts and likes"),
        Err(e) => {
            eprintln!("demo seed failed: {}", e);
            std::process::exit(1);
        }
    }
}
