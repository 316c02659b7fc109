use axum::{routing::get, Router};
use dotenvy::dotenv;
use http::header::{HeaderValue, CACHE_CONTROL};
use http::Method;
use sqlx::sqlite::SqlitePoolOptions;
use std::env;
use std::net::SocketAddr;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;

use travelmate::state::AppState;
use travelmate::web::routes::{meta, recommendations};

#[tokio::main]
async fn main() {
    dotenv().ok();

    // 1. Start logging
    tracing_subscriber::fmt::init();

    // 2. Connect to the database
    let db_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://travelmate.db".to_string());
    tracing::info!("connecting to database: {}", db_url);

    let pool = SqlitePoolOptions::new()
        .connect(&db_url)
        .await
        .expect("cannot connect to the database");

    let state = AppState::new(pool);

    // CORS for the frontend dev servers
    let cors = CorsLayer::new()
        .allow_origin([
            HeaderValue::from_static("http://localhost:5173"),
            HeaderValue::from_static("http://127.0.0.1:5173"),
            HeaderValue::from_static("http://localhost:3000"),
        ])
        .allow_methods([Method::GET])
        .allow_credentials(true);

    // 3. Build the application. Recommendation responses are personalized,
    // so every response carries Cache-Control: no-store.
    let app = Router::new()
        .route("/", get(meta::api_info_handler))
        .route("/api/health", get(meta::health_handler))
        .route(
            "/api/recommendations/people",
            get(recommendations::people_recommendations_handler),
        )
        .route(
            "/api/recommendations/posts",
            get(recommendations::post_recommendations_handler),
        )
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(CatchPanicLayer::new())
        .layer(cors)
        .with_state(state);

    // 4. Start the server (with fallback port)
    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8000);
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .expect("cannot parse host/port");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::warn!("could not bind {}: {}. trying fallback {}:{}", addr, e, host, port + 1);
            let fallback: SocketAddr = format!("{}:{}", host, port + 1)
                .parse()
                .expect("cannot parse fallback address");
            tokio::net::TcpListener::bind(fallback)
                .await
                .expect("cannot bind fallback port")
        }
    };

    let bound_addr = listener.local_addr().expect("no local address");
    tracing::info!("travelmate recommendations api on http://{}", bound_addr);

    axum::serve(listener, app).await.expect("server error");
}
