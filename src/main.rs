//! UniLib Server - University Library Management System
//!
//! A Rust REST API server for university library management.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use unilib_server::{api, config::AppConfig, repository::Repository, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("unilib_server={},tower_http=debug", config.logging.level).into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting UniLib Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;
    let upload_dir = config.storage.upload_dir.clone();

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository, config.users.clone(), config.storage.clone());

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state, &upload_dir);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState, upload_dir: &str) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Authentication
        .route("/auth/register", post(api::users::register))
        .route("/auth/login", post(api::users::login))
        // Users
        .route("/users/:id", get(api::users::profile))
        // Books
        .route("/books", post(api::books::upload_book))
        .route("/books/search", get(api::books::search_books))
        .route("/books/recent", get(api::books::recent_books))
        .route(
            "/books/department/:department",
            get(api::books::books_by_department),
        )
        .route("/books/:id", get(api::books::get_book))
        .route("/books/:id", delete(api::books::delete_book))
        // Book requests
        .route("/requests", post(api::book_requests::submit_request))
        .route("/requests", get(api::book_requests::all_requests))
        .route(
            "/requests/student/:id",
            get(api::book_requests::requests_for_student),
        )
        .route(
            "/requests/department/:department",
            get(api::book_requests::requests_for_department),
        )
        // Approvals
        .route("/approvals/teachers", get(api::approvals::pending_teachers))
        .route(
            "/approvals/students/:department",
            get(api::approvals::pending_students),
        )
        .route("/approvals", put(api::approvals::update_status))
        // Notifications
        .route(
            "/notifications/user/:id",
            get(api::notifications::notifications_for_user),
        )
        .route(
            "/notifications/user/:id/unread-count",
            get(api::notifications::unread_count),
        )
        .route(
            "/notifications/:id/read",
            put(api::notifications::mark_read),
        )
        .route(
            "/notifications/user/:id/read-all",
            put(api::notifications::mark_all_read),
        )
        // Files
        .route("/files", post(api::files::upload_file))
        .with_state(state.clone());

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .nest_service("/uploads", ServeDir::new(upload_dir))
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
