//! MittiMobil Server - Agricultural Equipment Rental Marketplace
//!
//! A REST API server connecting farmers who rent out equipment with
//! farmers who need it.

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mittimobil_server::{api, config::AppConfig, repository::Repository, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("mittimobil_server={},tower_http=debug", config.logging.level).into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting MittiMobil Server v{}", env!("CARGO_PKG_VERSION"));

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

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(
        repository,
        config.auth.clone(),
        config.geocoding.clone(),
        config.discovery.clone(),
    )
    .expect("Failed to create services");

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

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
fn create_router(state: AppState) -> Router {
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
        .route("/auth/register", post(api::auth::register))
        .route("/auth/login", post(api::auth::login))
        // Farmers
        .route("/farmers/me", get(api::farmers::me))
        .route("/farmers/me", put(api::farmers::update_me))
        .route("/farmers/me/dashboard", get(api::farmers::dashboard))
        .route("/farmers/:id", get(api::farmers::get_farmer))
        // Equipment
        .route("/equipment", get(api::equipment::search_equipment))
        .route("/equipment", post(api::equipment::create_equipment))
        .route("/equipment/my", get(api::equipment::my_equipment))
        .route("/equipment/:id", get(api::equipment::get_equipment))
        .route("/equipment/:id", put(api::equipment::update_equipment))
        .route("/equipment/:id", delete(api::equipment::delete_equipment))
        // Bookings
        .route("/bookings", post(api::bookings::create_booking))
        .route("/bookings/my-rentals", get(api::bookings::my_rentals))
        .route("/bookings/my-bookings", get(api::bookings::my_bookings))
        .route("/bookings/:id", get(api::bookings::get_booking))
        .route("/bookings/:id/confirm", patch(api::bookings::confirm_booking))
        .route("/bookings/:id/complete", patch(api::bookings::complete_booking))
        .route("/bookings/:id/cancel", patch(api::bookings::cancel_booking))
        // Location
        .route("/location/nearby", get(api::location::nearby))
        .route("/location/geocode", post(api::location::geocode))
        .route("/location/reverse", get(api::location::reverse))
        // Analytics
        .route("/analytics/overview", get(api::analytics::overview))
        .route("/analytics/earnings", get(api::analytics::earnings))
        .with_state(state.clone());

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
