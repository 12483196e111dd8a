//! SyllaTech Server - Marketing Site Backend
//!
//! REST API server for the SyllaTech marketing site: form submissions,
//! consultation bookings, email campaigns and visit analytics.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use syllatech_server::{api, config::AppConfig, repository::Repository, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("syllatech_server={},tower_http=debug", config.logging.level).into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting SyllaTech Server v{}", env!("CARGO_PKG_VERSION"));

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
    repository
        .settings
        .seed_defaults(&config.admin.secret)
        .await
        .expect("Failed to seed default settings");

    let services = Services::new(repository.clone(), &config);

    // Start the submission watcher feeding the notification stream
    services.notifications.spawn_watcher(
        repository,
        Duration::from_secs(config.notifications.poll_interval_secs),
    );

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
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        // Public submissions
        .route("/submissions/newsletter", post(api::submissions::subscribe_newsletter))
        .route("/submissions/bookings", post(api::submissions::submit_booking))
        .route("/submissions/contact", post(api::submissions::submit_contact))
        .route("/unsubscribe", post(api::submissions::unsubscribe))
        .route("/unsubscribe", get(api::submissions::unsubscribe_page))
        // Booking
        .route("/booking/config", get(api::booking::get_public_config))
        .route("/booking/calendar", get(api::booking::get_calendar))
        .route("/availability", get(api::booking::get_availability))
        // Tracking
        .route("/track", post(api::analytics::track_visit))
        // Admin: submissions
        .route("/admin/submissions", get(api::submissions::list_submissions))
        .route(
            "/admin/submissions/newsletter/:id",
            put(api::submissions::update_newsletter).delete(api::submissions::delete_newsletter),
        )
        .route(
            "/admin/submissions/bookings/:id",
            put(api::submissions::update_booking).delete(api::submissions::delete_booking),
        )
        .route(
            "/admin/submissions/contact/:id",
            put(api::submissions::update_contact).delete(api::submissions::delete_contact),
        )
        .route(
            "/admin/submissions/unsubscribed/:email",
            delete(api::submissions::delete_unsubscribed),
        )
        // Admin: booking configuration
        .route("/admin/booking/config", get(api::booking::get_admin_config))
        .route("/admin/booking/config", put(api::booking::update_admin_config))
        // Admin: analytics
        .route("/admin/analytics", get(api::analytics::get_analytics))
        // Admin: email
        .route("/admin/email/audiences", get(api::email::get_audiences))
        .route("/admin/email/recipients", get(api::email::get_recipients))
        .route("/admin/email/send", post(api::email::send_campaign))
        .route("/admin/email/reply", post(api::email::send_reply))
        // Admin: CSV export
        .route("/admin/export/newsletter", get(api::export::export_newsletter))
        .route("/admin/export/bookings", get(api::export::export_bookings))
        .route("/admin/export/contact", get(api::export::export_contact))
        // Admin: notifications
        .route("/admin/notifications/stream", get(api::notifications::notifications_stream))
        // Admin: settings
        .route("/admin/password", put(api::settings::change_password))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api", api_routes)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
