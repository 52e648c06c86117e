use axum::Router;
use gpx_trip_stats::{config, routes, state};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gpx_trip_stats=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config::Config::from_env();
    if config.mapbox_token.is_none() {
        tracing::warn!("MAPBOX_ACCESS_TOKEN is not set, route maps will not be generated");
    }

    let serve_dir = ServeDir::new(&config.output_dir);
    let addr = format!("0.0.0.0:{}", config.port);
    let max_file_size = config.max_file_size;
    let state = state::AppState::new(config);

    let app = Router::new()
        .merge(routes::health::router())
        .merge(routes::samples::router())
        .merge(routes::analyze::router())
        .nest_service("/static", serve_dir)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(axum::extract::DefaultBodyLimit::max(max_file_size))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    tracing::info!("gpx-trip-stats listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);
    tracing::info!("Samples: GET http://{}/api/samples", addr);
    tracing::info!("Analyze: POST http://{}/api/analyze", addr);

    axum::serve(listener, app).await.unwrap();
}
