//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use axum::{
    Router, http,
    http::{Method, header},
};
use base64::Engine;
use base64::engine::general_purpose;
use identity::infra::{GraphIdentityVerifier, OidcIdentityVerifier, PgAccountStore, SmsNotifier};
use identity::presentation::IdentityAppState;
use identity::{IdentityConfig, identity_router};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,identity=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Identity configuration
    let mut config = if cfg!(debug_assertions) {
        IdentityConfig::with_random_secret()
    } else {
        // In production, load secret from environment
        let secret_b64 = env::var("IDENTITY_TOKEN_SECRET")
            .expect("IDENTITY_TOKEN_SECRET must be set in production");
        let secret_bytes = Engine::decode(&general_purpose::STANDARD, &secret_b64)?;
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&secret_bytes);
        IdentityConfig {
            token_secret: secret,
            ..IdentityConfig::default()
        }
    };

    if let Ok(pepper_b64) = env::var("IDENTITY_PASSWORD_PEPPER") {
        config.password_pepper = Some(Engine::decode(&general_purpose::STANDARD, &pepper_b64)?);
    }

    // Identity provider endpoints
    let graph_url =
        env::var("GRAPH_PROVIDER_URL").expect("GRAPH_PROVIDER_URL must be set in environment");
    let oidc_token_info_url =
        env::var("OIDC_TOKENINFO_URL").expect("OIDC_TOKENINFO_URL must be set in environment");
    let oidc_client_id =
        env::var("OIDC_CLIENT_ID").expect("OIDC_CLIENT_ID must be set in environment");

    // SMS gateway
    let sms_gateway_url =
        env::var("SMS_GATEWAY_URL").expect("SMS_GATEWAY_URL must be set in environment");
    let sms_api_key = env::var("SMS_API_KEY").ok();

    let state = IdentityAppState {
        store: Arc::new(PgAccountStore::new(pool.clone())),
        graph_verifier: Arc::new(GraphIdentityVerifier::new(graph_url)),
        oidc_verifier: Arc::new(OidcIdentityVerifier::new(oidc_token_info_url, oidc_client_id)),
        notifier: Arc::new(SmsNotifier::new(sms_gateway_url, sms_api_key)),
        config: Arc::new(config),
    };

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:40922,http://127.0.0.1:40922".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .nest("/api/account", identity_router(state))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], 31115));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
