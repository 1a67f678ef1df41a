//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;
mod meta;
mod middleware;

use crate::config::AppConfig;
use crate::meta::MetaState;
use crate::middleware::PipelineState;
use axum::{
    Router, http,
    http::{Method, header},
};
use calendar::{HttpIcsFetcher, calendar_router};
use chrono::Utc;
use coach::infra::gemini::load_system_prompt;
use coach::{GeminiClient, coach_router};
use platform::origin::TrustedOriginSet;
use platform::rate_limit::MemoryRateLimitStore;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();

    // Initialize tracing; optionally also to a daily-rolling file
    let (file_layer, _guard, log_file) = match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "api.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard), Some(format!("{}/api.log", dir)))
        }
        None => (None, None, None),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,coach=info,calendar=info,platform=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    let started_at = Utc::now();

    // Trusted site origins feed both the origin guard and the CORS layer
    let origins = Arc::new(TrustedOriginSet::from_comma_list(&config.site_origins));
    if origins.is_empty() {
        tracing::warn!("No valid site origins configured, all governed requests will be rejected");
    }

    // One shared limiter so all scopes count against the same key budget
    let limiter = Arc::new(MemoryRateLimitStore::new(config.rate_limit_max_keys));

    // AI gateway; without a key it stays unavailable and the dice endpoint
    // falls back to its canned comment
    let system_prompt = load_system_prompt(Path::new(&config.system_prompt_path));
    let gateway = Arc::new(GeminiClient::new(
        config.google_api_key.clone(),
        &config.gemini_model,
        system_prompt,
        config.ai_timeout,
    )?);
    if !gateway.is_configured() {
        tracing::warn!("GOOGLE_API_KEY not set, AI endpoints run in degraded mode");
    }

    let fetcher = Arc::new(HttpIcsFetcher::new(
        &config.calendar.source_url,
        config.calendar.fetch_timeout,
    )?);

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
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
            header::ACCEPT,
        ]));

    // Governed routes share the origin guard; meta and static stay open
    let governed = coach_router(gateway, limiter.clone(), Arc::new(config.coach.clone()))
        .merge(calendar_router(
            fetcher,
            limiter,
            Arc::new(config.calendar.clone()),
        ))
        .route_layer(axum::middleware::from_fn_with_state(
            origins.clone(),
            middleware::origin_guard,
        ));

    let meta = meta::meta_router(MetaState {
        app_version: config.app_version.clone(),
        started_at,
        log_file: log_file.clone(),
    });

    let pipeline = PipelineState {
        app_version: config.app_version.clone(),
    };

    let app = Router::new()
        .merge(governed)
        .merge(meta)
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn_with_state(
            pipeline,
            middleware::request_pipeline,
        ))
        .layer(cors);

    tracing::info!(
        addr = %config.bind_addr,
        version = %config.app_version,
        origins = origins.len(),
        log_file = log_file.as_deref().unwrap_or("-"),
        "Server starting"
    );

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
