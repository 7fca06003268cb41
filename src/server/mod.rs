//! Region query server
//!
//! HTTP front end over the database manager, built with Axum.
//!
//! # Endpoints
//!
//! - `GET /?ip=<address>` - Region record as a JSON object, `[]` on failure
//! - `GET /health` - Database and cache status

pub mod routes;
pub mod state;

pub use state::AppState;

use crate::config::ServerConfig;
use crate::error::{RegionError, Result};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::timeout::TimeoutLayer;

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let timeout = state.request_timeout;

    Router::new()
        .route("/", get(routes::lookup))
        .route("/health", get(routes::health))
        .layer(TimeoutLayer::new(timeout))
        .with_state(Arc::new(state))
}

/// Start the query server and run until a shutdown signal arrives
pub async fn serve(state: AppState, config: &ServerConfig) -> Result<()> {
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen)
        .await
        .map_err(|e| RegionError::server(format!("Failed to bind {}: {}", config.listen, e)))?;

    log::info!("ip2region query server listening on {}", config.listen);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| RegionError::server(format!("Server error: {}", e)))?;

    log::info!("ip2region query server shut down gracefully");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                log::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    log::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::routes::HealthResponse;
    use super::*;
    use crate::database::ip2region::testdb::TestDbBuilder;
    use crate::database::{DatabaseManager, Ip2RegionDatabase, RegionRecord};
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use std::time::Duration;
    use tempfile::NamedTempFile;
    use tower::util::ServiceExt;

    fn create_test_app() -> (Router, NamedTempFile) {
        let tmp = TestDbBuilder::new()
            .range("0.0.0.0", "202.102.8.255", 0, "0|0|0|0|0")
            .range("202.102.9.0", "202.102.9.255", 990, "中国|0|江苏省|南京市|电信")
            .range("202.102.10.0", "223.255.255.255", 0, "美国|0|0|0|0")
            .write_temp();
        let db = Ip2RegionDatabase::open(tmp.path()).unwrap();
        let manager = Arc::new(DatabaseManager::with_database(Arc::new(db), 64));
        let state = AppState::new(manager, Duration::from_secs(15));

        (build_router(state), tmp)
    }

    async fn send_get(app: Router, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec();
        (status, content_type, body)
    }

    #[tokio::test]
    async fn test_lookup_found() {
        let (app, _tmp) = create_test_app();

        let (status, content_type, body) = send_get(app, "/?ip=202.102.9.110").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("application/json"));

        let record: RegionRecord = serde_json::from_slice(&body).unwrap();
        assert_eq!(record.city_id, 990);
        assert_eq!(record.country, "中国");
        assert_eq!(record.province, "江苏省");
        assert_eq!(record.city, "南京市");
        assert_eq!(record.isp, "电信");
    }

    #[tokio::test]
    async fn test_lookup_not_found() {
        let (app, _tmp) = create_test_app();

        let (status, _, body) = send_get(app, "/?ip=250.0.0.1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"[]");
    }

    #[tokio::test]
    async fn test_lookup_bad_format() {
        let (app, _tmp) = create_test_app();

        let (status, _, body) = send_get(app, "/?ip=1.2.3").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"[]");
    }

    #[tokio::test]
    async fn test_lookup_missing_param() {
        let (app, _tmp) = create_test_app();

        let (_, _, body) = send_get(app.clone(), "/").await;
        assert_eq!(body, b"[]");

        let (_, _, body) = send_get(app, "/?ip=").await;
        assert_eq!(body, b"[]");
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _tmp) = create_test_app();

        let (status, _, body) = send_get(app, "/health").await;
        assert_eq!(status, StatusCode::OK);

        let health: HealthResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(health.database, "ip2region");
        assert!(!health.loaded);
        assert_eq!(health.status, "lazy");
    }

    #[tokio::test]
    async fn test_health_after_first_lookup() {
        let (app, _tmp) = create_test_app();

        let (_, _, body) = send_get(app.clone(), "/?ip=202.102.9.110").await;
        let record: RegionRecord = serde_json::from_slice(&body).unwrap();
        assert_eq!(record.city_id, 990);

        let (_, _, body) = send_get(app, "/health").await;
        let health: HealthResponse = serde_json::from_slice(&body).unwrap();
        assert!(health.loaded);
        assert_eq!(health.status, "ok");
        assert_eq!(health.cache_entries, 1);
    }

    #[tokio::test]
    async fn test_lookup_repeated_param_uses_first() {
        let (app, _tmp) = create_test_app();

        let (status, content_type, body) =
            send_get(app.clone(), "/?ip=202.102.9.110&ip=1.1.1.1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        let record: RegionRecord = serde_json::from_slice(&body).unwrap();
        assert_eq!(record.city, "南京市");

        let (status, content_type, body) = send_get(app.clone(), "/?ip=202.102.9.110&ip").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        let record: RegionRecord = serde_json::from_slice(&body).unwrap();
        assert_eq!(record.city_id, 990);

        let (status, content_type, body) = send_get(app, "/?ip=&ip=202.102.9.110").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(body, b"[]");
    }

    #[tokio::test]
    async fn test_lookup_ignores_other_params() {
        let (app, _tmp) = create_test_app();

        let (status, _, body) = send_get(app, "/?lang=zh&ip=202.102.9.110&x").await;
        assert_eq!(status, StatusCode::OK);
        let record: RegionRecord = serde_json::from_slice(&body).unwrap();
        assert_eq!(record.isp, "电信");
    }
}
