//! HTTP server
//!
//! Combines the per-domain routers, CORS and request logging into the
//! service's single entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::ServiceConfig;
use crate::observability::Logger;
use crate::service::{EnrollmentService, StudentService};
use crate::store::{EnrollmentStore, MemoryStore, StudentStore};

use super::enrollment_routes::enrollment_routes;
use super::response::HealthResponse;
use super::student_routes::student_routes;

/// Shared state for all handlers
#[derive(Clone)]
pub struct AppState {
    pub students: StudentService,
    pub enrollments: EnrollmentService,
}

impl AppState {
    /// Build the services over a persistence gateway.
    pub fn new(
        students: Arc<dyn StudentStore>,
        enrollments: Arc<dyn EnrollmentStore>,
    ) -> Self {
        Self {
            students: StudentService::new(students.clone()),
            enrollments: EnrollmentService::new(students, enrollments),
        }
    }

    /// State backed by the in-memory gateway (tests, local experiments).
    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::new(store.clone(), store)
    }
}

/// HTTP server for the record service
pub struct HttpServer {
    config: ServiceConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server over the given state and configuration.
    pub fn new(config: ServiceConfig, state: AppState) -> Self {
        let router = Self::build_router(state, &config);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(state: AppState, config: &ServiceConfig) -> Router {
        let cors = if config.cors_origins.is_empty() {
            // No origins configured: permissive, for development
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .route("/health", get(health_handler))
            .nest("/students", student_routes(state.clone()))
            .nest("/enrollments", enrollment_routes(state))
            .layer(middleware::from_fn(log_request))
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server (async)
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid socket address: {}", e),
            )
        })?;

        Logger::info("SERVER_START", &[("addr", &addr.to_string())]);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await?;

        Ok(())
    }
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// One log line per handled request.
async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    Logger::info(
        "HTTP_REQUEST",
        &[
            ("method", method.as_str()),
            ("path", path.as_str()),
            ("status", response.status().as_str()),
        ],
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_creation() {
        let server = HttpServer::new(ServiceConfig::default(), AppState::in_memory());
        assert_eq!(server.socket_addr(), "0.0.0.0:3000");
        let _router = server.router();
    }
}
