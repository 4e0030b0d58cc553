use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::{method_not_allowed, not_found};
use crate::http::{cors_layer_from_env, security_headers};
use axum::http::StatusCode;
use axum::{Router, middleware};
use core_config::server::ServerConfig;
use std::future::Future;
use std::io;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

/// Combines the API routes with documentation and cross-cutting middleware.
///
/// Sets up:
/// - Swagger UI at `/swagger-ui` (spec at `/api-docs/openapi.json`) and Scalar at `/scalar`
/// - JSON 404 and 405 fallbacks
/// - Request tracing, a request timeout answering `408`, security headers
///   and response compression
/// - CORS, only when `CORS_ALLOWED_ORIGIN` is set
///
/// Routes are mounted at the root; domain routers apply their own state.
///
/// # Errors
/// Returns an error when `CORS_ALLOWED_ORIGIN` is set but holds an invalid origin.
///
/// # Example
/// ```ignore
/// #[derive(OpenApi)]
/// #[openapi(paths(/* your paths */))]
/// struct ApiDoc;
///
/// let routes = Router::new().route("/example", get(handler)).with_state(state);
/// let router = create_router::<ApiDoc>(routes, &ServerConfig::default())?;
/// ```
pub fn create_router<T>(routes: Router, server_config: &ServerConfig) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    let mut router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .merge(Scalar::with_url("/scalar", T::openapi()))
        .merge(routes)
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            server_config.request_timeout(),
        ))
        .layer(middleware::from_fn(security_headers))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    if let Some(cors) = cors_layer_from_env()? {
        router = router.layer(cors);
    }

    Ok(router.layer(CompressionLayer::new()))
}

/// Serves `router` until SIGINT/SIGTERM, then runs `cleanup` within `shutdown_timeout`.
///
/// The server stops accepting connections on the signal and drains in-flight
/// requests; `cleanup` starts once shutdown is initiated.
///
/// # Example
/// ```ignore
/// let client = state.mongo_client.clone();
/// create_production_app(router, &config.server, Duration::from_secs(30), async move {
///     client.shutdown().await;
/// })
/// .await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (coordinator, mut shutdown_rx) = ShutdownCoordinator::new();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let cleanup_handle = tokio::spawn(async move {
        // Err means every sender is gone, which also ends the process
        let _ = shutdown_rx.recv().await;

        info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
        match tokio::time::timeout(shutdown_timeout, cleanup).await {
            Ok(()) => info!("Cleanup completed successfully"),
            Err(_) => warn!(
                "Cleanup exceeded timeout of {:?}, forcing shutdown",
                shutdown_timeout
            ),
        }
    });

    let signal_coordinator = coordinator.clone();
    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { signal_coordinator.wait_for_signal().await })
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    // Releases the cleanup task when serve returned on its own
    coordinator.shutdown();
    cleanup_handle.await.ok();

    serve_result
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::get;
    use tower::ServiceExt;

    #[derive(OpenApi)]
    #[openapi(info(title = "router-test"))]
    struct EmptyDoc;

    fn app() -> Router {
        let routes = Router::new().route("/ping", get(|| async { "pong" }));
        temp_env::with_var_unset("CORS_ALLOWED_ORIGIN", || {
            create_router::<EmptyDoc>(routes, &ServerConfig::default()).unwrap()
        })
    }

    #[tokio::test]
    async fn test_routes_mounted_at_root() {
        let response = app()
            .oneshot(Request::builder().uri("/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-frame-options"], "DENY");
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let response = app()
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()["content-type"], "application/json");
    }

    #[tokio::test]
    async fn test_wrong_method_is_405() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/ping")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_openapi_document_served() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api-docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_empty_cors_origin_list_fails_router_creation() {
        let result = temp_env::with_var("CORS_ALLOWED_ORIGIN", Some(" , "), || {
            create_router::<EmptyDoc>(Router::new(), &ServerConfig::default())
        });

        assert!(result.is_err());
    }
}
