use std::any::Any;
use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use serde_json::json;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::handler::{self, AppState};

/// Build the axum router with all JsonStore endpoints.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let routes = Router::new()
        .route("/health", get(handler::health_handler))
        .route("/configs/search", get(handler::search_handler))
        .route(
            "/configs",
            get(handler::list_handler).post(handler::create_handler),
        )
        .route(
            "/configs/:name",
            get(handler::get_handler)
                .put(handler::update_handler)
                .patch(handler::update_handler)
                .delete(handler::delete_handler),
        )
        .with_state(state);
    with_middleware(routes, config.request_timeout())
}

/// Wrap `router` in tracing, a request timeout, and panic recovery.
pub(crate) fn with_middleware(router: Router, timeout: Duration) -> Router {
    router
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(recover_panic))
}

fn recover_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    tracing::error!("panic recovery: {detail}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "There was an internal server error" })),
    )
        .into_response()
}
