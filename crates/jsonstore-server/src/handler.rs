use std::collections::BTreeSet;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use jsonstore_store::DocumentStore;
use jsonstore_types::{Document, PathExpr};

use crate::error::{ApiError, ApiResult};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".into(),
            version: env!("CARGO_PKG_VERSION").into(),
        }
    }
}

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// `GET /configs`
pub async fn list_handler(State(state): State<AppState>) -> ApiResult<Json<Vec<Document>>> {
    state
        .store
        .get_all()
        .map(Json)
        .map_err(|e| ApiError::store("get all documents", e))
}

/// `GET /configs/:name`
pub async fn get_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<Document>> {
    state
        .store
        .get(&name)
        .map(Json)
        .map_err(|e| ApiError::store(format!("get document {name}"), e))
}

/// `GET /configs/search?<path>=<value>`
///
/// The query must name exactly one path. When the key repeats, the first
/// value is used.
pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> ApiResult<Json<Vec<Document>>> {
    let keys: BTreeSet<&str> = params.iter().map(|(k, _)| k.as_str()).collect();
    if keys.len() != 1 {
        return Err(ApiError::bad_request(
            "INVALID_QUERY",
            "search documents: invalid query expression",
        ));
    }
    let (path, value) = &params[0];
    let expr = PathExpr::parse(path).map_err(|e| {
        ApiError::bad_request("INVALID_QUERY", format!("search documents {path}: {e}"))
    })?;

    state
        .store
        .search_expr(&expr, value)
        .map(Json)
        .map_err(|e| ApiError::store(format!("search documents {path}={value}"), e))
}

/// `POST /configs`
pub async fn create_handler(
    State(state): State<AppState>,
    payload: Result<Json<Document>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Json(document) = payload.map_err(malformed_body)?;
    let name = document.name().to_string();
    state
        .store
        .upsert(document)
        .map_err(|e| ApiError::store(format!("create document {name}"), e))?;
    tracing::debug!(%name, "document created");
    Ok(StatusCode::OK)
}

/// `PUT`/`PATCH /configs/:name`
///
/// Replaces the document wholesale. The body must carry the same name as
/// the path; renaming is a delete followed by a create.
pub async fn update_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    payload: Result<Json<Document>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Json(document) = payload.map_err(malformed_body)?;
    if document.name() != name {
        return Err(ApiError::bad_request(
            "NAME_MISMATCH",
            format!(
                "update document {name}: body names {:?}",
                document.name()
            ),
        ));
    }
    state
        .store
        .upsert(document)
        .map_err(|e| ApiError::store(format!("update document {name}"), e))?;
    tracing::debug!(%name, "document updated");
    Ok(StatusCode::OK)
}

/// `DELETE /configs/:name`
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .store
        .delete(&name)
        .map_err(|e| ApiError::store(format!("delete document {name}"), e))?;
    tracing::debug!(%name, "document deleted");
    Ok(StatusCode::OK)
}

fn malformed_body(rejection: JsonRejection) -> ApiError {
    ApiError::bad_request(
        "MALFORMED_BODY",
        format!("malformed request body: {}", rejection.body_text()),
    )
}
