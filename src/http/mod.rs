use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Query, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use crate::db::ClientStore;
use crate::domain::Client;

/// Shared handle the handlers use to reach storage.
pub type Store = Arc<dyn ClientStore>;

/// Failures surfaced to HTTP callers.
///
/// Storage errors pass through unmodified and become a 500; absence of data
/// is an empty listing, never an error.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Storage(err) => {
                tracing::error!(error = ?err, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ClientsQuery {
    pub email: Option<String>,
}

/// Build the application router over the given store.
pub fn router(store: Store) -> Router {
    Router::new()
        .route("/", get(read_root))
        .route("/clients", get(list_clients))
        .layer(middleware::from_fn(track_latency))
        .with_state(store)
}

/// Bind the router to an already-listening socket and serve it.
pub async fn run(listener: TcpListener, store: Store) -> Result<(), std::io::Error> {
    axum::serve(listener, router(store)).await
}

async fn read_root() -> Json<Value> {
    Json(json!({ "Hello": "World" }))
}

async fn list_clients(
    State(store): State<Store>,
    Query(query): Query<ClientsQuery>,
) -> Result<Json<Vec<Client>>, ApiError> {
    let clients = store.list_clients(query.email.as_deref()).await?;
    Ok(Json(clients))
}

/// Log one line per request with the time spent serving it.
async fn track_latency(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;

    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
    tracing::info!(%method, path, status = %response.status().as_u16(), elapsed_ms, "request served");

    response
}
