//! Handlers for `/clients` endpoints.
//!
//! | Method   | Path           | Notes |
//! |----------|----------------|-------|
//! | `GET`    | `/clients`     | Optional `?document=` or `?active=true` |
//! | `POST`   | `/clients`     | Body: [`NewClient`] |
//! | `GET`    | `/clients/:id` | 404 if not found |
//! | `PATCH`  | `/clients/:id` | Body: [`ClientPatch`] |
//! | `DELETE` | `/clients/:id` | 204 on success |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use kontor_core::{
  Error,
  kind::EntityKind,
  parties::{Client, ClientPatch, NewClient},
  store::DocumentStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub document: Option<String>,
  #[serde(default)]
  pub active:   bool,
}

/// `GET /clients[?document=...][?active=true]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Client>>, ApiError>
where
  S: DocumentStore + Clone + Send + Sync + 'static,
{
  let clients = if let Some(document) = params.document.as_deref() {
    state.clients.get_by_document(document).await?.into_iter().collect()
  } else if params.active {
    state.clients.get_active().await?
  } else {
    state.clients.get_all().await?
  };
  Ok(Json(clients))
}

/// `POST /clients` — returns 201 + the stored client.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<NewClient>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DocumentStore + Clone + Send + Sync + 'static,
{
  let client = state.clients.create(body).await?;
  Ok((StatusCode::CREATED, Json(client)))
}

/// `GET /clients/:id`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Client>, ApiError>
where
  S: DocumentStore + Clone + Send + Sync + 'static,
{
  let client = state
    .clients
    .get_by_id(id)
    .await?
    .ok_or_else(|| ApiError::from(Error::not_found(EntityKind::Clients, id)))?;
  Ok(Json(client))
}

/// `PATCH /clients/:id`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<ClientPatch>,
) -> Result<Json<Client>, ApiError>
where
  S: DocumentStore + Clone + Send + Sync + 'static,
{
  Ok(Json(state.clients.update(id, body).await?))
}

/// `DELETE /clients/:id`
pub async fn remove<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DocumentStore + Clone + Send + Sync + 'static,
{
  state.clients.delete(id).await?;
  Ok(StatusCode::NO_CONTENT)
}
