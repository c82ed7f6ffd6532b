//! Handlers for `/sales` endpoints.
//!
//! | Method   | Path         | Notes |
//! |----------|--------------|-------|
//! | `GET`    | `/sales`     | Optional `?client_id=` or `?user_id=` |
//! | `POST`   | `/sales`     | Body: [`NewSale`]; decrements stock |
//! | `GET`    | `/sales/:id` | 404 if not found |
//! | `DELETE` | `/sales/:id` | 204 on success |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use kontor_core::{
  Error,
  kind::EntityKind,
  selling::{NewSale, Sale},
  store::DocumentStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub client_id: Option<Uuid>,
  pub user_id:   Option<Uuid>,
}

/// `GET /sales[?client_id=...][?user_id=...]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Sale>>, ApiError>
where
  S: DocumentStore + Clone + Send + Sync + 'static,
{
  let sales = if let Some(client_id) = params.client_id {
    state.sales.get_by_client(client_id).await?
  } else if let Some(user_id) = params.user_id {
    state.sales.get_by_user(user_id).await?
  } else {
    state.sales.get_all().await?
  };
  Ok(Json(sales))
}

/// `POST /sales` — returns 201 + the stored sale with its number.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<NewSale>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DocumentStore + Clone + Send + Sync + 'static,
{
  let sale = state.sales.create(body).await?;
  Ok((StatusCode::CREATED, Json(sale)))
}

/// `GET /sales/:id`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Sale>, ApiError>
where
  S: DocumentStore + Clone + Send + Sync + 'static,
{
  let sale = state
    .sales
    .get_by_id(id)
    .await?
    .ok_or_else(|| ApiError::from(Error::not_found(EntityKind::Sales, id)))?;
  Ok(Json(sale))
}

/// `DELETE /sales/:id`
pub async fn remove<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DocumentStore + Clone + Send + Sync + 'static,
{
  state.sales.delete(id).await?;
  Ok(StatusCode::NO_CONTENT)
}
