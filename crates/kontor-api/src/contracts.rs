//! Handlers for `/contracts` endpoints.
//!
//! | Method   | Path                  | Notes |
//! |----------|-----------------------|-------|
//! | `GET`    | `/contracts`          | Optional `?status=` |
//! | `POST`   | `/contracts`          | Body: [`NewContract`] |
//! | `GET`    | `/contracts/expiring` | `?days=` (default 30) |
//! | `GET`    | `/contracts/:id`      | 404 if not found |
//! | `PATCH`  | `/contracts/:id`      | Body: [`ContractPatch`] |
//! | `DELETE` | `/contracts/:id`      | 204 on success |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::Utc;
use kontor_core::{
  Error,
  kind::EntityKind,
  operations::{Contract, ContractPatch, ContractStatus, NewContract},
  store::DocumentStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub status: Option<ContractStatus>,
}

/// `GET /contracts[?status=active]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Contract>>, ApiError>
where
  S: DocumentStore + Clone + Send + Sync + 'static,
{
  let contracts = match params.status {
    Some(status) => state.contracts.get_by_status(status).await?,
    None => state.contracts.get_all().await?,
  };
  Ok(Json(contracts))
}

#[derive(Debug, Deserialize)]
pub struct ExpiringParams {
  pub days: Option<i64>,
}

/// `GET /contracts/expiring?days=30` — active contracts ending within
/// the window, measured from the time of the request.
pub async fn expiring<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<ExpiringParams>,
) -> Result<Json<Vec<Contract>>, ApiError>
where
  S: DocumentStore + Clone + Send + Sync + 'static,
{
  let days = params.days.unwrap_or(30);
  Ok(Json(state.contracts.expiring_within(days, Utc::now()).await?))
}

/// `POST /contracts` — returns 201 + the stored contract.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<NewContract>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DocumentStore + Clone + Send + Sync + 'static,
{
  let contract = state.contracts.create(body).await?;
  Ok((StatusCode::CREATED, Json(contract)))
}

/// `GET /contracts/:id`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Contract>, ApiError>
where
  S: DocumentStore + Clone + Send + Sync + 'static,
{
  let contract = state
    .contracts
    .get_by_id(id)
    .await?
    .ok_or_else(|| ApiError::from(Error::not_found(EntityKind::Contracts, id)))?;
  Ok(Json(contract))
}

/// `PATCH /contracts/:id`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<ContractPatch>,
) -> Result<Json<Contract>, ApiError>
where
  S: DocumentStore + Clone + Send + Sync + 'static,
{
  Ok(Json(state.contracts.update(id, body).await?))
}

/// `DELETE /contracts/:id`
pub async fn remove<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DocumentStore + Clone + Send + Sync + 'static,
{
  state.contracts.delete(id).await?;
  Ok(StatusCode::NO_CONTENT)
}
