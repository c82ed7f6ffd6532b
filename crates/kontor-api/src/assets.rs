//! Handlers for `/assets` (fixed asset) endpoints.
//!
//! | Method   | Path                      | Notes |
//! |----------|---------------------------|-------|
//! | `GET`    | `/assets`                 | Optional `?status=` or `?category=` |
//! | `POST`   | `/assets`                 | Body: [`NewFixedAsset`] |
//! | `GET`    | `/assets/:id`             | 404 if not found |
//! | `PATCH`  | `/assets/:id`             | Body: [`FixedAssetPatch`] |
//! | `DELETE` | `/assets/:id`             | 204 on success |
//! | `GET`    | `/assets/:id/depreciation`| Accrued figure as of now |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{DateTime, Utc};
use kontor_core::{
  Error,
  kind::EntityKind,
  operations::{AssetStatus, FixedAsset, FixedAssetPatch, NewFixedAsset},
  store::DocumentStore,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub status:   Option<AssetStatus>,
  pub category: Option<String>,
}

/// `GET /assets[?status=active][?category=vehicles]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<FixedAsset>>, ApiError>
where
  S: DocumentStore + Clone + Send + Sync + 'static,
{
  let assets = if let Some(status) = params.status {
    state.assets.get_by_status(status).await?
  } else if let Some(category) = params.category.as_deref() {
    state.assets.get_by_category(category).await?
  } else {
    state.assets.get_all().await?
  };
  Ok(Json(assets))
}

/// `POST /assets` — returns 201 + the stored asset.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<NewFixedAsset>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DocumentStore + Clone + Send + Sync + 'static,
{
  let asset = state.assets.create(body).await?;
  Ok((StatusCode::CREATED, Json(asset)))
}

/// `GET /assets/:id`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<FixedAsset>, ApiError>
where
  S: DocumentStore + Clone + Send + Sync + 'static,
{
  let asset = state
    .assets
    .get_by_id(id)
    .await?
    .ok_or_else(|| {
      ApiError::from(Error::not_found(EntityKind::FixedAssets, id))
    })?;
  Ok(Json(asset))
}

/// `PATCH /assets/:id`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<FixedAssetPatch>,
) -> Result<Json<FixedAsset>, ApiError>
where
  S: DocumentStore + Clone + Send + Sync + 'static,
{
  Ok(Json(state.assets.update(id, body).await?))
}

/// `DELETE /assets/:id`
pub async fn remove<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DocumentStore + Clone + Send + Sync + 'static,
{
  state.assets.delete(id).await?;
  Ok(StatusCode::NO_CONTENT)
}

/// Depreciation accrued on an asset, computed at request time.
#[derive(Debug, Serialize)]
pub struct DepreciationReport {
  pub asset_id: Uuid,
  pub as_of:    DateTime<Utc>,
  pub accrued:  f64,
}

/// `GET /assets/:id/depreciation`
pub async fn depreciation<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<DepreciationReport>, ApiError>
where
  S: DocumentStore + Clone + Send + Sync + 'static,
{
  let as_of = Utc::now();
  let accrued = state.assets.depreciation(id, as_of).await?;
  Ok(Json(DepreciationReport { asset_id: id, as_of, accrued }))
}
