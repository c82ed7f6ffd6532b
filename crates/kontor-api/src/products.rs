//! Handlers for `/products` endpoints.
//!
//! | Method   | Path                  | Notes |
//! |----------|-----------------------|-------|
//! | `GET`    | `/products`           | Optional `?category=` or `?code=` |
//! | `POST`   | `/products`           | Body: [`NewProduct`] |
//! | `GET`    | `/products/low-stock` | Active products at/below minimum |
//! | `GET`    | `/products/:id`       | 404 if not found |
//! | `PATCH`  | `/products/:id`       | Body: [`ProductPatch`] |
//! | `DELETE` | `/products/:id`       | 204 on success |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use kontor_core::{
  Error,
  catalog::{NewProduct, Product, ProductPatch},
  kind::EntityKind,
  store::DocumentStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub category: Option<String>,
  pub code:     Option<String>,
}

/// `GET /products[?category=...][?code=...]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Product>>, ApiError>
where
  S: DocumentStore + Clone + Send + Sync + 'static,
{
  let products = if let Some(code) = params.code.as_deref() {
    state.products.get_by_code(code).await?.into_iter().collect()
  } else if let Some(category) = params.category.as_deref() {
    state.products.get_by_category(category).await?
  } else {
    state.products.get_all().await?
  };
  Ok(Json(products))
}

/// `GET /products/low-stock`
pub async fn low_stock<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Product>>, ApiError>
where
  S: DocumentStore + Clone + Send + Sync + 'static,
{
  Ok(Json(state.products.low_stock().await?))
}

/// `POST /products` — returns 201 + the stored product.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<NewProduct>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DocumentStore + Clone + Send + Sync + 'static,
{
  let product = state.products.create(body).await?;
  Ok((StatusCode::CREATED, Json(product)))
}

/// `GET /products/:id`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Product>, ApiError>
where
  S: DocumentStore + Clone + Send + Sync + 'static,
{
  let product = state
    .products
    .get_by_id(id)
    .await?
    .ok_or_else(|| ApiError::from(Error::not_found(EntityKind::Products, id)))?;
  Ok(Json(product))
}

/// `PATCH /products/:id`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<ProductPatch>,
) -> Result<Json<Product>, ApiError>
where
  S: DocumentStore + Clone + Send + Sync + 'static,
{
  Ok(Json(state.products.update(id, body).await?))
}

/// `DELETE /products/:id`
pub async fn remove<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DocumentStore + Clone + Send + Sync + 'static,
{
  state.products.delete(id).await?;
  Ok(StatusCode::NO_CONTENT)
}
