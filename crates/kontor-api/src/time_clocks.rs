//! Handlers for `/time-clocks` endpoints.
//!
//! | Method   | Path              | Notes |
//! |----------|-------------------|-------|
//! | `GET`    | `/time-clocks`    | Optional `?employee_id=` or `?date=` |
//! | `POST`   | `/time-clocks`    | Body: [`NewTimeClock`]; totals derived |
//! | `GET`    | `/time-clocks/:id`| 404 if not found |
//! | `PATCH`  | `/time-clocks/:id`| Body: [`TimeClockPatch`]; totals recomputed |
//! | `DELETE` | `/time-clocks/:id`| 204 on success |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::NaiveDate;
use kontor_core::{
  Error,
  kind::EntityKind,
  operations::{NewTimeClock, TimeClock, TimeClockPatch},
  store::DocumentStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub employee_id: Option<Uuid>,
  pub date:        Option<NaiveDate>,
}

/// `GET /time-clocks[?employee_id=...][?date=2026-03-09]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<TimeClock>>, ApiError>
where
  S: DocumentStore + Clone + Send + Sync + 'static,
{
  let entries = if let Some(employee_id) = params.employee_id {
    state.time_clocks.get_by_employee(employee_id).await?
  } else if let Some(date) = params.date {
    state.time_clocks.get_by_date(date).await?
  } else {
    state.time_clocks.get_all().await?
  };
  Ok(Json(entries))
}

/// `POST /time-clocks` — returns 201 + the stored entry with computed
/// totals.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<NewTimeClock>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DocumentStore + Clone + Send + Sync + 'static,
{
  let entry = state.time_clocks.create(body).await?;
  Ok((StatusCode::CREATED, Json(entry)))
}

/// `GET /time-clocks/:id`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<TimeClock>, ApiError>
where
  S: DocumentStore + Clone + Send + Sync + 'static,
{
  let entry = state
    .time_clocks
    .get_by_id(id)
    .await?
    .ok_or_else(|| {
      ApiError::from(Error::not_found(EntityKind::TimeClocks, id))
    })?;
  Ok(Json(entry))
}

/// `PATCH /time-clocks/:id`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<TimeClockPatch>,
) -> Result<Json<TimeClock>, ApiError>
where
  S: DocumentStore + Clone + Send + Sync + 'static,
{
  Ok(Json(state.time_clocks.update(id, body).await?))
}

/// `DELETE /time-clocks/:id`
pub async fn remove<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DocumentStore + Clone + Send + Sync + 'static,
{
  state.time_clocks.delete(id).await?;
  Ok(StatusCode::NO_CONTENT)
}
