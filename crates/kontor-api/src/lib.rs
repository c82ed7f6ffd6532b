//! JSON REST API for the Kontor record store.
//!
//! Exposes an axum [`Router`] backed by any
//! [`kontor_core::store::DocumentStore`]. The routes cover the façades a
//! thin administrative frontend needs; the remaining services are
//! consumed in-process. Transport and TLS concerns are the caller's
//! responsibility.

pub mod assets;
pub mod clients;
pub mod contracts;
pub mod error;
pub mod products;
pub mod sales;
pub mod time_clocks;

use std::path::PathBuf;

use axum::{
  Router,
  routing::get,
};
use kontor_core::store::DocumentStore;
use kontor_services::{
  catalog::ProductService,
  operations::{ContractService, FixedAssetService, TimeClockService},
  parties::ClientService,
  selling::SaleService,
};
use serde::Deserialize;

pub use error::ApiError;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` with
/// `KONTOR_*` environment overrides.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers: one service per
/// exposed entity kind, each built over its own clone of the store
/// handle.
#[derive(Clone)]
pub struct AppState<S: DocumentStore> {
  pub products:    ProductService<S>,
  pub clients:     ClientService<S>,
  pub sales:       SaleService<S>,
  pub contracts:   ContractService<S>,
  pub assets:      FixedAssetService<S>,
  pub time_clocks: TimeClockService<S>,
}

impl<S: DocumentStore + Clone> AppState<S> {
  pub fn new(store: S) -> Self {
    Self {
      products:    ProductService::new(store.clone()),
      clients:     ClientService::new(store.clone()),
      sales:       SaleService::new(store.clone()),
      contracts:   ContractService::new(store.clone()),
      assets:      FixedAssetService::new(store.clone()),
      time_clocks: TimeClockService::new(store),
    }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: DocumentStore + Clone + Send + Sync + 'static,
{
  Router::new()
    // Products
    .route(
      "/products",
      get(products::list::<S>).post(products::create::<S>),
    )
    .route(
      "/products/{id}",
      get(products::get_one::<S>)
        .patch(products::update::<S>)
        .delete(products::remove::<S>),
    )
    .route("/products/low-stock", get(products::low_stock::<S>))
    // Clients
    .route("/clients", get(clients::list::<S>).post(clients::create::<S>))
    .route(
      "/clients/{id}",
      get(clients::get_one::<S>)
        .patch(clients::update::<S>)
        .delete(clients::remove::<S>),
    )
    // Sales
    .route("/sales", get(sales::list::<S>).post(sales::create::<S>))
    .route(
      "/sales/{id}",
      get(sales::get_one::<S>).delete(sales::remove::<S>),
    )
    // Contracts
    .route(
      "/contracts",
      get(contracts::list::<S>).post(contracts::create::<S>),
    )
    .route("/contracts/expiring", get(contracts::expiring::<S>))
    .route(
      "/contracts/{id}",
      get(contracts::get_one::<S>)
        .patch(contracts::update::<S>)
        .delete(contracts::remove::<S>),
    )
    // Fixed assets
    .route("/assets", get(assets::list::<S>).post(assets::create::<S>))
    .route(
      "/assets/{id}",
      get(assets::get_one::<S>)
        .patch(assets::update::<S>)
        .delete(assets::remove::<S>),
    )
    .route("/assets/{id}/depreciation", get(assets::depreciation::<S>))
    // Time clock
    .route(
      "/time-clocks",
      get(time_clocks::list::<S>).post(time_clocks::create::<S>),
    )
    .route(
      "/time-clocks/{id}",
      get(time_clocks::get_one::<S>)
        .patch(time_clocks::update::<S>)
        .delete(time_clocks::remove::<S>),
    )
    .with_state(state)
}
