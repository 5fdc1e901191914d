// src/lib.rs

//! Storefront: an order-placement service.
//!
//! The core operation is checkout with stock reservation: a cart of
//! `(product, quantity)` lines is validated against live stock and either
//! every line is reserved and an order committed, or nothing happens at all.
//! Around it sit the order-history read path, the guarded status-transition
//! call used by fulfillment, and the thin catalog read path.
//!
//! Layering, top to bottom:
//!  - `web`: Actix routes, extractors, and handlers.
//!  - `services`: input validation and orchestration (`OrderService`).
//!  - `store`: the `OrderStore` seam with Postgres and in-memory backends;
//!    the store owns the transaction scope.

// Declare modules according to the planned structure
pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod state;
pub mod store;
pub mod web;

// --- Re-exports for the Public API ---

pub use crate::config::AppConfig;
pub use crate::errors::{AppError, Result};
pub use crate::models::{
  LineItemView, Order, OrderItem, OrderStatus, OrderView, Page, PageParams, Product, RequestedItem,
};
pub use crate::services::OrderService;
pub use crate::state::AppState;
pub use crate::store::{MemoryOrderStore, OrderStore, PgOrderStore};
