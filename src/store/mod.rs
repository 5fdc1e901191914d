// src/store/mod.rs

//! Persistence boundary.
//!
//! `OrderStore` is the seam between the service layer and a concrete
//! backend. The Postgres implementation is the production path; the
//! in-memory implementation backs the test suite and local development
//! without a database. Both guarantee the same contract: `place_order` is
//! all-or-nothing, and concurrent reservations of the same product's last
//! unit resolve with at most one winner.

pub mod memory;
pub mod postgres;

pub use memory::MemoryOrderStore;
pub use postgres::PgOrderStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::Result;
use crate::models::{OrderStatus, OrderView, Page, PageParams, Product, RequestedItem};

#[async_trait]
pub trait OrderStore: Send + Sync {
  async fn get_product(&self, id: Uuid) -> Result<Option<Product>>;

  async fn list_products(&self, params: PageParams) -> Result<Page<Product>>;

  /// Atomically reserve stock for every requested line, in input order, and
  /// create the order. The first missing product or insufficient line aborts
  /// the whole operation with no stock mutated and no order created.
  async fn place_order(&self, user_id: Uuid, items: &[RequestedItem]) -> Result<OrderView>;

  /// All orders for `user_id`, newest first.
  async fn list_orders(&self, user_id: Uuid, params: PageParams) -> Result<Page<OrderView>>;

  /// Explicit status-transition call used by fulfillment. Illegal
  /// transitions are rejected; stock is not restored on cancellation.
  async fn update_order_status(&self, order_id: Uuid, next: OrderStatus) -> Result<OrderView>;
}
