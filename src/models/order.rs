// src/models/order.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type as SqlxType};
use std::fmt;
use uuid::Uuid; // Renamed Type to SqlxType to avoid conflict

// Matches the order_status_enum type in schema.sql.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, SqlxType)]
#[sqlx(type_name = "order_status_enum", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
  Pending,
  Processing,
  Shipped,
  Delivered,
  Cancelled,
}

impl OrderStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      OrderStatus::Pending => "pending",
      OrderStatus::Processing => "processing",
      OrderStatus::Shipped => "shipped",
      OrderStatus::Delivered => "delivered",
      OrderStatus::Cancelled => "cancelled",
    }
  }

  /// Fulfillment advances an order along this graph; `Delivered` and
  /// `Cancelled` are terminal. Cancelling does not restore reserved stock.
  pub fn can_transition_to(self, next: OrderStatus) -> bool {
    use OrderStatus::*;
    matches!(
      (self, next),
      (Pending, Processing) | (Pending, Cancelled) | (Processing, Shipped) | (Processing, Cancelled) | (Shipped, Delivered)
    )
  }
}

impl fmt::Display for OrderStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A confirmed purchase. Created exactly once per successful checkout, never
/// deleted; only `status` changes after creation.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
  pub id: Uuid,
  pub user_id: Uuid,
  pub status: OrderStatus,
  pub total_price_cents: i64,
  pub created_at: DateTime<Utc>,
}

/// One `{product, quantity}` pair from the caller. Duplicate product ids are
/// kept as separate line items and reserved independently, in input order.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestedItem {
  pub product_id: Uuid,
  pub quantity: i32,
}

/// Order plus its resolved line items, the shape handed back to callers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
  pub id: Uuid,
  pub user_id: Uuid,
  pub status: OrderStatus,
  pub total_price_cents: i64,
  pub created_at: DateTime<Utc>,
  pub items: Vec<LineItemView>,
}

/// Line item with the product name resolved from the catalog at read time.
/// The unit price is the one captured when the order was placed, never the
/// current catalog price.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemView {
  pub product_id: Uuid,
  pub product_name: String,
  pub quantity: i32,
  pub price_at_purchase_cents: i64,
}
