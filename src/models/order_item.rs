// src/models/order_item.rs

use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Immutable line-item row. The purchase-time unit price is captured here and
/// never recomputed from the catalog.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
  pub id: Uuid,
  pub order_id: Uuid,
  pub product_id: Uuid,
  pub quantity: i32,
  pub price_at_purchase_cents: i64,
  // created_at/updated_at usually not needed for immutable line items
}

/// Order total: sum of quantity x captured unit price. Prices are integer
/// cents, so the two-decimal rounding in the order contract is exact.
pub fn total_cents(items: &[OrderItem]) -> i64 {
  items.iter().map(|it| i64::from(it.quantity) * it.price_at_purchase_cents).sum()
}
