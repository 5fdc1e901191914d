// src/services/orders.rs

//! Order placement and history. Input validation happens here, synchronously,
//! before any store call; the store owns the transaction scope.

use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::{AppError, Result};
use crate::models::{OrderStatus, OrderView, Page, PageParams, RequestedItem};
use crate::store::OrderStore;

#[derive(Clone)]
pub struct OrderService {
  store: Arc<dyn OrderStore>,
}

impl OrderService {
  pub fn new(store: Arc<dyn OrderStore>) -> Self {
    Self { store }
  }

  /// Checkout. Either every requested line is reserved and the order is
  /// committed, or nothing is: the store runs the whole reservation inside
  /// one transaction scope. Validation failures never reach the store.
  #[instrument(
    name = "order_service::place_order",
    skip(self, items),
    fields(user_id = %user_id, line_count = items.len())
  )]
  pub async fn place_order(&self, user_id: Uuid, items: &[RequestedItem]) -> Result<OrderView> {
    if items.is_empty() {
      return Err(AppError::Validation("Order must contain at least one item.".to_string()));
    }
    if let Some(bad) = items.iter().find(|it| it.quantity <= 0) {
      return Err(AppError::Validation(format!(
        "Quantity for product {} must be a positive integer.",
        bad.product_id
      )));
    }

    let order = self.store.place_order(user_id, items).await?;
    info!(
      order_id = %order.id,
      total_price_cents = order.total_price_cents,
      "Order placed and stock reserved."
    );
    Ok(order)
  }

  /// The caller's order history, newest first.
  #[instrument(name = "order_service::list_orders", skip(self), fields(user_id = %user_id))]
  pub async fn list_orders(&self, user_id: Uuid, params: PageParams) -> Result<Page<OrderView>> {
    self.store.list_orders(user_id, params).await
  }

  /// Explicit status-transition call used by the fulfillment side.
  #[instrument(name = "order_service::update_status", skip(self), fields(order_id = %order_id, next = %next))]
  pub async fn update_status(&self, order_id: Uuid, next: OrderStatus) -> Result<OrderView> {
    let order = self.store.update_order_status(order_id, next).await?;
    info!(order_id = %order.id, status = %order.status, "Order status updated.");
    Ok(order)
  }
}
