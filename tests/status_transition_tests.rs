// tests/status_transition_tests.rs
mod common; // Reference the common module

use common::*;
use serial_test::serial;
use storefront::errors::AppError;
use storefront::models::OrderStatus;
use uuid::Uuid;

#[tokio::test]
#[serial]
async fn test_fulfillment_advances_an_order_to_delivered() {
  let widget = product("Widget", 1000, 10);
  let widget_id = widget.id;
  let app = test_app(vec![widget]);

  let order = app.orders.place_order(Uuid::new_v4(), &[item(widget_id, 1)]).await.unwrap();
  assert_eq!(order.status, OrderStatus::Pending);

  for next in [OrderStatus::Processing, OrderStatus::Shipped, OrderStatus::Delivered] {
    let updated = app.orders.update_status(order.id, next).await.unwrap();
    assert_eq!(updated.status, next);
    assert_eq!(updated.id, order.id);
    assert_eq!(updated.total_price_cents, order.total_price_cents);
  }
}

#[tokio::test]
#[serial]
async fn test_illegal_transitions_are_rejected() {
  let widget = product("Widget", 1000, 10);
  let widget_id = widget.id;
  let app = test_app(vec![widget]);

  let order = app.orders.place_order(Uuid::new_v4(), &[item(widget_id, 1)]).await.unwrap();

  // Pending cannot skip straight to shipped.
  let err = app
    .orders
    .update_status(order.id, OrderStatus::Shipped)
    .await
    .expect_err("pending -> shipped must be rejected");
  assert!(matches!(err, AppError::InvalidStatusTransition { .. }));

  // Terminal states stay terminal.
  app.orders.update_status(order.id, OrderStatus::Cancelled).await.unwrap();
  let err = app
    .orders
    .update_status(order.id, OrderStatus::Processing)
    .await
    .expect_err("cancelled is terminal");
  assert!(matches!(err, AppError::InvalidStatusTransition { .. }));
}

#[tokio::test]
#[serial]
async fn test_cancellation_does_not_restore_stock() {
  let widget = product("Widget", 1000, 3);
  let widget_id = widget.id;
  let app = test_app(vec![widget]);

  let order = app.orders.place_order(Uuid::new_v4(), &[item(widget_id, 2)]).await.unwrap();
  assert_eq!(app.store.product_stock(widget_id), Some(1));

  app.orders.update_status(order.id, OrderStatus::Cancelled).await.unwrap();

  // Restoring reserved stock on cancellation is a separate refund workflow,
  // not part of the transition itself.
  assert_eq!(app.store.product_stock(widget_id), Some(1));
}

#[tokio::test]
#[serial]
async fn test_updating_an_unknown_order_is_not_found() {
  let app = test_app(vec![]);

  let err = app
    .orders
    .update_status(Uuid::new_v4(), OrderStatus::Processing)
    .await
    .expect_err("unknown order id");
  assert!(matches!(err, AppError::NotFound(_)));
}
