// tests/order_placement_tests.rs
mod common; // Reference the common module

use common::*;
use serial_test::serial;
use storefront::errors::AppError;
use storefront::models::OrderStatus;
use uuid::Uuid;

#[tokio::test]
#[serial]
async fn test_successful_order_reserves_stock_and_prices_the_order() {
  let widget = product("Widget", 1000, 3);
  let widget_id = widget.id;
  let app = test_app(vec![widget]);

  let user_id = Uuid::new_v4();
  let order = app
    .orders
    .place_order(user_id, &[item(widget_id, 2)])
    .await
    .expect("order should be placed");

  assert_eq!(order.user_id, user_id);
  assert_eq!(order.status, OrderStatus::Pending);
  assert_eq!(order.total_price_cents, 2000);
  assert_eq!(order.items.len(), 1);
  assert_eq!(order.items[0].product_id, widget_id);
  assert_eq!(order.items[0].product_name, "Widget");
  assert_eq!(order.items[0].quantity, 2);
  assert_eq!(order.items[0].price_at_purchase_cents, 1000);

  assert_eq!(app.store.product_stock(widget_id), Some(1));
  assert_eq!(app.store.order_count(), 1);
}

#[tokio::test]
#[serial]
async fn test_insufficient_stock_message_is_bit_exact_and_nothing_changes() {
  let widget = product("Widget", 1000, 3);
  let widget_id = widget.id;
  let app = test_app(vec![widget]);

  let err = app
    .orders
    .place_order(Uuid::new_v4(), &[item(widget_id, 5)])
    .await
    .expect_err("5 units from a stock of 3 must fail");

  assert_eq!(err.to_string(), "Insufficient stock for Widget");
  match err {
    AppError::InsufficientStock {
      product_name,
      requested,
      available,
    } => {
      assert_eq!(product_name, "Widget");
      assert_eq!(requested, 5);
      assert_eq!(available, 3);
    }
    other => panic!("Expected InsufficientStock, got {:?}", other),
  }

  assert_eq!(app.store.product_stock(widget_id), Some(3));
  assert_eq!(app.store.order_count(), 0);
}

#[tokio::test]
#[serial]
async fn test_unknown_product_fails_the_whole_order() {
  let widget = product("Widget", 1000, 3);
  let widget_id = widget.id;
  let app = test_app(vec![widget]);

  let missing_id = Uuid::new_v4();
  let err = app
    .orders
    .place_order(Uuid::new_v4(), &[item(widget_id, 1), item(missing_id, 1)])
    .await
    .expect_err("unknown product must fail the order");

  match err {
    AppError::ProductNotFound { product_id } => assert_eq!(product_id, missing_id),
    other => panic!("Expected ProductNotFound, got {:?}", other),
  }

  // The first line validated fine, but nothing may have been reserved.
  assert_eq!(app.store.product_stock(widget_id), Some(3));
  assert_eq!(app.store.order_count(), 0);
}

#[tokio::test]
#[serial]
async fn test_failed_order_leaves_every_product_untouched() {
  let gadget = product("Gadget", 500, 5);
  let widget = product("Widget", 1000, 1);
  let (gadget_id, widget_id) = (gadget.id, widget.id);
  let app = test_app(vec![gadget, widget]);

  let err = app
    .orders
    .place_order(Uuid::new_v4(), &[item(gadget_id, 2), item(widget_id, 3)])
    .await
    .expect_err("second line cannot be satisfied");

  assert_eq!(err.to_string(), "Insufficient stock for Widget");
  assert_eq!(app.store.product_stock(gadget_id), Some(5));
  assert_eq!(app.store.product_stock(widget_id), Some(1));
  assert_eq!(app.store.order_count(), 0);
}

#[tokio::test]
#[serial]
async fn test_duplicate_lines_reserve_independently_and_in_order() {
  let widget = product("Widget", 1000, 3);
  let widget_id = widget.id;
  let app = test_app(vec![widget]);

  // Two lines of 2 need 4 units in total; the second line sees only 1 left.
  let err = app
    .orders
    .place_order(Uuid::new_v4(), &[item(widget_id, 2), item(widget_id, 2)])
    .await
    .expect_err("second duplicate line must fail");
  match err {
    AppError::InsufficientStock { requested, available, .. } => {
      assert_eq!(requested, 2);
      assert_eq!(available, 1);
    }
    other => panic!("Expected InsufficientStock, got {:?}", other),
  }
  assert_eq!(app.store.product_stock(widget_id), Some(3));

  // 2 + 1 fits; the lines stay separate rather than being merged.
  let order = app
    .orders
    .place_order(Uuid::new_v4(), &[item(widget_id, 2), item(widget_id, 1)])
    .await
    .expect("2 + 1 from a stock of 3 should succeed");
  assert_eq!(order.items.len(), 2);
  assert_eq!(order.items[0].quantity, 2);
  assert_eq!(order.items[1].quantity, 1);
  assert_eq!(order.total_price_cents, 3000);
  assert_eq!(app.store.product_stock(widget_id), Some(0));
}

#[tokio::test]
#[serial]
async fn test_empty_cart_is_rejected_before_the_store() {
  let app = test_app(vec![]);

  let err = app
    .orders
    .place_order(Uuid::new_v4(), &[])
    .await
    .expect_err("empty cart must be rejected");

  assert!(matches!(err, AppError::Validation(_)));
  assert_eq!(app.store.order_count(), 0);
}

#[tokio::test]
#[serial]
async fn test_non_positive_quantity_is_rejected_before_the_store() {
  let widget = product("Widget", 1000, 3);
  let widget_id = widget.id;
  let app = test_app(vec![widget]);

  for quantity in [0, -2] {
    let err = app
      .orders
      .place_order(Uuid::new_v4(), &[item(widget_id, quantity)])
      .await
      .expect_err("non-positive quantity must be rejected");
    assert!(matches!(err, AppError::Validation(_)));
  }

  assert_eq!(app.store.product_stock(widget_id), Some(3));
  assert_eq!(app.store.order_count(), 0);
}

#[tokio::test]
#[serial]
async fn test_unit_price_is_captured_at_purchase_time() {
  let mut widget = product("Widget", 1000, 10);
  let widget_id = widget.id;
  let app = test_app(vec![widget.clone()]);

  let order = app
    .orders
    .place_order(Uuid::new_v4(), &[item(widget_id, 1)])
    .await
    .expect("order should be placed");
  assert_eq!(order.total_price_cents, 1000);

  // A later catalog price change must not leak into the placed order.
  widget.price_cents = 9999;
  widget.stock_quantity = 9;
  app.store.insert_product(widget);

  let history = app
    .orders
    .list_orders(order.user_id, Default::default())
    .await
    .expect("history should load");
  assert_eq!(history.items.len(), 1);
  assert_eq!(history.items[0].items[0].price_at_purchase_cents, 1000);
  assert_eq!(history.items[0].total_price_cents, 1000);
}

#[tokio::test]
#[serial]
async fn test_concurrent_orders_for_the_last_unit_have_one_winner() {
  let widget = product("Widget", 1000, 1);
  let widget_id = widget.id;
  let app = test_app(vec![widget]);

  let orders_a = app.orders.clone();
  let orders_b = app.orders.clone();
  let user_a = Uuid::new_v4();
  let user_b = Uuid::new_v4();

  let task_a = tokio::spawn(async move { orders_a.place_order(user_a, &[item(widget_id, 1)]).await });
  let task_b = tokio::spawn(async move { orders_b.place_order(user_b, &[item(widget_id, 1)]).await });

  let result_a = task_a.await.expect("task A must not panic");
  let result_b = task_b.await.expect("task B must not panic");

  let successes = [&result_a, &result_b].iter().filter(|r| r.is_ok()).count();
  assert_eq!(successes, 1, "exactly one of the two competing orders may win");

  let loser = if result_a.is_err() { result_a } else { result_b };
  let err = loser.expect_err("the loser must fail");
  assert_eq!(err.to_string(), "Insufficient stock for Widget");

  assert_eq!(app.store.product_stock(widget_id), Some(0));
  assert_eq!(app.store.order_count(), 1);
}
