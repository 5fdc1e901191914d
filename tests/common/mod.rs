// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use chrono::Utc;
use std::sync::Arc;
use tracing::Level;
use uuid::Uuid;

use storefront::models::{Product, RequestedItem};
use storefront::services::OrderService;
use storefront::store::MemoryOrderStore;

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Builders ---

pub fn product(name: &str, price_cents: i64, stock_quantity: i32) -> Product {
  let now = Utc::now();
  Product {
    id: Uuid::new_v4(),
    name: name.to_string(),
    description: None,
    price_cents,
    stock_quantity,
    created_at: now,
    updated_at: now,
  }
}

pub fn item(product_id: Uuid, quantity: i32) -> RequestedItem {
  RequestedItem { product_id, quantity }
}

// --- Test fixture: a service wired to a seeded in-memory store ---

pub struct TestApp {
  pub store: Arc<MemoryOrderStore>,
  pub orders: OrderService,
}

pub fn test_app(products: Vec<Product>) -> TestApp {
  setup_tracing();
  let store = Arc::new(MemoryOrderStore::new());
  for p in products {
    store.insert_product(p);
  }
  let orders = OrderService::new(store.clone());
  TestApp { store, orders }
}
