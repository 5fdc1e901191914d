// src/store/memory.rs

//! In-memory store. The mutex is the transaction scope: every operation runs
//! under one lock acquisition, so reads and writes within a call are
//! serializable with respect to every other call.
//!
//! Lock guards are blocking and are never held across an `.await` point;
//! none of the methods below suspend while holding the lock.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::HashMap;
use uuid::Uuid;

use crate::errors::{AppError, Result};
use crate::models::{
  total_cents, LineItemView, Order, OrderItem, OrderStatus, OrderView, Page, PageParams, Product, RequestedItem,
};
use crate::store::OrderStore;

#[derive(Default)]
struct MemoryInner {
  products: HashMap<Uuid, Product>,
  // Insertion order doubles as the created_at tie-break: newest is last.
  orders: Vec<StoredOrder>,
}

struct StoredOrder {
  order: Order,
  items: Vec<OrderItem>,
}

#[derive(Default)]
pub struct MemoryOrderStore {
  inner: Mutex<MemoryInner>,
}

impl MemoryOrderStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Puts a product into the catalog, replacing any previous entry with the
  /// same id.
  pub fn insert_product(&self, product: Product) {
    self.inner.lock().products.insert(product.id, product);
  }

  pub fn product_stock(&self, id: Uuid) -> Option<i32> {
    self.inner.lock().products.get(&id).map(|p| p.stock_quantity)
  }

  pub fn order_count(&self) -> usize {
    self.inner.lock().orders.len()
  }

  fn view_of(inner: &MemoryInner, stored: &StoredOrder) -> OrderView {
    let items = stored
      .items
      .iter()
      .map(|oi| LineItemView {
        product_id: oi.product_id,
        product_name: inner
          .products
          .get(&oi.product_id)
          .map(|p| p.name.clone())
          .unwrap_or_default(),
        quantity: oi.quantity,
        price_at_purchase_cents: oi.price_at_purchase_cents,
      })
      .collect();
    OrderView {
      id: stored.order.id,
      user_id: stored.order.user_id,
      status: stored.order.status,
      total_price_cents: stored.order.total_price_cents,
      created_at: stored.order.created_at,
      items,
    }
  }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
  async fn get_product(&self, id: Uuid) -> Result<Option<Product>> {
    Ok(self.inner.lock().products.get(&id).cloned())
  }

  async fn list_products(&self, params: PageParams) -> Result<Page<Product>> {
    let params = params.clamped();
    let inner = self.inner.lock();

    let mut products: Vec<Product> = inner.products.values().cloned().collect();
    products.sort_by(|a, b| a.name.cmp(&b.name));
    let total_items = products.len() as i64;

    let items = products
      .into_iter()
      .skip(params.offset() as usize)
      .take(params.page_size as usize)
      .collect();
    Ok(Page::new(items, params, total_items))
  }

  async fn place_order(&self, user_id: Uuid, items: &[RequestedItem]) -> Result<OrderView> {
    let mut inner = self.inner.lock();

    // Validation pass. Each line is checked against a working view that
    // already accounts for decrements planned by earlier lines of this same
    // request, so duplicate product ids reserve sequentially. Nothing is
    // applied yet; an error here leaves the store untouched.
    let order_id = Uuid::new_v4();
    let mut planned: HashMap<Uuid, i32> = HashMap::new();
    let mut order_items: Vec<OrderItem> = Vec::with_capacity(items.len());
    let mut product_names: Vec<String> = Vec::with_capacity(items.len());

    for item in items {
      let product = inner.products.get(&item.product_id).ok_or(AppError::ProductNotFound {
        product_id: item.product_id,
      })?;
      let available = product.stock_quantity - planned.get(&item.product_id).copied().unwrap_or(0);
      if available < item.quantity {
        return Err(AppError::InsufficientStock {
          product_name: product.name.clone(),
          requested: item.quantity,
          available,
        });
      }

      *planned.entry(item.product_id).or_insert(0) += item.quantity;
      order_items.push(OrderItem {
        id: Uuid::new_v4(),
        order_id,
        product_id: item.product_id,
        quantity: item.quantity,
        price_at_purchase_cents: product.price_cents,
      });
      product_names.push(product.name.clone());
    }

    // Apply pass. No fallible step remains, so the commit cannot be partial.
    let now = Utc::now();
    for (product_id, quantity) in &planned {
      if let Some(product) = inner.products.get_mut(product_id) {
        product.stock_quantity -= quantity;
        product.updated_at = now;
      }
    }

    let total_price_cents = total_cents(&order_items);
    let order = Order {
      id: order_id,
      user_id,
      status: OrderStatus::Pending,
      total_price_cents,
      created_at: now,
    };

    let items = order_items
      .iter()
      .zip(product_names)
      .map(|(oi, product_name)| LineItemView {
        product_id: oi.product_id,
        product_name,
        quantity: oi.quantity,
        price_at_purchase_cents: oi.price_at_purchase_cents,
      })
      .collect();
    let view = OrderView {
      id: order_id,
      user_id,
      status: OrderStatus::Pending,
      total_price_cents,
      created_at: now,
      items,
    };

    inner.orders.push(StoredOrder {
      order,
      items: order_items,
    });
    Ok(view)
  }

  async fn list_orders(&self, user_id: Uuid, params: PageParams) -> Result<Page<OrderView>> {
    let params = params.clamped();
    let inner = self.inner.lock();

    let mine: Vec<&StoredOrder> = inner
      .orders
      .iter()
      .rev() // newest first
      .filter(|s| s.order.user_id == user_id)
      .collect();
    let total_items = mine.len() as i64;

    let views = mine
      .into_iter()
      .skip(params.offset() as usize)
      .take(params.page_size as usize)
      .map(|s| Self::view_of(&inner, s))
      .collect();
    Ok(Page::new(views, params, total_items))
  }

  async fn update_order_status(&self, order_id: Uuid, next: OrderStatus) -> Result<OrderView> {
    let mut inner = self.inner.lock();

    let position = inner
      .orders
      .iter()
      .position(|s| s.order.id == order_id)
      .ok_or_else(|| AppError::NotFound(format!("Order with ID {} not found.", order_id)))?;

    let current = inner.orders[position].order.status;
    if !current.can_transition_to(next) {
      return Err(AppError::InvalidStatusTransition { from: current, to: next });
    }

    inner.orders[position].order.status = next;
    let view = Self::view_of(&inner, &inner.orders[position]);
    Ok(view)
  }
}
