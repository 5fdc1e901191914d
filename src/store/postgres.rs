// src/store/postgres.rs

//! Postgres-backed store. Uses runtime-bound queries throughout; the schema
//! lives in schema.sql at the repository root.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;
use tracing::error;
use uuid::Uuid;

use crate::errors::{AppError, Result};
use crate::models::{
  total_cents, LineItemView, Order, OrderItem, OrderStatus, OrderView, Page, PageParams, Product, RequestedItem,
};
use crate::store::OrderStore;

const PRODUCT_COLUMNS: &str = "id, name, description, price_cents, stock_quantity, created_at, updated_at";
const ORDER_COLUMNS: &str = "id, user_id, status, total_price_cents, created_at";

pub struct PgOrderStore {
  pool: PgPool,
}

impl PgOrderStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  /// Line items for a batch of orders, grouped by order id, preserving the
  /// line order the caller submitted at placement.
  async fn fetch_line_items(&self, order_ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<LineItemView>>> {
    #[derive(FromRow)]
    struct ItemRow {
      order_id: Uuid,
      product_id: Uuid,
      product_name: String,
      quantity: i32,
      price_at_purchase_cents: i64,
    }

    if order_ids.is_empty() {
      return Ok(HashMap::new());
    }

    let rows: Vec<ItemRow> = sqlx::query_as(
      "SELECT oi.order_id, oi.product_id, p.name AS product_name, oi.quantity, oi.price_at_purchase_cents \
       FROM order_items oi \
       JOIN products p ON p.id = oi.product_id \
       WHERE oi.order_id = ANY($1) \
       ORDER BY oi.order_id, oi.line_no",
    )
    .bind(order_ids)
    .fetch_all(&self.pool)
    .await?;

    let mut by_order: HashMap<Uuid, Vec<LineItemView>> = HashMap::new();
    for row in rows {
      by_order.entry(row.order_id).or_default().push(LineItemView {
        product_id: row.product_id,
        product_name: row.product_name,
        quantity: row.quantity,
        price_at_purchase_cents: row.price_at_purchase_cents,
      });
    }
    Ok(by_order)
  }
}

#[async_trait]
impl OrderStore for PgOrderStore {
  async fn get_product(&self, id: Uuid) -> Result<Option<Product>> {
    let product: Option<Product> = sqlx::query_as(&format!(
      "SELECT {} FROM products WHERE id = $1",
      PRODUCT_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;
    Ok(product)
  }

  async fn list_products(&self, params: PageParams) -> Result<Page<Product>> {
    let params = params.clamped();

    let (total_items,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
      .fetch_one(&self.pool)
      .await?;

    let products: Vec<Product> = sqlx::query_as(&format!(
      "SELECT {} FROM products ORDER BY name ASC LIMIT $1 OFFSET $2",
      PRODUCT_COLUMNS
    ))
    .bind(params.page_size)
    .bind(params.offset())
    .fetch_all(&self.pool)
    .await?;

    Ok(Page::new(products, params, total_items))
  }

  async fn place_order(&self, user_id: Uuid, items: &[RequestedItem]) -> Result<OrderView> {
    let mut tx = self.pool.begin().await?;

    let order_id = Uuid::new_v4();
    let mut order_items: Vec<OrderItem> = Vec::with_capacity(items.len());
    let mut product_names: Vec<String> = Vec::with_capacity(items.len());

    for item in items {
      // FOR UPDATE serializes competing reservations on the same product
      // row; the read below is consistent for the rest of the transaction.
      let product: Option<Product> = sqlx::query_as(&format!(
        "SELECT {} FROM products WHERE id = $1 FOR UPDATE",
        PRODUCT_COLUMNS
      ))
      .bind(item.product_id)
      .fetch_optional(&mut *tx)
      .await?;

      // Any early return drops `tx`, rolling back every decrement so far.
      let product = product.ok_or(AppError::ProductNotFound {
        product_id: item.product_id,
      })?;
      if product.stock_quantity < item.quantity {
        return Err(AppError::InsufficientStock {
          product_name: product.name,
          requested: item.quantity,
          available: product.stock_quantity,
        });
      }

      // The locked read already checked availability; the predicate keeps
      // the decrement conditional regardless, so stock can never go negative.
      let updated = sqlx::query(
        "UPDATE products SET stock_quantity = stock_quantity - $1, updated_at = NOW() \
         WHERE id = $2 AND stock_quantity >= $1",
      )
      .bind(item.quantity)
      .bind(item.product_id)
      .execute(&mut *tx)
      .await?;
      if updated.rows_affected() == 0 {
        return Err(AppError::InsufficientStock {
          product_name: product.name,
          requested: item.quantity,
          available: product.stock_quantity,
        });
      }

      order_items.push(OrderItem {
        id: Uuid::new_v4(),
        order_id,
        product_id: product.id,
        quantity: item.quantity,
        price_at_purchase_cents: product.price_cents,
      });
      product_names.push(product.name);
    }

    let total_price_cents = total_cents(&order_items);
    let created_at = Utc::now();

    sqlx::query("INSERT INTO orders (id, user_id, status, total_price_cents, created_at) VALUES ($1, $2, $3, $4, $5)")
      .bind(order_id)
      .bind(user_id)
      .bind(OrderStatus::Pending)
      .bind(total_price_cents)
      .bind(created_at)
      .execute(&mut *tx)
      .await?;

    for (line_no, oi) in order_items.iter().enumerate() {
      sqlx::query(
        "INSERT INTO order_items (id, order_id, product_id, line_no, quantity, price_at_purchase_cents) \
         VALUES ($1, $2, $3, $4, $5, $6)",
      )
      .bind(oi.id)
      .bind(oi.order_id)
      .bind(oi.product_id)
      .bind(line_no as i32)
      .bind(oi.quantity)
      .bind(oi.price_at_purchase_cents)
      .execute(&mut *tx)
      .await?;
    }

    tx.commit().await.map_err(|e| {
      error!(error = %e, order_id = %order_id, "Order transaction failed to commit.");
      AppError::TransactionFailed
    })?;

    let items = order_items
      .into_iter()
      .zip(product_names)
      .map(|(oi, product_name)| LineItemView {
        product_id: oi.product_id,
        product_name,
        quantity: oi.quantity,
        price_at_purchase_cents: oi.price_at_purchase_cents,
      })
      .collect();

    Ok(OrderView {
      id: order_id,
      user_id,
      status: OrderStatus::Pending,
      total_price_cents,
      created_at,
      items,
    })
  }

  async fn list_orders(&self, user_id: Uuid, params: PageParams) -> Result<Page<OrderView>> {
    let params = params.clamped();

    let (total_items,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders WHERE user_id = $1")
      .bind(user_id)
      .fetch_one(&self.pool)
      .await?;

    let orders: Vec<Order> = sqlx::query_as(&format!(
      "SELECT {} FROM orders WHERE user_id = $1 ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3",
      ORDER_COLUMNS
    ))
    .bind(user_id)
    .bind(params.page_size)
    .bind(params.offset())
    .fetch_all(&self.pool)
    .await?;

    let order_ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();
    let mut items_by_order = self.fetch_line_items(&order_ids).await?;

    let views = orders
      .into_iter()
      .map(|o| OrderView {
        items: items_by_order.remove(&o.id).unwrap_or_default(),
        id: o.id,
        user_id: o.user_id,
        status: o.status,
        total_price_cents: o.total_price_cents,
        created_at: o.created_at,
      })
      .collect();

    Ok(Page::new(views, params, total_items))
  }

  async fn update_order_status(&self, order_id: Uuid, next: OrderStatus) -> Result<OrderView> {
    let mut tx = self.pool.begin().await?;

    let order: Option<Order> = sqlx::query_as(&format!(
      "SELECT {} FROM orders WHERE id = $1 FOR UPDATE",
      ORDER_COLUMNS
    ))
    .bind(order_id)
    .fetch_optional(&mut *tx)
    .await?;

    let order = order.ok_or_else(|| AppError::NotFound(format!("Order with ID {} not found.", order_id)))?;
    if !order.status.can_transition_to(next) {
      return Err(AppError::InvalidStatusTransition {
        from: order.status,
        to: next,
      });
    }

    sqlx::query("UPDATE orders SET status = $1 WHERE id = $2")
      .bind(next)
      .bind(order_id)
      .execute(&mut *tx)
      .await?;

    tx.commit().await.map_err(|e| {
      error!(error = %e, order_id = %order_id, "Status update transaction failed to commit.");
      AppError::TransactionFailed
    })?;

    let mut items_by_order = self.fetch_line_items(&[order_id]).await?;
    Ok(OrderView {
      items: items_by_order.remove(&order_id).unwrap_or_default(),
      id: order.id,
      user_id: order.user_id,
      status: next,
      total_price_cents: order.total_price_cents,
      created_at: order.created_at,
    })
  }
}
