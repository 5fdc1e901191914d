// src/web/handlers/order_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{OrderStatus, PageParams, RequestedItem};
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;

// --- Request DTOs ---

#[derive(Deserialize, Debug)]
pub struct PlaceOrderRequest {
  pub items: Vec<RequestedItem>,
}

#[derive(Deserialize, Debug)]
pub struct UpdateOrderStatusRequest {
  pub status: OrderStatus,
}

// --- Handler Implementations ---

#[instrument(
  name = "handler::place_order",
  skip(app_state, req_payload, auth_user),
  fields(user_id = %auth_user.user_id, line_count = req_payload.items.len())
)]
pub async fn place_order_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<PlaceOrderRequest>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  info!("Order placement attempt by user: {}", auth_user.user_id);

  let order = app_state.orders.place_order(auth_user.user_id, &req_payload.items).await?;

  Ok(HttpResponse::Created().json(json!({
    "message": "Order placed successfully.",
    "order": order
  })))
}

#[instrument(
  name = "handler::list_orders",
  skip(app_state, auth_user, query_params),
  fields(user_id = %auth_user.user_id)
)]
pub async fn list_orders_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  query_params: web::Query<PageParams>,
) -> Result<HttpResponse, AppError> {
  let page = app_state
    .orders
    .list_orders(auth_user.user_id, query_params.into_inner())
    .await?;

  info!(
    "Fetched {} of {} orders for user {}.",
    page.items.len(),
    page.total_items,
    auth_user.user_id
  );

  Ok(HttpResponse::Ok().json(json!({
    "message": "Orders fetched successfully.",
    "orders": page
  })))
}

#[instrument(
  name = "handler::update_order_status",
  skip(app_state, path, req_payload),
  fields(order_id = %path.as_ref(), status = %req_payload.status)
)]
pub async fn update_order_status_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  req_payload: web::Json<UpdateOrderStatusRequest>,
) -> Result<HttpResponse, AppError> {
  let order_id = path.into_inner();

  let order = app_state.orders.update_status(order_id, req_payload.status).await?;

  Ok(HttpResponse::Ok().json(json!({
    "message": "Order status updated.",
    "order": order
  })))
}
