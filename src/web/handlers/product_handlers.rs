// src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::PageParams;
use crate::state::AppState;

#[instrument(name = "handler::list_products", skip(app_state, query_params))]
pub async fn list_products_handler(
  app_state: web::Data<AppState>,
  query_params: web::Query<PageParams>,
) -> Result<HttpResponse, AppError> {
  let page = app_state.store.list_products(query_params.into_inner()).await?;

  info!("Successfully fetched {} of {} products.", page.items.len(), page.total_items);

  Ok(HttpResponse::Ok().json(json!({
    "message": "Products fetched successfully.",
    "products": page
  })))
}

#[instrument(name = "handler::get_product", skip(app_state, path), fields(product_id = %path.as_ref()))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let product_id = path.into_inner();

  let product_opt = app_state.store.get_product(product_id).await?;

  match product_opt {
    Some(product) => {
      info!("Product {} fetched successfully.", product_id);
      Ok(HttpResponse::Ok().json(json!({
        "message": "Product fetched successfully.",
        "product": product
      })))
    }
    None => {
      warn!("Product with ID {} not found.", product_id);
      Err(AppError::ProductNotFound { product_id })
    }
  }
}
