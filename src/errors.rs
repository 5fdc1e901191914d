// src/errors.rs

use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::models::OrderStatus;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Authentication Failed: {0}")]
  Auth(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Product not found: {product_id}")]
  ProductNotFound { product_id: Uuid },

  // The display string is a contract: callers match on it verbatim.
  #[error("Insufficient stock for {product_name}")]
  InsufficientStock {
    product_name: String,
    requested: i32,
    available: i32,
  },

  #[error("Cannot transition order from '{from}' to '{to}'")]
  InvalidStatusTransition { from: OrderStatus, to: OrderStatus },

  // Commit or write-conflict failure. Nothing was persisted, so the whole
  // placement call may be retried from the top.
  #[error("Order transaction failed; the request may be retried")]
  TransactionFailed,

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Internal Server Error: {0}")]
  Internal(String), // For miscellaneous errors
}

// Allow anyhow::Error to be converted into AppError for convenience in code
// using `?` on functions returning anyhow::Result.
impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    if err.is::<sqlx::Error>() {
      return AppError::Sqlx(err.downcast::<sqlx::Error>().unwrap());
    }
    AppError::Internal(err.to_string())
  }
}

impl ResponseError for AppError {
  fn error_response(&self) -> HttpResponse {
    // Log the full error when it's turned into a response
    tracing::error!(application_error = %self, "Responding with error");
    match self {
      AppError::Validation(m) => HttpResponse::BadRequest().json(json!({"error": m})),
      AppError::Auth(m) => HttpResponse::Unauthorized().json(json!({"error": m})),
      AppError::NotFound(m) => HttpResponse::NotFound().json(json!({"error": m})),
      AppError::ProductNotFound { .. } => HttpResponse::NotFound().json(json!({"error": self.to_string()})),
      AppError::InsufficientStock {
        requested, available, ..
      } => HttpResponse::Conflict().json(json!({
        "error": self.to_string(),
        "requested": requested,
        "available": available,
      })),
      AppError::InvalidStatusTransition { .. } => HttpResponse::Conflict().json(json!({"error": self.to_string()})),
      AppError::TransactionFailed => HttpResponse::ServiceUnavailable().json(json!({
        "error": self.to_string(),
        "retryable": true,
      })),
      AppError::Config(m) => {
        HttpResponse::InternalServerError().json(json!({"error": "Configuration issue", "detail": m}))
      }
      AppError::Sqlx(_) => HttpResponse::InternalServerError().json(json!({"error": "Database operation failed"})),
      AppError::Internal(m) => {
        HttpResponse::InternalServerError().json(json!({"error": "An internal error occurred", "detail": m}))
      }
    }
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn insufficient_stock_message_is_bit_exact() {
    let err = AppError::InsufficientStock {
      product_name: "Widget".to_string(),
      requested: 5,
      available: 2,
    };
    assert_eq!(err.to_string(), "Insufficient stock for Widget");
  }

  #[test]
  fn product_not_found_names_the_product() {
    let product_id = Uuid::new_v4();
    let err = AppError::ProductNotFound { product_id };
    assert!(err.to_string().contains(&product_id.to_string()));
  }
}
