// src/state.rs
use crate::config::AppConfig;
use crate::services::OrderService;
use crate::store::OrderStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub store: Arc<dyn OrderStore>,
  pub orders: OrderService,
  pub config: Arc<AppConfig>, // Share loaded config
}
