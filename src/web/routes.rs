// src/web/routes.rs

use actix_web::web;

// Liveness only; DB connectivity problems surface per-request.
async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

// This function is called in `main.rs` to configure services for the Actix App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api/v1") // Base path for API version 1
      // Health Check Route
      .route("/health", web::get().to(health_check_handler))
      // Catalog read path (catalog writes are not this service's concern)
      .service(
        web::scope("/products")
          .route(
            "",
            web::get().to(crate::web::handlers::product_handlers::list_products_handler),
          )
          .route(
            "/{product_id}",
            web::get().to(crate::web::handlers::product_handlers::get_product_handler),
          ),
      )
      // Order Routes
      .service(
        web::scope("/orders")
          .route(
            "",
            web::post().to(crate::web::handlers::order_handlers::place_order_handler),
          )
          .route(
            "",
            web::get().to(crate::web::handlers::order_handlers::list_orders_handler),
          )
          .route(
            "/{order_id}/status",
            web::patch().to(crate::web::handlers::order_handlers::update_order_status_handler),
          ),
      ),
  );
}
