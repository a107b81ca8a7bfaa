//! HTTP handlers.

use actix_web::{HttpResponse, Responder, get, web};

use crate::routes::api::api_v1_clients;

pub mod api;

#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().body("ok")
}

/// Registers every route of the service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health)
        .service(web::scope("/api").service(api_v1_clients));
}
