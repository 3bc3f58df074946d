use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, ValidateResponse};

#[get("/health")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("API is up and running 🦀")
}

/// Chain, supply and market figures.
#[get("/info")]
pub async fn get_info(state: web::Data<AppState>) -> impl Responder {
    let info = state.ledger().info();
    HttpResponse::Ok().json(info)
}

/// Check linkage and block hashes of the whole chain.
#[get("/validate")]
pub async fn validate_chain(state: web::Data<AppState>) -> impl Responder {
    let resp = {
        let ledger = state.ledger();
        ValidateResponse {
            valid: ledger.chain().is_valid_chain(),
            length: ledger.chain().len(),
        }
    };
    HttpResponse::Ok().json(resp)
}
