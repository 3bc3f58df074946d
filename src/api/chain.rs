use actix_web::{HttpResponse, get, post, web};
use log::debug;

use super::models::{AppState, MineRequest, PageQuery};
use crate::error::LedgerError;
use crate::ledger::Page;

/// Blocks, highest first.
#[get("/blocks")]
pub async fn list_blocks(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> HttpResponse {
    let page = Page::new(query.limit, query.offset);
    let blocks = state.ledger().list_blocks(page);
    HttpResponse::Ok().json(blocks)
}

/// Block by height (all digits) or by hash.
#[get("/block/{id}")]
pub async fn get_block(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, LedgerError> {
    let block = state.ledger().get_block(&path)?;
    Ok(HttpResponse::Ok().json(block))
}

/// Mint a block for `minerAddress`:
/// - reward clamped to the remaining supply
/// - oldest pending transactions included, then dropped from the pool
#[post("/mine")]
pub async fn mine_block(
    state: web::Data<AppState>,
    req: web::Json<MineRequest>,
) -> Result<HttpResponse, LedgerError> {
    debug!("POST /mine - miner={}", req.miner_address);
    let result = state.ledger().mine(&req.miner_address)?;
    Ok(HttpResponse::Ok().json(result))
}
