use actix_web::{HttpResponse, get, post, web};

use super::models::{AppState, CreateWalletRequest, ImportWalletRequest};
use crate::error::LedgerError;

#[get("/wallets")]
pub async fn list_wallets(state: web::Data<AppState>) -> HttpResponse {
    let wallets = state.ledger().list_wallets();
    HttpResponse::Ok().json(wallets)
}

#[get("/address/{address}")]
pub async fn get_address(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, LedgerError> {
    let wallet = state.ledger().get_wallet(&path)?;
    Ok(HttpResponse::Ok().json(wallet))
}

#[get("/address/{address}/transactions")]
pub async fn get_address_transactions(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> HttpResponse {
    let txs = state.ledger().address_transactions(&path);
    HttpResponse::Ok().json(txs)
}

/// The response is the only place the new private key is shown.
#[post("/wallet/create")]
pub async fn create_wallet(
    state: web::Data<AppState>,
    body: web::Json<CreateWalletRequest>,
) -> Result<HttpResponse, LedgerError> {
    let view = {
        let mut ledger = state.ledger();
        let wallet = ledger.create_wallet(body.into_inner().into())?;
        wallet.owner_view(ledger.supply().coin_value_usd())
    };
    Ok(HttpResponse::Ok().json(view))
}

#[post("/wallet/import")]
pub async fn import_wallet(
    state: web::Data<AppState>,
    body: web::Json<ImportWalletRequest>,
) -> Result<HttpResponse, LedgerError> {
    let view = {
        let mut ledger = state.ledger();
        let wallet = ledger.import_wallet(body.into_inner().into())?;
        wallet.owner_view(ledger.supply().coin_value_usd())
    };
    Ok(HttpResponse::Ok().json(view))
}
