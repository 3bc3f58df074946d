use actix_web::{HttpResponse, get, post, web};
use log::debug;
use std::time::Instant;

use super::models::{AppState, CreateTransactionRequest, TransactionsQuery};
use crate::error::LedgerError;
use crate::ledger::{Page, TxFilter};

/// `type=all` (default, mined only) or `pending`; newest first.
#[get("/transactions")]
pub async fn list_transactions(
    state: web::Data<AppState>,
    query: web::Query<TransactionsQuery>,
) -> Result<HttpResponse, LedgerError> {
    let filter: TxFilter = query.kind.as_deref().unwrap_or_default().parse()?;
    let page = Page::new(query.limit, query.offset);
    let txs = state.ledger().list_transactions(page, filter);
    Ok(HttpResponse::Ok().json(txs))
}

#[get("/transaction/{id}")]
pub async fn get_transaction(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, LedgerError> {
    let tx = state.ledger().get_transaction(&path)?;
    Ok(HttpResponse::Ok().json(tx))
}

/// Transfer between wallets; balances move now, the record waits in the pool.
#[post("/transaction/create")]
pub async fn create_transaction(
    state: web::Data<AppState>,
    body: web::Json<CreateTransactionRequest>,
) -> Result<HttpResponse, LedgerError> {
    let t0 = Instant::now();
    debug!(
        "POST /transaction/create - from={} to={} amount={}",
        body.from_address, body.to_address, body.amount
    );

    let tx = state.ledger().create_transaction(body.into_inner().into())?;

    debug!(
        "POST /transaction/create - {} OK ({} ms)",
        tx.tx.id,
        t0.elapsed().as_millis()
    );
    Ok(HttpResponse::Ok().json(tx))
}
