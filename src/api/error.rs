use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError, error};
use log::warn;

use super::models::ErrorBody;
use crate::error::LedgerError;

impl ResponseError for LedgerError {
    fn status_code(&self) -> StatusCode {
        match self {
            LedgerError::Validation(_)
            | LedgerError::InsufficientFunds { .. }
            | LedgerError::SupplyCapReached
            | LedgerError::NoRewardAvailable => StatusCode::BAD_REQUEST,
            LedgerError::NotFound(_) => StatusCode::NOT_FOUND,
            LedgerError::Auth(_) => StatusCode::UNAUTHORIZED,
            LedgerError::WalletExists(_) | LedgerError::DuplicateTransaction(_) => {
                StatusCode::CONFLICT
            }
            LedgerError::InvalidBlock(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.kind().to_string(),
            message: self.to_string(),
        })
    }
}

/// Malformed JSON bodies and query strings get the same error shape as
/// ledger validation failures.
pub fn json_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!("{} {} - bad JSON payload: {}", req.method(), req.path(), err);
    let body = LedgerError::Validation(err.to_string()).error_response();
    error::InternalError::from_response(err, body).into()
}

pub fn query_error(err: error::QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!("{} {} - bad query string: {}", req.method(), req.path(), err);
    let body = LedgerError::Validation(err.to_string()).error_response();
    error::InternalError::from_response(err, body).into()
}
