mod chain;
mod error;
mod info;
pub mod models;
mod tx;
mod wallet;

use actix_web::web::{self, ServiceConfig};

pub use models::AppState;

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error))
        .app_data(web::QueryConfig::default().error_handler(error::query_error))
        .service(info::health_check)
        .service(info::get_info)
        .service(info::validate_chain)
        .service(chain::list_blocks)
        .service(chain::get_block)
        .service(chain::mine_block)
        .service(tx::list_transactions)
        .service(tx::create_transaction)
        .service(tx::get_transaction)
        .service(wallet::list_wallets)
        .service(wallet::get_address_transactions)
        .service(wallet::get_address)
        .service(wallet::create_wallet)
        .service(wallet::import_wallet);
}
