use actix_web::{App, HttpServer, middleware::Logger, web};
use dotenvy::dotenv;

use sim_ledger::api::{self, AppState};
use sim_ledger::config::{LedgerConfig, ServerConfig};
use sim_ledger::ledger::Ledger;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let ServerConfig { host, port } = ServerConfig::from_env();
    let ledger = Ledger::new(LedgerConfig::from_env()).map_err(std::io::Error::other)?;

    println!("⛓️ Starting ledger API at http://{host}:{port}");

    let state = web::Data::new(AppState::new(ledger));

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
