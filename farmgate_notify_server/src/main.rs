use dotenvy::dotenv;
use farmgate_notify_server::{config::ServerConfig, server::run_server};
use log::info;

#[actix_web::main]
async fn main() {
    dotenv().ok();
    env_logger::init();
    let config = ServerConfig::from_env_or_default();

    info!(
        "🚀️ Starting trigger server for region {} on {}:{} ({} workers max)",
        config.region, config.host, config.port, config.max_instances
    );
    match run_server(config).await {
        Ok(_) => println!("Bye!"),
        Err(e) => eprintln!("{e}"),
    }
}
