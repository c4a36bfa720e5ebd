use log::info;
use std::env;
use stepwise_sssp::web::server::{start_server_with_config, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    // Usage: web_server [port] [static_dir]
    let args: Vec<String> = env::args().collect();
    let mut config = ServerConfig::default();
    if let Some(port) = args.get(1) {
        config.port = port.parse()?;
    }
    if let Some(dir) = args.get(2) {
        config.static_dir = dir.clone();
    }

    info!("port: {}", config.port);
    info!("static files: {}", config.static_dir);
    info!("CORS enabled: {}", config.enable_cors);
    info!("max sessions: {}", config.max_sessions);
    info!("max vertices per graph: {}", config.max_vertices);
    info!("session timeout: {} minutes", config.session_timeout_minutes);

    start_server_with_config(config).await?;

    Ok(())
}
