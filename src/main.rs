use std::net::SocketAddr;
use std::process;

use accounts_api::{api, config::Config, db, server::Server};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenv::dotenv().ok();

    let config = Config::from_env();

    // Connect to database; unreachable storage is fatal, no retry
    let pool = match db::connect(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to connect to database: {}", e);
            process::exit(1);
        }
    };

    let app = api::router(pool);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let server = match Server::bind(addr).await {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            process::exit(1);
        }
    };

    // Runs until SIGINT/SIGTERM, then drains in-flight requests; a clean
    // return here is the process's success exit.
    if let Err(e) = server.serve(app).await {
        tracing::error!("Server error: {}", e);
        process::exit(1);
    }
}
