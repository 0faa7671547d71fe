use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

const DEFAULT_PORT: u16 = 5000;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tubeproxy=info,tower_http=info")),
        )
        .init();

    let port = std::env::var("PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let host = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".to_string());

    let addr: SocketAddr = match format!("{}:{}", host, port).parse() {
        Ok(addr) => addr,
        Err(err) => {
            eprintln!("invalid bind address {}:{}: {}", host, port, err);
            std::process::exit(1);
        }
    };

    if let Err(err) = tubeproxy::server::serve(addr).await {
        eprintln!("server error: {}", err);
        std::process::exit(1);
    }
}
