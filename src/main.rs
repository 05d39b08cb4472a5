use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use dotenvy::dotenv;
use tracing::info;

use nearby::config::DiscoveryConfig;
use nearby::repository::PlaceRepository;
use nearby::web::{app, AppState};

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt::init();

    let config = DiscoveryConfig::from_env();
    let repo = Arc::new(PlaceRepository::new());
    info!(
        "📍 Loaded {} places, default radius {} km, max radius {} km",
        repo.len(),
        config.default_radius_km,
        config.max_radius_km
    );

    let app = app(AppState::new(repo, config));

    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .expect("invalid host/port");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!(
                "⚠️  Could not bind {}: {}. Trying fallback {}:{}",
                addr,
                e,
                host,
                port + 1
            );
            let fallback: SocketAddr = format!("{}:{}", host, port + 1)
                .parse()
                .expect("invalid fallback address");
            tokio::net::TcpListener::bind(fallback)
                .await
                .expect("could not bind fallback port")
        }
    };

    let bound_addr = listener.local_addr().unwrap();
    println!("🚀 Server running on http://{}", bound_addr);
    println!("📍 Try http://{}/discover?latitude=40.7128&longitude=-74.0060&radius=5", bound_addr);

    axum::serve(listener, app).await.unwrap();
}
