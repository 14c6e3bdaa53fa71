// Mergington High School Activities - Web Server

use std::env;
use std::net::SocketAddr;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use mergington_activities::{app, ActivityService, ActivityStore, VERSION};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("mergington_activities=debug".parse()?),
        )
        .init();

    println!("🏫 Mergington High School Activities v{}", VERSION);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // One seeded registry for the process lifetime; every handler
    // shares it through the service handle
    let service = ActivityService::new(ActivityStore::with_default_activities());

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;

    println!("🚀 Server running on http://{}", local);
    println!("   API: http://{}/activities", local);
    println!("   UI:  http://{}/static/index.html", local);

    axum::serve(listener, app(service)).await?;

    Ok(())
}
