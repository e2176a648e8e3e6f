#[cfg(feature = "http_api")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::net::SocketAddr;
    use std::sync::Arc;

    use event_timeline::{EngineConfig, JsonDirectoryStore, http_api, init_logging};
    use tracing::info;

    init_logging(0)?;
    let config = EngineConfig::from_env()?;

    let addr: SocketAddr = std::env::var("EVENT_TIMELINE_HTTP_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
        .parse()?;

    let state = match std::env::var("EVENT_TIMELINE_DATA_DIR") {
        Ok(dir) if !dir.trim().is_empty() => {
            info!(data_dir = %dir, "persisting plans as JSON");
            http_api::AppState::with_store(config, Arc::new(JsonDirectoryStore::new(dir)?))
        }
        _ => http_api::AppState::new(config),
    };

    info!(%addr, "event-timeline HTTP API listening");
    http_api::serve(addr, state).await?;
    Ok(())
}

#[cfg(not(feature = "http_api"))]
fn main() {
    eprintln!("Rebuild with the `http_api` feature to enable the HTTP server.");
}
