#[cfg(feature = "http_api")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::net::SocketAddr;

    use timetable_tool::{
        EngineConfig, TermFeed, TimetableEngine, http_api, load_config_from_json,
        load_feed_from_json,
    };
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let addr: SocketAddr = std::env::var("TIMETABLE_HTTP_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
        .parse()?;

    let feed = match std::env::var("TIMETABLE_FEED_PATH") {
        Ok(path) => load_feed_from_json(&path)?,
        Err(_) => {
            tracing::warn!("TIMETABLE_FEED_PATH not set; serving an empty feed");
            TermFeed::default()
        }
    };
    let config = match std::env::var("TIMETABLE_CONFIG_PATH") {
        Ok(path) => load_config_from_json(&path)?,
        Err(_) => EngineConfig::default(),
    };
    let engine = TimetableEngine::from_config(&config)?;

    tracing::info!(entries = feed.len(), term = ?feed.term, "loaded schedule feed");
    http_api::serve(addr, feed, engine).await?;
    Ok(())
}

#[cfg(not(feature = "http_api"))]
fn main() {
    eprintln!("Rebuild with the `http_api` feature to enable the HTTP server.");
}
