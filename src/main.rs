use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wlocate::config::Config;
use wlocate::models::ScanObservation;
use wlocate::services::{GeolocationClient, LocationEvent, PositionResolver, WifiRadio};
use wlocate::RequestFlags;

/// Stands in for the platform radio: always on, scans are replayed from a file.
struct ReplayRadio;

impl WifiRadio for ReplayRadio {
    fn is_enabled(&self) -> bool {
        true
    }

    fn start_scan(&self) {
        tracing::debug!("Scan requested, replaying recorded observations");
    }
}

fn read_observations(path: &str) -> Result<Vec<ScanObservation>, Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read scan file '{}': {}", path, e))?;
    let observations: Vec<ScanObservation> = serde_json::from_str(&raw)
        .map_err(|e| format!("Invalid scan file '{}': {}", path, e))?;
    Ok(observations)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wlocate=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut json_output = false;
    let mut path = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => json_output = true,
            _ => path = Some(arg),
        }
    }
    let path = path.ok_or("usage: wlocate [--json] <scan.json>")?;

    // Load configuration
    let config = Config::from_env().map_err(|e| format!("Failed to load configuration: {}", e))?;
    tracing::info!(server = %config.server_url, "Using geolocation server");

    let observations = read_observations(&path)?;
    tracing::info!("Loaded {} scan observations", observations.len());

    let client = GeolocationClient::with_config(config.server_url.clone(), config.request_timeout);
    let (resolver, mut events) = PositionResolver::new(
        config.resolver.clone(),
        Arc::new(client),
        Arc::new(ReplayRadio),
        None,
    )?;

    // Errors are reported through the event stream as well
    if resolver.resolve(RequestFlags::empty()).is_ok() {
        resolver.on_wifi_scan_results(observations);
    }

    let event = events.next().await;

    if json_output {
        let report = match &event {
            Some(LocationEvent::Received(position)) => serde_json::json!({
                "position": position,
                "info": resolver.last_location_info(),
            }),
            Some(LocationEvent::Error(e)) => serde_json::json!({
                "error": { "code": e.code().as_i32(), "message": e.to_string() },
            }),
            None => serde_json::json!({ "error": { "message": "resolver stopped" } }),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match event {
        Some(LocationEvent::Received(position)) => {
            println!("lat:     {:.6}", position.latitude);
            println!("lon:     {:.6}", position.longitude);
            println!("radius:  {:.0}", position.radius);
            println!("country: {}", position.country());
            Ok(())
        }
        Some(LocationEvent::Error(e)) => {
            Err(format!("Position request failed (code {}): {}", e.code(), e).into())
        }
        None => Err("Resolver stopped without a result".into()),
    }
}
