use async_trait::async_trait;
use axum::{
    http::{header, HeaderMap, StatusCode},
    routing::post,
    Router,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;
use wlocate::models::{Fingerprint, ScanObservation, ServerPosition};
use wlocate::services::{AgpsControl, GeolocationClient, GeolocationService, WifiRadio};

/// A request as seen by the mock geolocation server
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub content_type: Option<String>,
    pub content_length: Option<String>,
    pub body: String,
}

#[allow(dead_code)]
pub struct MockServer {
    pub base_url: String,
    pub requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Start an in-process `getpos.php` server answering every request with
/// `status` and `body` after `delay`.
#[allow(dead_code)]
pub async fn spawn_geolocation_server(
    status: StatusCode,
    body: &'static str,
    delay: Duration,
) -> MockServer {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = requests.clone();

    let app = Router::new().route(
        "/getpos.php",
        post(move |headers: HeaderMap, request_body: String| {
            let recorded = recorded.clone();
            async move {
                let header_str = |name: header::HeaderName| {
                    headers
                        .get(name)
                        .and_then(|v| v.to_str().ok())
                        .map(|v| v.to_string())
                };
                recorded.lock().unwrap().push(RecordedRequest {
                    content_type: header_str(header::CONTENT_TYPE),
                    content_length: header_str(header::CONTENT_LENGTH),
                    body: request_body,
                });
                tokio::time::sleep(delay).await;
                (status, body)
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock server");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    MockServer {
        base_url: format!("http://{}/", addr),
        requests,
    }
}

/// Client that bypasses any proxy configured in the environment
#[allow(dead_code)]
pub fn local_client(base_url: &str, timeout: Duration) -> GeolocationClient {
    let http = reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("Failed to build HTTP client");
    GeolocationClient::with_http_client(http, base_url.to_string(), timeout)
}

#[allow(dead_code)]
pub fn sample_scan() -> Vec<ScanObservation> {
    vec![
        ScanObservation::new("00:11:22:33:44:55", -72),
        ScanObservation::new("00:00:00:00:00:00", -20),
        ScanObservation::new("aa:bb:cc:dd:ee:ff", -48),
        ScanObservation::new("12.34.56.78.9a.bc", -60),
    ]
}

/// WiFi radio double counting scan requests
#[allow(dead_code)]
pub struct FakeRadio {
    enabled: AtomicBool,
    scans: AtomicUsize,
}

#[allow(dead_code)]
impl FakeRadio {
    pub fn new(enabled: bool) -> Arc<Self> {
        Arc::new(FakeRadio {
            enabled: AtomicBool::new(enabled),
            scans: AtomicUsize::new(0),
        })
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    pub fn scans(&self) -> usize {
        self.scans.load(Ordering::SeqCst)
    }
}

impl WifiRadio for FakeRadio {
    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    fn start_scan(&self) {
        self.scans.fetch_add(1, Ordering::SeqCst);
    }
}

#[allow(dead_code)]
#[derive(Default)]
pub struct FakeAgps {
    refreshes: AtomicUsize,
}

#[allow(dead_code)]
impl FakeAgps {
    pub fn refreshes(&self) -> usize {
        self.refreshes.load(Ordering::SeqCst)
    }
}

impl AgpsControl for FakeAgps {
    fn refresh_assistance_data(&self) {
        self.refreshes.fetch_add(1, Ordering::SeqCst);
    }
}

/// Geolocation double. When gated, every call waits for [`release`].
///
/// [`release`]: FakeGeolocation::release
#[allow(dead_code)]
pub struct FakeGeolocation {
    calls: AtomicUsize,
    gated: bool,
    gate: Notify,
    response: wlocate::Result<ServerPosition>,
    last_fingerprint: Mutex<Option<Fingerprint>>,
}

#[allow(dead_code)]
impl FakeGeolocation {
    pub fn answering(response: wlocate::Result<ServerPosition>) -> Arc<Self> {
        Arc::new(FakeGeolocation {
            calls: AtomicUsize::new(0),
            gated: false,
            gate: Notify::new(),
            response,
            last_fingerprint: Mutex::new(None),
        })
    }

    pub fn gated(response: wlocate::Result<ServerPosition>) -> Arc<Self> {
        Arc::new(FakeGeolocation {
            calls: AtomicUsize::new(0),
            gated: true,
            gate: Notify::new(),
            response,
            last_fingerprint: Mutex::new(None),
        })
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_fingerprint(&self) -> Option<Fingerprint> {
        self.last_fingerprint.lock().unwrap().clone()
    }
}

#[async_trait]
impl GeolocationService for FakeGeolocation {
    async fn request_position(&self, fingerprint: &Fingerprint) -> wlocate::Result<ServerPosition> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_fingerprint.lock().unwrap() = Some(fingerprint.clone());
        if self.gated {
            self.gate.notified().await;
        }
        self.response.clone()
    }
}

#[allow(dead_code)]
pub fn server_position(latitude: f64, longitude: f64, quality: i32) -> ServerPosition {
    ServerPosition {
        latitude,
        longitude,
        quality,
        country_code: None,
    }
}
