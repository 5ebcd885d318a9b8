use crate::constants::{
    DEFAULT_REQUEST_TIMEOUT_SECONDS, GETPOS_CONTENT_TYPE, GETPOS_PATH, LOC_SERVER_OPENWLANMAP,
};
use crate::error::{LocateError, Result};
use crate::models::{Fingerprint, ServerPosition};
use async_trait::async_trait;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Anything that can turn a fingerprint into a server position.
#[async_trait]
pub trait GeolocationService: Send + Sync {
    async fn request_position(&self, fingerprint: &Fingerprint) -> Result<ServerPosition>;
}

/// Client for OpenWLANMap-compatible `getpos.php` endpoints.
/// Makes exactly one attempt per call.
#[derive(Clone)]
pub struct GeolocationClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl GeolocationClient {
    pub fn new(base_url: String) -> Self {
        GeolocationClient {
            client: Client::new(),
            base_url,
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECONDS),
        }
    }

    pub fn with_config(base_url: String, timeout: Duration) -> Self {
        GeolocationClient {
            client: Client::new(),
            base_url,
            timeout,
        }
    }

    /// Use a preconfigured HTTP client (proxy settings, TLS roots).
    pub fn with_http_client(client: Client, base_url: String, timeout: Duration) -> Self {
        GeolocationClient {
            client,
            base_url,
            timeout,
        }
    }

    pub fn endpoint(&self) -> String {
        if self.base_url.ends_with('/') {
            format!("{}{}", self.base_url, GETPOS_PATH)
        } else {
            format!("{}/{}", self.base_url, GETPOS_PATH)
        }
    }
}

impl Default for GeolocationClient {
    fn default() -> Self {
        GeolocationClient::new(LOC_SERVER_OPENWLANMAP.to_string())
    }
}

#[async_trait]
impl GeolocationService for GeolocationClient {
    async fn request_position(&self, fingerprint: &Fingerprint) -> Result<ServerPosition> {
        let body = build_request_body(fingerprint);
        let url = self.endpoint();

        tracing::debug!(
            networks = fingerprint.len(),
            url = %url,
            "Geolocation request: {} networks",
            fingerprint.len()
        );

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, GETPOS_CONTENT_TYPE)
            .header(CONTENT_LENGTH, body.len())
            .body(body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LocateError::Io(format!("Request timed out after {:?}", self.timeout))
                } else {
                    LocateError::Io(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!(status = %status, "Geolocation server HTTP error {}", status);
            return Err(LocateError::Connection(format!("HTTP {}", status)));
        }

        let text = response
            .text()
            .await
            .map_err(|e| LocateError::Io(format!("Failed to read response: {}", e)))?;

        let position = parse_response(&text)?;
        tracing::debug!(
            lat = position.latitude,
            lon = position.longitude,
            quality = position.quality,
            "Geolocation response: {:.6},{:.6} (quality {})",
            position.latitude,
            position.longitude,
            position.quality
        );
        Ok(position)
    }
}

/// One BSSID per line, CRLF terminated.
pub fn build_request_body(fingerprint: &Fingerprint) -> String {
    fingerprint
        .iter()
        .map(|ap| format!("{}\r\n", ap.bssid))
        .collect()
}

/// Parse the `key=value` lines of a `getpos.php` answer.
///
/// `result=0` (optionally followed by trailing text) aborts with
/// [`LocateError::ParsingResponse`]. `quality`, `lat`, `lon` and `ccode` are
/// read with the first occurrence winning; other keys and lines without `=`
/// are ignored. A number that does not parse is a [`LocateError::Server`].
/// Absent fields default to 0, so a bare answer has radius 120.
pub fn parse_response(body: &str) -> Result<ServerPosition> {
    let mut quality: Option<i32> = None;
    let mut latitude: Option<f64> = None;
    let mut longitude: Option<f64> = None;
    let mut country_code: Option<u16> = None;

    for line in body.lines() {
        let Some((key, value)) = line.trim().split_once('=') else {
            continue;
        };
        let value = value.trim();

        match key.trim() {
            "result" if value.split_whitespace().next() == Some("0") => {
                return Err(LocateError::ParsingResponse(
                    "server returned result=0".to_string(),
                ));
            }
            "quality" if quality.is_none() => quality = Some(parse_field("quality", value)?),
            "lat" if latitude.is_none() => latitude = Some(parse_field("lat", value)?),
            "lon" if longitude.is_none() => longitude = Some(parse_field("lon", value)?),
            "ccode" if country_code.is_none() => {
                country_code = Some(parse_field("ccode", value)?)
            }
            _ => {}
        }
    }

    Ok(ServerPosition {
        latitude: latitude.unwrap_or(0.0),
        longitude: longitude.unwrap_or(0.0),
        quality: quality.unwrap_or(0),
        country_code: country_code.filter(|&c| c != 0),
    })
}

fn parse_field<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| LocateError::Server(format!("Malformed {} value: {:?}", key, value)))
}
