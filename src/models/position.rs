use crate::constants::{GPS_UNKNOWN_RADIUS, RADIUS_BASE};
use crate::models::country::country_from_code;
use crate::models::{Fingerprint, GpsFix};
use serde::Serialize;

/// Position as answered by the geolocation server.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServerPosition {
    pub latitude: f64,
    pub longitude: f64,
    /// Server-side quality score, 0 when absent
    pub quality: i32,
    pub country_code: Option<u16>,
}

impl ServerPosition {
    /// Uncertainty radius derived from the quality score.
    pub fn radius(&self) -> f32 {
        RADIUS_BASE - self.quality as f32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationMethod {
    #[default]
    None,
    Wifi,
    Gps,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedPosition {
    pub latitude: f64,
    pub longitude: f64,
    pub radius: f32,
    pub country_code: Option<u16>,
    /// Meters per second, GPS only
    pub speed: Option<f32>,
    /// Course over ground in degrees, GPS only
    pub bearing: Option<f32>,
    pub method: LocationMethod,
}

impl ResolvedPosition {
    pub fn from_server(position: &ServerPosition) -> Self {
        ResolvedPosition {
            latitude: position.latitude,
            longitude: position.longitude,
            radius: position.radius(),
            country_code: position.country_code,
            speed: None,
            bearing: None,
            method: LocationMethod::Wifi,
        }
    }

    pub fn from_gps(fix: &GpsFix) -> Self {
        ResolvedPosition {
            latitude: fix.latitude,
            longitude: fix.longitude,
            radius: fix.accuracy.unwrap_or(GPS_UNKNOWN_RADIUS),
            country_code: None,
            speed: fix.speed,
            bearing: fix.bearing,
            method: LocationMethod::Gps,
        }
    }

    /// Two-letter country, empty when the server sent none or an unknown code.
    pub fn country(&self) -> &'static str {
        self.country_code.map(country_from_code).unwrap_or("")
    }
}

/// Snapshot of the most recent resolution cycle.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LocationInfo {
    pub method: LocationMethod,
    /// Fingerprint of the last scan, kept even when GPS answered
    pub fingerprint: Option<Fingerprint>,
    /// Meters per second, only known for GPS results
    pub last_speed: Option<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_radius_from_quality() {
        let pos = ServerPosition {
            latitude: 45.0,
            longitude: 9.0,
            quality: 30,
            country_code: None,
        };
        assert_eq!(pos.radius(), 90.0);
        assert_eq!(ServerPosition { quality: 0, ..pos }.radius(), 120.0);
    }

    #[test]
    fn test_from_server_carries_country() {
        let pos = ServerPosition {
            latitude: 40.7,
            longitude: -74.0,
            quality: 50,
            country_code: Some(188),
        };
        let resolved = ResolvedPosition::from_server(&pos);
        assert_eq!(resolved.method, LocationMethod::Wifi);
        assert_eq!(resolved.radius, 70.0);
        assert_eq!(resolved.country(), "US");
        assert!(resolved.speed.is_none());
    }

    #[test]
    fn test_from_gps_without_accuracy() {
        let mut fix = GpsFix::new(48.85, 2.35, Instant::now());
        fix.speed = Some(1.5);
        fix.bearing = Some(270.0);

        let resolved = ResolvedPosition::from_gps(&fix);
        assert_eq!(resolved.method, LocationMethod::Gps);
        assert_eq!(resolved.radius, GPS_UNKNOWN_RADIUS);
        assert_eq!(resolved.speed, Some(1.5));
        assert_eq!(resolved.bearing, Some(270.0));
        assert_eq!(resolved.country(), "");

        fix.accuracy = Some(8.0);
        assert_eq!(ResolvedPosition::from_gps(&fix).radius, 8.0);
    }

    #[test]
    fn test_json_report_shape() {
        let pos = ServerPosition {
            latitude: 45.0,
            longitude: 9.0,
            quality: 20,
            country_code: Some(188),
        };
        let json = serde_json::to_value(ResolvedPosition::from_server(&pos)).unwrap();
        assert_eq!(json["method"], "wifi");
        assert_eq!(json["radius"], 100.0);
        assert_eq!(json["country_code"], 188);
        assert!(json["speed"].is_null());

        let info = LocationInfo {
            method: LocationMethod::Gps,
            fingerprint: Some(Fingerprint::from_scan(&[
                crate::models::ScanObservation::new("aa:bb:cc:dd:ee:ff", -48),
            ])),
            last_speed: Some(2.0),
        };
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["method"], "gps");
        assert_eq!(
            json["fingerprint"]["access_points"][0]["bssid"],
            "AABBCCDDEEFF"
        );
        assert_eq!(json["fingerprint"]["access_points"][0]["signal"], 48);
        assert_eq!(
            serde_json::to_value(LocationInfo::default()).unwrap()["method"],
            "none"
        );
    }
}
