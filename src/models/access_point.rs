use crate::constants::{BSSID_HEX_LEN, MAX_NETWORKS, ZERO_BSSID};
use serde::{Deserialize, Serialize};

/// One raw entry of a platform WiFi scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanObservation {
    /// MAC-like identifier as reported by the driver (`aa:bb:..`, `aa.bb..`)
    pub bssid: String,
    /// Signal level in dBm, negative by platform convention
    pub level: i32,
}

impl ScanObservation {
    pub fn new(bssid: impl Into<String>, level: i32) -> Self {
        ScanObservation {
            bssid: bssid.into(),
            level,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessPoint {
    /// 12 uppercase hex digits, no separators
    pub bssid: String,
    /// Absolute dBm magnitude
    pub signal: u32,
}

/// Uppercase the identifier and strip `:` and `.` separators.
pub fn normalize_bssid(raw: &str) -> String {
    raw.chars()
        .filter(|c| *c != ':' && *c != '.')
        .flat_map(char::to_uppercase)
        .collect()
}

fn is_valid_bssid(bssid: &str) -> bool {
    bssid.len() == BSSID_HEX_LEN
        && bssid.chars().all(|c| c.is_ascii_hexdigit())
        && bssid != ZERO_BSSID
}

/// Access points of one scan, strongest first, at most [`MAX_NETWORKS`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Fingerprint {
    access_points: Vec<AccessPoint>,
}

impl Fingerprint {
    pub fn from_scan(observations: &[ScanObservation]) -> Self {
        let mut valid: Vec<(String, i32)> = observations
            .iter()
            .filter_map(|obs| {
                let bssid = normalize_bssid(&obs.bssid);
                if is_valid_bssid(&bssid) {
                    Some((bssid, obs.level))
                } else {
                    tracing::debug!(bssid = %obs.bssid, "Skipping invalid BSSID");
                    None
                }
            })
            .collect();

        // sort_by is stable: equal levels keep scan order
        valid.sort_by(|a, b| b.1.cmp(&a.1));
        valid.truncate(MAX_NETWORKS);

        Fingerprint {
            access_points: valid
                .into_iter()
                .map(|(bssid, level)| AccessPoint {
                    bssid,
                    signal: level.unsigned_abs(),
                })
                .collect(),
        }
    }

    pub fn access_points(&self) -> &[AccessPoint] {
        &self.access_points
    }

    pub fn len(&self) -> usize {
        self.access_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.access_points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AccessPoint> {
        self.access_points.iter()
    }
}
