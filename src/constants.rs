//! Stable library-wide constants.
//!
//! Values here are protocol details, heuristics inherited from the
//! OpenWLANMap client protocol, and default fallbacks for env-var-based
//! configuration. For runtime-tunable settings see
//! [`ResolverConfig`](crate::config::ResolverConfig).

// --- Well-known geolocation servers (base URLs, trailing slash included) ---

/// OpenWLANMap server, used when `WLOCATE_SERVER_URL` is absent.
pub const LOC_SERVER_OPENWLANMAP: &str = "http://openwlanmap.org/";
/// openwifi.su mirror speaking the same protocol.
pub const LOC_SERVER_OPENWIFISU: &str = "http://openwifi.su/";

/// Path of the position endpoint relative to the server base URL.
pub const GETPOS_PATH: &str = "getpos.php";
/// Content type sent with the BSSID list. The trailing `*/*` is what the
/// servers have always received and is kept as-is.
pub const GETPOS_CONTENT_TYPE: &str = "application/x-www-form-urlencoded, */*";

// --- Fingerprint limits ---

/// Maximum number of access points sent in one request.
pub const MAX_NETWORKS: usize = 16;
/// BSSID reported by some drivers for invalid entries.
pub const ZERO_BSSID: &str = "000000000000";
/// Length of a canonical BSSID (hex digits, no separators).
pub const BSSID_HEX_LEN: usize = 12;

// --- Position heuristics ---

/// Server positions get `radius = RADIUS_BASE - quality`.
pub const RADIUS_BASE: f32 = 120.0;
/// Radius reported for GPS fixes that carry no accuracy.
pub const GPS_UNKNOWN_RADIUS: f32 = -1.0;

// --- GPS freshness windows (milliseconds) ---

/// A fix older than this is stale when a satellite status update arrives.
pub const GPS_STATUS_FRESHNESS_MS: u64 = 3_500;
/// A fix older than this is stale when a scan completes.
pub const GPS_REQUEST_FRESHNESS_MS: u64 = 7_500;

// --- Network defaults ---

/// Default timeout for one `getpos.php` exchange. Overridden by
/// `WLOCATE_REQUEST_TIMEOUT_SECS`.
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 10;
