use crate::constants::*;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the geolocation server, e.g. `http://openwlanmap.org/`
    pub server_url: String,
    /// Upper bound for one request/response exchange
    pub request_timeout: Duration,
    pub resolver: ResolverConfig,
}

#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Whether GPS fixes may answer a request before the network is asked.
    /// Can still be disabled per request with `NO_GPS_ACCESS`.
    pub gps_wanted: bool,

    /// Maximum fix age accepted when a scan completes
    pub request_freshness: Duration,

    /// Maximum fix age that keeps GPS available on a satellite status update
    pub status_freshness: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            gps_wanted: false,
            request_freshness: Duration::from_millis(GPS_REQUEST_FRESHNESS_MS),
            status_freshness: Duration::from_millis(GPS_STATUS_FRESHNESS_MS),
        }
    }
}

impl ResolverConfig {
    pub fn with_gps(mut self, gps_wanted: bool) -> Self {
        self.gps_wanted = gps_wanted;
        self
    }

    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        Ok(Self {
            gps_wanted: parse_bool(
                "WLOCATE_USE_GPS",
                env::var("WLOCATE_USE_GPS").ok(),
                defaults.gps_wanted,
            )?,
            ..defaults
        })
    }
}

fn parse_bool(name: &str, value: Option<String>, default: bool) -> Result<bool, String> {
    match value.as_deref().map(|v| v.trim().to_lowercase()) {
        None => Ok(default),
        Some(v) => match v.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(format!("Invalid {}", name)),
        },
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        let timeout_secs: u64 = env::var("WLOCATE_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_REQUEST_TIMEOUT_SECONDS.to_string())
            .parse()
            .map_err(|_| "Invalid WLOCATE_REQUEST_TIMEOUT_SECS")?;

        if timeout_secs == 0 {
            return Err("WLOCATE_REQUEST_TIMEOUT_SECS must be greater than 0".to_string());
        }

        let server_url =
            env::var("WLOCATE_SERVER_URL").unwrap_or_else(|_| LOC_SERVER_OPENWLANMAP.to_string());
        if !server_url.starts_with("http://") && !server_url.starts_with("https://") {
            return Err(format!("Invalid WLOCATE_SERVER_URL: {}", server_url));
        }

        Ok(Config {
            server_url,
            request_timeout: Duration::from_secs(timeout_secs),
            resolver: ResolverConfig::from_env()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        env::remove_var("WLOCATE_SERVER_URL");
        env::remove_var("WLOCATE_REQUEST_TIMEOUT_SECS");
        env::remove_var("WLOCATE_USE_GPS");
    }

    #[test]
    #[serial]
    fn test_defaults_when_env_absent() {
        clear_env();
        let config = Config::from_env().unwrap();
        assert_eq!(config.server_url, LOC_SERVER_OPENWLANMAP);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert!(!config.resolver.gps_wanted);
        assert_eq!(config.resolver.request_freshness, Duration::from_millis(7500));
        assert_eq!(config.resolver.status_freshness, Duration::from_millis(3500));
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_env();
        env::set_var("WLOCATE_SERVER_URL", LOC_SERVER_OPENWIFISU);
        env::set_var("WLOCATE_REQUEST_TIMEOUT_SECS", "3");
        env::set_var("WLOCATE_USE_GPS", "true");

        let config = Config::from_env().unwrap();
        assert_eq!(config.server_url, LOC_SERVER_OPENWIFISU);
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert!(config.resolver.gps_wanted);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_values_are_rejected() {
        clear_env();
        env::set_var("WLOCATE_REQUEST_TIMEOUT_SECS", "0");
        assert!(Config::from_env().is_err());

        env::set_var("WLOCATE_REQUEST_TIMEOUT_SECS", "soon");
        assert!(Config::from_env().is_err());

        clear_env();
        env::set_var("WLOCATE_SERVER_URL", "openwlanmap.org");
        assert!(Config::from_env().is_err());

        clear_env();
        env::set_var("WLOCATE_USE_GPS", "maybe");
        assert_eq!(
            Config::from_env().unwrap_err(),
            "Invalid WLOCATE_USE_GPS".to_string()
        );
        clear_env();
    }
}
