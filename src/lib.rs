// Library exports for testing and reusability

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use error::{ErrorCode, LocateError, Result};
pub use models::{Fingerprint, GpsFix, RequestFlags, ResolvedPosition, ScanObservation};
pub use services::{
    GeolocationClient, LocationEvent, LocationEvents, LocationListener, PositionResolver,
    WifiRadio,
};
