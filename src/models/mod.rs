pub mod access_point;
pub mod country;
pub mod flags;
pub mod gps;
pub mod position;

pub use access_point::{AccessPoint, Fingerprint, ScanObservation};
pub use country::country_from_code;
pub use flags::RequestFlags;
pub use gps::{GpsFix, GpsState, GpsStatusEvent};
pub use position::{LocationInfo, LocationMethod, ResolvedPosition, ServerPosition};
