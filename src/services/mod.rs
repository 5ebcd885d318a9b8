pub mod dispatch;
pub mod geolocation;
pub mod resolver;

pub use dispatch::{ListenerDispatch, LocationEvent, LocationEvents, LocationListener};
pub use geolocation::{GeolocationClient, GeolocationService};
pub use resolver::{AgpsControl, PlatformEvent, PositionResolver, RequestState, WifiRadio};
