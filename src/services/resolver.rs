use crate::config::ResolverConfig;
use crate::error::{LocateError, Result};
use crate::models::{
    Fingerprint, GpsFix, GpsState, GpsStatusEvent, LocationInfo, LocationMethod, RequestFlags,
    ResolvedPosition, ScanObservation, ServerPosition,
};
use crate::services::dispatch::{self, ListenerDispatch, LocationEvents};
use crate::services::geolocation::GeolocationService;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Instant;
use tokio::runtime::Handle;

/// Platform WiFi radio.
pub trait WifiRadio: Send + Sync {
    fn is_enabled(&self) -> bool;

    /// Ask for a scan. Results come back through
    /// [`PositionResolver::on_wifi_scan_results`].
    fn start_scan(&self);
}

/// Platform hook for refreshing assisted-GPS data (time, ephemeris).
pub trait AgpsControl: Send + Sync {
    fn refresh_assistance_data(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    Scanning,
    AwaitingNetworkResponse,
}

/// Everything the platform layer can push into a resolver.
#[derive(Debug, Clone)]
pub enum PlatformEvent {
    ScanResults(Vec<ScanObservation>),
    GpsFix(GpsFix),
    GpsAvailability(bool),
    GpsStatus(GpsStatusEvent),
}

struct Shared {
    state: RequestState,
    flags: RequestFlags,
    gps: GpsState,
    agps_updated: bool,
    info: LocationInfo,
}

struct Inner {
    config: ResolverConfig,
    client: Arc<dyn GeolocationService>,
    wifi: Arc<dyn WifiRadio>,
    agps: Option<Arc<dyn AgpsControl>>,
    runtime: Handle,
    dispatch: ListenerDispatch,
    shared: Mutex<Shared>,
}

/// Resolves the device position from a fresh GPS fix or, failing that, from
/// a WiFi fingerprint sent to a geolocation server.
///
/// At most one server request is in flight per resolver. Results and errors
/// arrive on the [`LocationEvents`] returned by the constructor. Inbound
/// platform callbacks may be called from any thread.
pub struct PositionResolver {
    inner: Arc<Inner>,
}

impl PositionResolver {
    /// Build a resolver that spawns its network work on the current tokio
    /// runtime.
    pub fn new(
        config: ResolverConfig,
        client: Arc<dyn GeolocationService>,
        wifi: Arc<dyn WifiRadio>,
        agps: Option<Arc<dyn AgpsControl>>,
    ) -> Result<(Self, LocationEvents)> {
        let runtime = Handle::try_current()
            .map_err(|e| LocateError::Internal(format!("No tokio runtime available: {}", e)))?;
        Ok(Self::with_runtime(config, client, wifi, agps, runtime))
    }

    pub fn with_runtime(
        config: ResolverConfig,
        client: Arc<dyn GeolocationService>,
        wifi: Arc<dyn WifiRadio>,
        agps: Option<Arc<dyn AgpsControl>>,
        runtime: Handle,
    ) -> (Self, LocationEvents) {
        let (dispatch, events) = dispatch::channel();
        let inner = Inner {
            config,
            client,
            wifi,
            agps,
            runtime,
            dispatch,
            shared: Mutex::new(Shared {
                state: RequestState::Idle,
                flags: RequestFlags::empty(),
                gps: GpsState::default(),
                agps_updated: false,
                info: LocationInfo::default(),
            }),
        };

        (
            PositionResolver {
                inner: Arc::new(inner),
            },
            events,
        )
    }

    /// Start one resolution cycle.
    ///
    /// Fails fast with [`LocateError::ThreadAlreadyRunning`] while a server
    /// request is outstanding, and with [`LocateError::WifiDisabled`] when
    /// the radio is off. Failures are also sent to the listener.
    #[tracing::instrument(skip(self))]
    pub fn resolve(&self, flags: RequestFlags) -> Result<()> {
        let inner = &self.inner;
        let gps_wanted = inner.gps_wanted(flags);

        let refresh_agps = {
            let mut shared = inner.lock();
            if shared.state == RequestState::AwaitingNetworkResponse {
                drop(shared);
                return inner.reject(LocateError::ThreadAlreadyRunning);
            }
            let refresh =
                gps_wanted && flags.contains(RequestFlags::UPDATE_AGPS) && !shared.agps_updated;
            if refresh {
                shared.agps_updated = true;
            }
            refresh
        };

        if refresh_agps {
            if let Some(agps) = &inner.agps {
                tracing::debug!("Refreshing AGPS assistance data");
                agps.refresh_assistance_data();
            }
        }

        if !inner.wifi.is_enabled() {
            let mut shared = inner.lock();
            if shared.state == RequestState::Scanning {
                shared.state = RequestState::Idle;
            }
            drop(shared);
            return inner.reject(LocateError::WifiDisabled);
        }

        {
            let mut shared = inner.lock();
            if shared.state == RequestState::AwaitingNetworkResponse {
                drop(shared);
                return inner.reject(LocateError::ThreadAlreadyRunning);
            }
            shared.state = RequestState::Scanning;
            shared.flags = flags;
        }

        tracing::debug!("Starting WiFi scan");
        inner.wifi.start_scan();
        Ok(())
    }

    /// Scan-completed callback. Ignored unless a cycle is waiting for it.
    pub fn on_wifi_scan_results(&self, observations: Vec<ScanObservation>) {
        let inner = &self.inner;
        let fingerprint = Fingerprint::from_scan(&observations);
        let now = Instant::now();

        let mut shared = inner.lock();
        if shared.state != RequestState::Scanning {
            tracing::debug!(
                state = ?shared.state,
                "Ignoring {} scan results, no scan requested",
                observations.len()
            );
            return;
        }

        tracing::debug!(
            observed = observations.len(),
            usable = fingerprint.len(),
            "Scan completed: {} of {} networks usable",
            fingerprint.len(),
            observations.len()
        );

        shared.info = LocationInfo {
            method: LocationMethod::None,
            fingerprint: Some(fingerprint.clone()),
            last_speed: None,
        };
        let flags = shared.flags;

        if inner.gps_wanted(flags) {
            let window = inner.config.request_freshness;
            if let Some(fix) = shared.gps.fresh_fix(now, window) {
                shared.state = RequestState::Idle;
                shared.info.method = LocationMethod::Gps;
                shared.info.last_speed = fix.speed;
                drop(shared);
                tracing::debug!("Fresh GPS fix available, skipping geolocation request");
                inner.dispatch.position(ResolvedPosition::from_gps(&fix));
                return;
            }
        }

        if fingerprint.is_empty() {
            shared.state = RequestState::Idle;
            drop(shared);
            inner.dispatch.error(LocateError::NoWifiSignal);
            return;
        }

        if flags.contains(RequestFlags::NO_NET_ACCESS) {
            shared.state = RequestState::Idle;
            drop(shared);
            inner.dispatch.error(LocateError::NetworkAccessDisabled);
            return;
        }

        shared.state = RequestState::AwaitingNetworkResponse;
        drop(shared);
        self.spawn_request(fingerprint);
    }

    pub fn on_gps_fix(&self, fix: GpsFix) {
        self.inner.lock().gps.record_fix(fix);
    }

    pub fn on_gps_availability_changed(&self, available: bool) {
        tracing::debug!(available, "GPS availability changed");
        self.inner.lock().gps.set_available(available);
    }

    pub fn on_gps_status(&self, event: GpsStatusEvent) {
        let window = self.inner.config.status_freshness;
        self.inner
            .lock()
            .gps
            .apply_status(event, Instant::now(), window);
    }

    /// Single entry point for platform layers that forward typed events.
    pub fn handle_event(&self, event: PlatformEvent) {
        match event {
            PlatformEvent::ScanResults(observations) => self.on_wifi_scan_results(observations),
            PlatformEvent::GpsFix(fix) => self.on_gps_fix(fix),
            PlatformEvent::GpsAvailability(available) => {
                self.on_gps_availability_changed(available)
            }
            PlatformEvent::GpsStatus(event) => self.on_gps_status(event),
        }
    }

    pub fn state(&self) -> RequestState {
        self.inner.lock().state
    }

    pub fn last_location_info(&self) -> LocationInfo {
        self.inner.lock().info.clone()
    }

    pub fn is_gps_available(&self) -> bool {
        self.inner.lock().gps.is_available()
    }

    fn spawn_request(&self, fingerprint: Fingerprint) {
        let client = Arc::clone(&self.inner.client);
        let resolver: Weak<Inner> = Arc::downgrade(&self.inner);
        let runtime = &self.inner.runtime;

        let request = runtime.spawn(async move { client.request_position(&fingerprint).await });

        runtime.spawn(async move {
            let result = match request.await {
                Ok(result) => result,
                Err(e) => Err(LocateError::Internal(format!(
                    "Geolocation worker failed: {}",
                    e
                ))),
            };

            match resolver.upgrade() {
                Some(inner) => inner.complete(result),
                None => tracing::debug!("Resolver dropped before the response arrived, discarding"),
            }
        });
    }
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn gps_wanted(&self, flags: RequestFlags) -> bool {
        self.config.gps_wanted && !flags.contains(RequestFlags::NO_GPS_ACCESS)
    }

    fn reject(&self, error: LocateError) -> Result<()> {
        self.dispatch.error(error.clone());
        Err(error)
    }

    fn complete(&self, result: Result<ServerPosition>) {
        let mut shared = self.lock();
        shared.state = RequestState::Idle;

        match result {
            Ok(position) => {
                shared.info.method = LocationMethod::Wifi;
                drop(shared);
                self.dispatch.position(ResolvedPosition::from_server(&position));
            }
            Err(e) => {
                drop(shared);
                self.dispatch.error(e);
            }
        }
    }
}
