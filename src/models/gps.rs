use std::time::{Duration, Instant};

/// A position report from the satellite receiver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpsFix {
    pub latitude: f64,
    pub longitude: f64,
    /// Course over ground in degrees, 0.0..360.0
    pub bearing: Option<f32>,
    /// Meters per second
    pub speed: Option<f32>,
    /// Accuracy radius in meters
    pub accuracy: Option<f32>,
    /// Monotonic time the fix was received
    pub timestamp: Instant,
}

impl GpsFix {
    pub fn new(latitude: f64, longitude: f64, timestamp: Instant) -> Self {
        GpsFix {
            latitude,
            longitude,
            bearing: None,
            speed: None,
            accuracy: None,
            timestamp,
        }
    }

    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.timestamp)
    }
}

/// Receiver status transitions pushed by the platform layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpsStatusEvent {
    FirstFix,
    SatelliteStatus,
    Stopped,
}

#[derive(Debug, Clone, Default)]
pub struct GpsState {
    last_fix: Option<GpsFix>,
    available: bool,
}

impl GpsState {
    pub fn record_fix(&mut self, fix: GpsFix) {
        self.last_fix = Some(fix);
        self.available = true;
    }

    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    pub fn apply_status(&mut self, event: GpsStatusEvent, now: Instant, window: Duration) {
        match event {
            GpsStatusEvent::FirstFix => self.available = true,
            GpsStatusEvent::Stopped => self.available = false,
            GpsStatusEvent::SatelliteStatus => {
                if let Some(fix) = &self.last_fix {
                    self.available = fix.age(now) < window;
                }
            }
        }
    }

    /// Re-evaluate availability against `window` and return the fix if it
    /// is still usable. A stale fix clears availability until the next one.
    pub fn fresh_fix(&mut self, now: Instant, window: Duration) -> Option<GpsFix> {
        if !self.available {
            return None;
        }
        let fix = self.last_fix?;
        self.available = fix.age(now) < window;
        self.available.then_some(fix)
    }

    pub fn last_fix(&self) -> Option<&GpsFix> {
        self.last_fix.as_ref()
    }

    pub fn is_available(&self) -> bool {
        self.available
    }
}
