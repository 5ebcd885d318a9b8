use crate::error::{ErrorCode, LocateError};
use crate::models::ResolvedPosition;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Outcome of one resolution cycle.
#[derive(Debug, Clone)]
pub enum LocationEvent {
    Received(ResolvedPosition),
    Error(LocateError),
}

/// Caller-side callbacks. Invoked only from the task that drives
/// [`LocationEvents`], never from the network worker.
pub trait LocationListener {
    fn on_location_received(&self, position: &ResolvedPosition);

    fn on_location_error(&self, code: ErrorCode);
}

impl<L: LocationListener + ?Sized> LocationListener for Arc<L> {
    fn on_location_received(&self, position: &ResolvedPosition) {
        (**self).on_location_received(position)
    }

    fn on_location_error(&self, code: ErrorCode) {
        (**self).on_location_error(code)
    }
}

/// Sending half, owned by the resolver.
#[derive(Debug, Clone)]
pub struct ListenerDispatch {
    tx: mpsc::UnboundedSender<LocationEvent>,
}

/// Receiving half, owned by the caller. Ends once the resolver is dropped.
#[derive(Debug)]
pub struct LocationEvents {
    rx: mpsc::UnboundedReceiver<LocationEvent>,
}

pub fn channel() -> (ListenerDispatch, LocationEvents) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ListenerDispatch { tx }, LocationEvents { rx })
}

impl ListenerDispatch {
    pub fn position(&self, position: ResolvedPosition) {
        tracing::info!(
            lat = position.latitude,
            lon = position.longitude,
            radius = position.radius,
            method = ?position.method,
            "Position resolved"
        );
        self.send(LocationEvent::Received(position));
    }

    pub fn error(&self, error: LocateError) {
        tracing::warn!(code = %error.code(), "Position request failed: {}", error);
        self.send(LocationEvent::Error(error));
    }

    fn send(&self, event: LocationEvent) {
        // The caller may have dropped its receiver; nobody is listening then.
        if self.tx.send(event).is_err() {
            tracing::debug!("Location event dropped, receiver closed");
        }
    }
}

impl LocationEvents {
    pub async fn next(&mut self) -> Option<LocationEvent> {
        self.rx.recv().await
    }

    /// Non-blocking poll for callers that run their own loop.
    pub fn try_next(&mut self) -> Option<LocationEvent> {
        self.rx.try_recv().ok()
    }

    /// Deliver every event to `listener` until the resolver goes away.
    pub async fn run<L: LocationListener>(mut self, listener: L) {
        while let Some(event) = self.next().await {
            deliver(&listener, &event);
        }
    }
}

pub fn deliver<L: LocationListener + ?Sized>(listener: &L, event: &LocationEvent) {
    match event {
        LocationEvent::Received(position) => listener.on_location_received(position),
        LocationEvent::Error(error) => listener.on_location_error(error.code()),
    }
}
