//! Authenticated session provider with login/logout notifications.
//!
//! Subscribers receive a copy of every event published after they subscribed
//! (broadcast semantics). Dead subscribers are dropped on the next publish.
//!
//! This is the client-side collaborator for front-ends that hold one logged-in
//! staff member. The HTTP server is stateless and builds its viewer from the
//! bearer token on each request instead.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::sync::{Mutex, RwLock};
use std::time::Duration;

use staffhub_core::StaffId;

use crate::Viewer;

/// Session change notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    LoggedIn(Viewer),
    LoggedOut(StaffId),
}

/// A subscription to session changes.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a message.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}

/// Source of the current user identity.
pub trait SessionProvider: Send + Sync {
    /// The signed-in viewer, if any.
    fn current(&self) -> Option<Viewer>;

    fn subscribe(&self) -> Subscription<SessionEvent>;
}

/// In-process session provider for tests/dev and single-user clients.
#[derive(Debug, Default)]
pub struct InMemorySessionProvider {
    current: RwLock<Option<Viewer>>,
    subscribers: Mutex<Vec<mpsc::Sender<SessionEvent>>>,
}

impl InMemorySessionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current session and notify subscribers.
    pub fn login(&self, viewer: Viewer) {
        if let Ok(mut current) = self.current.write() {
            *current = Some(viewer.clone());
        }
        tracing::info!(staff_id = %viewer.staff_id, "session started");
        self.publish(SessionEvent::LoggedIn(viewer));
    }

    /// End the current session. No-op (and no event) when nobody is signed in.
    pub fn logout(&self) {
        let previous = match self.current.write() {
            Ok(mut current) => current.take(),
            Err(_) => None,
        };

        if let Some(viewer) = previous {
            tracing::info!(staff_id = %viewer.staff_id, "session ended");
            self.publish(SessionEvent::LoggedOut(viewer.staff_id));
        }
    }

    fn publish(&self, event: SessionEvent) {
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.retain(|tx| tx.send(event.clone()).is_ok());
        }
    }
}

impl SessionProvider for InMemorySessionProvider {
    fn current(&self) -> Option<Viewer> {
        self.current.read().ok().and_then(|c| c.clone())
    }

    fn subscribe(&self) -> Subscription<SessionEvent> {
        let (tx, rx) = mpsc::channel();
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(tx);
        }
        Subscription::new(rx)
    }
}
