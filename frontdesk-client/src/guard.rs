//! Per-form request tokens
//!
//! Every triggering action asks its form's [`RequestGuard`] for a ticket
//! before touching the network. The guard holds at most one request in flight:
//!
//! - an identical trigger (same criteria key) while one is in flight, or
//!   within the debounce window after it succeeded, is dropped;
//! - a trigger with different criteria supersedes the in-flight request,
//!   whose future is cancelled and whose result is never applied.

use crate::ClientResult;
use parking_lot::Mutex;
use std::collections::hash_map::DefaultHasher;
use std::future::Future;
use std::hash::{Hash, Hasher};
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Hash of the criteria that produced a request
pub fn criteria_key<T: Hash + ?Sized>(criteria: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    criteria.hash(&mut hasher);
    hasher.finish()
}

/// What happened to a guarded request
#[derive(Debug)]
pub enum Dispatch<T> {
    /// The request ran to completion and its token is still current
    Completed(T),
    /// Identical request already in flight or just completed; nothing was sent
    Dropped,
    /// A newer request replaced this one; its result was discarded
    Superseded,
}

impl<T> Dispatch<T> {
    pub fn completed(self) -> Option<T> {
        match self {
            Dispatch::Completed(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Dispatch::Completed(_))
    }

    pub fn is_dropped(&self) -> bool {
        matches!(self, Dispatch::Dropped)
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, Dispatch::Superseded)
    }
}

/// Token for one in-flight request
#[derive(Debug, Clone)]
pub struct RequestTicket {
    generation: u64,
    key: u64,
    token: CancellationToken,
}

impl RequestTicket {
    pub fn key(&self) -> u64 {
        self.key
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

#[derive(Debug)]
struct InFlight {
    generation: u64,
    key: u64,
    token: CancellationToken,
}

#[derive(Debug, Default)]
struct GuardState {
    generation: u64,
    in_flight: Option<InFlight>,
    last_success: Option<(u64, Instant)>,
}

/// In-flight guard for one form
#[derive(Debug)]
pub struct RequestGuard {
    name: &'static str,
    window: Duration,
    state: Mutex<GuardState>,
}

impl RequestGuard {
    pub fn new(name: &'static str, window: Duration) -> Self {
        Self {
            name,
            window,
            state: Mutex::new(GuardState::default()),
        }
    }

    /// Claim the form for a request with the given criteria key
    ///
    /// Returns `None` when the trigger must be dropped.
    pub fn try_begin(&self, key: u64) -> Option<RequestTicket> {
        let mut state = self.state.lock();

        if let Some(current) = &state.in_flight {
            if current.key == key {
                tracing::debug!(guard = self.name, "identical request in flight, dropped");
                return None;
            }
            tracing::debug!(guard = self.name, "superseding in-flight request");
            current.token.cancel();
        } else if state
            .last_success
            .is_some_and(|(last_key, at)| last_key == key && at.elapsed() < self.window)
        {
            tracing::debug!(guard = self.name, "repeat within debounce window, dropped");
            return None;
        }

        state.generation += 1;
        let ticket = RequestTicket {
            generation: state.generation,
            key,
            token: CancellationToken::new(),
        };
        state.in_flight = Some(InFlight {
            generation: ticket.generation,
            key,
            token: ticket.token.clone(),
        });
        Some(ticket)
    }

    /// Release the form; stale tickets leave the newer request untouched
    pub fn finish(&self, ticket: &RequestTicket, succeeded: bool) {
        let mut state = self.state.lock();
        let owns = state
            .in_flight
            .as_ref()
            .is_some_and(|f| f.generation == ticket.generation);
        if owns {
            state.in_flight = None;
            if succeeded {
                state.last_success = Some((ticket.key, Instant::now()));
            }
        }
    }

    /// Whether the ticket still belongs to the newest request
    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        let state = self.state.lock();
        !ticket.is_cancelled()
            && state
                .in_flight
                .as_ref()
                .is_some_and(|f| f.generation == ticket.generation)
    }

    /// Cancel whatever is in flight and forget the debounce history
    pub fn supersede(&self) {
        let mut state = self.state.lock();
        if let Some(current) = state.in_flight.take() {
            current.token.cancel();
        }
        state.last_success = None;
    }

    /// A request is in flight; the triggering control shows as disabled
    pub fn is_busy(&self) -> bool {
        self.state.lock().in_flight.is_some()
    }

    /// Run `request` under a fresh ticket
    ///
    /// The request future is dropped as soon as a newer request supersedes
    /// it, which aborts the underlying HTTP call.
    pub async fn dispatch<T, F>(&self, key: u64, request: F) -> Dispatch<ClientResult<T>>
    where
        F: Future<Output = ClientResult<T>>,
    {
        let Some(ticket) = self.try_begin(key) else {
            return Dispatch::Dropped;
        };

        let outcome = tokio::select! {
            biased;
            _ = ticket.token.cancelled() => None,
            result = request => Some(result),
        };

        match outcome {
            Some(result) if self.is_current(&ticket) => {
                self.finish(&ticket, result.is_ok());
                Dispatch::Completed(result)
            }
            _ => {
                tracing::debug!(guard = self.name, "stale response discarded");
                self.finish(&ticket, false);
                Dispatch::Superseded
            }
        }
    }
}

/// Await `future` but take at least `min` (loading indicators stay visible)
pub async fn with_min_duration<F: Future>(future: F, min: Duration) -> F::Output {
    if min.is_zero() {
        return future.await;
    }
    let (output, _) = tokio::join!(future, tokio::time::sleep(min));
    output
}
