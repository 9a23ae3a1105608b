//! Settlement of waiting commands.
//!
//! Every command that waits moves through the same phases:
//!
//! ```text
//! Idle --(mutating request issued)--> Requested --(first terminal signal)--> Settled
//! ```
//!
//! [`NavigationWait`] applies this to the two navigation signals: it
//! subscribes before the goal is set, accepts the first goal-reached or
//! path-timeout that arrives while Requested, and detaches from the signal
//! source the moment it settles. Signals offered after settlement are
//! ignored.

use blockbridge_types::NavigationSignal;
use blockbridge_world::WorldSession;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use crate::error::ActionError;

/// Lifecycle phase of one command request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionPhase {
    /// Nothing has been asked of the world yet.
    #[default]
    Idle,
    /// The mutating request is out; waiting for its terminal signal.
    Requested,
    /// A terminal signal has settled the command.
    Settled,
}

impl ActionPhase {
    /// Move to `next` if that is the legal successor of the current phase.
    ///
    /// Returns `false` (and stays put) for any other transition; in
    /// particular a settled command never re-enters Requested.
    pub fn advance(&mut self, next: Self) -> bool {
        let legal = matches!(
            (*self, next),
            (Self::Idle, Self::Requested) | (Self::Requested, Self::Settled)
        );
        if legal {
            *self = next;
        }
        legal
    }
}

/// Single-fire wait on the navigation signals of one goal.
#[derive(Debug)]
pub struct NavigationWait {
    phase: ActionPhase,
    signals: Option<broadcast::Receiver<NavigationSignal>>,
    settled_with: Option<NavigationSignal>,
}

impl NavigationWait {
    /// Subscribe to the session's navigation signals.
    ///
    /// Call this before setting the goal so a signal emitted during
    /// `set_goal` is not missed.
    pub fn subscribe<S: WorldSession>(session: &S) -> Self {
        Self {
            phase: ActionPhase::Idle,
            signals: Some(session.navigation_signals()),
            settled_with: None,
        }
    }

    /// Record that the goal has been (or is about to be) issued.
    pub fn mark_requested(&mut self) {
        self.phase.advance(ActionPhase::Requested);
    }

    /// Current phase.
    pub const fn phase(&self) -> ActionPhase {
        self.phase
    }

    /// Whether the wait still holds a subscription.
    pub const fn is_attached(&self) -> bool {
        self.signals.is_some()
    }

    /// Offer a signal. Returns it if it settles the wait, `None` if it is
    /// ignored (not yet requested, or already settled).
    pub fn offer(&mut self, signal: NavigationSignal) -> Option<NavigationSignal> {
        if !self.phase.advance(ActionPhase::Settled) {
            debug!(?signal, phase = ?self.phase, "navigation signal ignored");
            return None;
        }
        self.settled_with = Some(signal);
        self.detach();
        Some(signal)
    }

    /// Drop the subscription. Further signals never reach this wait.
    pub fn detach(&mut self) {
        self.signals = None;
    }

    /// Settle without a signal (the caller's deadline passed) and detach.
    ///
    /// Returns `false` if the wait had already settled.
    pub fn expire(&mut self) -> bool {
        let settled = self.phase.advance(ActionPhase::Settled);
        self.detach();
        settled
    }

    /// Wait for the first terminal signal.
    ///
    /// Once settled, later calls return the same signal without waiting.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::SessionClosed`] if the signal source closes
    /// (or the wait was detached) before any signal settles it, and
    /// [`ActionError::SignalsLost`] if the receiver lagged: the oldest
    /// signals were overwritten, so the first one can no longer be known.
    pub async fn wait(&mut self) -> Result<NavigationSignal, ActionError> {
        if let Some(signal) = self.settled_with {
            return Ok(signal);
        }
        let Some(mut signals) = self.signals.take() else {
            return Err(ActionError::SessionClosed);
        };
        loop {
            match signals.recv().await {
                Ok(signal) => {
                    if let Some(settled) = self.offer(signal) {
                        return Ok(settled);
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    self.phase.advance(ActionPhase::Settled);
                    warn!(skipped, "navigation receiver lagged, first signal lost");
                    return Err(ActionError::SignalsLost { skipped });
                }
                Err(RecvError::Closed) => {
                    self.phase.advance(ActionPhase::Settled);
                    return Err(ActionError::SessionClosed);
                }
            }
        }
    }
}
