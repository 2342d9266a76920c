//! Login flow state machine and reentrancy guard
//!
//! The flow progresses `Idle → Requested → {Authorized | Cancelled |
//! Rejected}`. Only one flow may be outstanding at a time: the tracker
//! rejects a second begin while the first is still awaiting the
//! interactive user-agent, without affecting the outstanding attempt.

use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::atomic::{AtomicBool, Ordering};

/// Observable state of the login flow, for the embedding UI.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FlowState {
    /// No login attempt outstanding.
    #[default]
    Idle,
    /// Awaiting the interactive user-agent.
    Requested,
    /// Authorization code received; exchanging it for tokens.
    Authorized,
    /// The user dismissed the user-agent; no side effects occurred.
    Cancelled,
    /// The attempt failed.
    Rejected {
        /// Description of what went wrong.
        error: String,
    },
}

impl FlowState {
    /// Returns true while an attempt is between begin and its terminal
    /// outcome.
    #[must_use]
    pub const fn is_in_progress(&self) -> bool {
        matches!(self, Self::Requested | Self::Authorized)
    }

    /// A short status message for display.
    #[must_use]
    pub const fn message(&self) -> &str {
        match self {
            Self::Idle => "Ready to sign in",
            Self::Requested => "Waiting for authorization...",
            Self::Authorized => "Exchanging authorization code...",
            Self::Cancelled => "Sign-in cancelled",
            Self::Rejected { .. } => "Sign-in failed",
        }
    }
}

/// Tracks the current [`FlowState`] and enforces non-reentrancy.
#[derive(Debug, Default)]
pub struct FlowTracker {
    active: AtomicBool,
    state: Mutex<FlowState>,
}

impl FlowTracker {
    /// Creates an idle tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot of the current flow state.
    #[must_use]
    pub fn current(&self) -> FlowState {
        self.lock().clone()
    }

    /// Claims the flow for one attempt.
    ///
    /// Returns `None` if another attempt is already active. The returned
    /// guard releases the claim when dropped, returning a still-in-progress
    /// state to idle.
    pub(crate) fn try_begin(&self) -> Option<FlowGuard<'_>> {
        if self.active.swap(true, Ordering::AcqRel) {
            return None;
        }
        *self.lock() = FlowState::Requested;
        Some(FlowGuard { tracker: self })
    }

    fn set(&self, state: FlowState) {
        *self.lock() = state;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FlowState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Exclusive claim on the flow for the duration of one attempt.
pub(crate) struct FlowGuard<'a> {
    tracker: &'a FlowTracker,
}

impl FlowGuard<'_> {
    /// Records a state transition for observers.
    pub(crate) fn transition(&self, state: FlowState) {
        self.tracker.set(state);
    }
}

impl Drop for FlowGuard<'_> {
    fn drop(&mut self) {
        // An attempt abandoned mid-flight must not leave the tracker stuck
        // in an in-progress state.
        {
            let mut state = self.tracker.lock();
            if state.is_in_progress() {
                *state = FlowState::Idle;
            }
        }
        self.tracker.active.store(false, Ordering::Release);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn begin_moves_idle_to_requested() {
        let tracker = FlowTracker::new();
        assert_eq!(tracker.current(), FlowState::Idle);

        let guard = tracker.try_begin().unwrap();
        assert_eq!(tracker.current(), FlowState::Requested);
        assert!(tracker.current().is_in_progress());

        drop(guard);
        assert_eq!(tracker.current(), FlowState::Idle);
    }

    #[test]
    fn second_begin_is_rejected_while_active() {
        let tracker = FlowTracker::new();
        let _guard = tracker.try_begin().unwrap();
        assert!(tracker.try_begin().is_none());
    }

    #[test]
    fn flow_can_begin_again_after_release() {
        let tracker = FlowTracker::new();
        drop(tracker.try_begin().unwrap());
        assert!(tracker.try_begin().is_some());
    }

    #[test]
    fn terminal_states_survive_guard_drop() {
        let tracker = FlowTracker::new();
        let guard = tracker.try_begin().unwrap();
        guard.transition(FlowState::Cancelled);
        drop(guard);

        assert_eq!(tracker.current(), FlowState::Cancelled);
        assert!(!tracker.current().is_in_progress());
    }

    #[test]
    fn state_messages() {
        assert_eq!(FlowState::Idle.message(), "Ready to sign in");
        assert_eq!(
            FlowState::Rejected {
                error: "access_denied".to_string()
            }
            .message(),
            "Sign-in failed"
        );
    }
}
