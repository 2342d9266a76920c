//! Observable session state
//!
//! This module provides:
//! - The single source of truth for the current token set
//! - Change notification for consumers via a broadcast channel
//! - A token status read-model for UI display

mod events;
mod state;

pub use events::SessionEvent;
pub use state::{SessionState, TokenStatus};
