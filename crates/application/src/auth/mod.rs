//! Authorization flow building blocks
//!
//! This module provides:
//! - PKCE verifier/challenge generation
//! - Authorization request construction and URL building
//! - The flow state machine with its reentrancy guard

mod flow;
mod pkce;
mod request;

pub use flow::{FlowState, FlowTracker};
pub use pkce::{PkceChallenge, generate_state};
pub use request::{AuthorizationRequest, end_session_url};
