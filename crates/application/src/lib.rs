//! Portico Application - Flow orchestration and ports
//!
//! This crate defines the session manager's application layer:
//! - Port traits for the external collaborators (provider HTTP transport,
//!   interactive user-agent, clock)
//! - PKCE generation and authorization request construction
//! - The login flow state machine with its reentrancy guard
//! - The observable session state
//! - Use cases: discovery resolution, login, refresh, logout

pub mod auth;
pub mod error;
pub mod ports;
pub mod session;
pub mod use_cases;

pub use auth::{AuthorizationRequest, FlowState, FlowTracker, PkceChallenge};
pub use error::{LoginError, LogoutError, RefreshError};
pub use ports::{AuthorizeOutcome, Clock, EndSessionOutcome, ProviderClient, UserAgent};
pub use session::{SessionEvent, SessionState, TokenStatus};
pub use use_cases::{
    LoginOutcome, Logout, LogoutOutcome, RefreshSession, ResolveDiscovery, StartLogin,
};
