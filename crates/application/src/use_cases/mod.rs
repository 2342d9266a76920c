//! Use case orchestration
//!
//! One struct per session operation, each generic over the ports it
//! drives. The embedding application constructs them once and calls
//! `execute` on user action.

mod logout;
mod refresh_session;
mod resolve_discovery;
mod start_login;

pub use logout::{Logout, LogoutOutcome};
pub use refresh_session::RefreshSession;
pub use resolve_discovery::ResolveDiscovery;
pub use start_login::{LoginOutcome, StartLogin};
