//! Portico Domain - Core protocol types
//!
//! This crate defines the OIDC protocol model for the Portico session
//! manager. All types here are pure Rust with no I/O dependencies:
//! expiry checks take the current time as a parameter so callers can
//! supply a clock.

pub mod config;
pub mod discovery;
pub mod error;
pub mod session;
pub mod token;

pub use config::{ClientConfig, Prompt, RevocationPolicy};
pub use discovery::{DiscoveryDocument, well_known_url};
pub use error::{DiscoveryError, RevocationError, TokenError};
pub use session::Session;
pub use token::{TokenGrant, TokenSet};
