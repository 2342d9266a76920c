//! Portico Infrastructure - Adapters
//!
//! This crate provides concrete implementations of the ports defined in
//! the application layer: the reqwest-backed provider transport and the
//! system clock. The interactive user-agent port is deliberately not
//! implemented here; it belongs to the embedding application.

pub mod clock;
pub mod oidc;

pub use clock::SystemClock;
pub use oidc::ReqwestProviderClient;
