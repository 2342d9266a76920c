//! Provider transport adapters

mod provider_client;

pub use provider_client::ReqwestProviderClient;
