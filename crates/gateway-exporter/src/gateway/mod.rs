//! Gateway status API: wire types and the fetching client

pub mod client;
pub mod types;

pub use client::GatewayClient;
pub use client::StatusSource;
pub use client::STATUS_PATH;
pub use types::StatusDocument;
