//! Error types for the scrape pipeline.

use core::error::Error;

use derive_more::Display;
use error_stack::Report;

/// Result type for scrape operations.
pub type ScrapeResult<T> = Result<T, Report<ScrapeError>>;

/// Errors that can occur while fetching and decoding gateway status.
///
/// The scheduler treats every variant the same way, the variants exist so the
/// logged report tells an operator which step broke.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum ScrapeError {
    /// The HTTP client could not be constructed
    #[display("Failed to build HTTP client for gateway {target}")]
    ClientSetup { target: String },

    /// Connection refused, DNS failure, reset while reading the body, ...
    #[display("Transport error talking to gateway at {url}")]
    Transport { url: String },

    /// The gateway answered with a non-success status code
    #[display("Gateway at {url} returned non-success status code {status}")]
    Status { url: String, status: u16 },

    /// The body was not a status document
    #[display("Failed to decode gateway status from {url}")]
    Decode { url: String },
}

impl Error for ScrapeError {}
