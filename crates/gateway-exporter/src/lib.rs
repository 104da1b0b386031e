//! Prometheus exporter for the T-Mobile/Nokia 5G gateway.
//!
//! A background task polls the gateway's status API, translates the document
//! into gauges and writes them into a registry that the HTTP server renders
//! on `/metrics`.

pub mod api;
pub mod app;
pub mod clock;
pub mod config;
pub mod error;
pub mod gateway;
pub mod metrics;
pub mod scheduler;
