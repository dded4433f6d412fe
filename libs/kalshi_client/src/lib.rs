//! Kalshi API client library.
//!
//! Read-only access to the public market listing of the Kalshi trade API.

pub mod rest;

pub use rest::KalshiRestClient;
