//! HTTP server for the design vocabulary site.
//!
//! Serves the search aggregation endpoint consumed by the client-side
//! search engine, JSON content endpoints per kind, and the built static
//! site as a fallback.

pub mod routes;
pub mod server;

pub use server::{ServerConfig, ServerError, SiteServer};
