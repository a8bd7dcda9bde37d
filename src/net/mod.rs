//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound:  listener.rs (bind) → axum::serve (http/server.rs)
//! Outbound: client.rs (reqwest client with timeouts + redirects)
//!           → resilience (connect retries) → registry / CDN origins
//! Paths:    path.rs (percent-encoding, `..` rejection)
//! ```

pub mod client;
pub mod listener;
pub mod path;

pub use client::build_client;
pub use path::{climbs_out, encode_path};
