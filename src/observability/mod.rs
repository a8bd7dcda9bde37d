//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers, registry client, CDN fetcher produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (fmt layer, filtered by RUST_LOG or config)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Request ID (x-request-id) is attached to every response and span
//! - Metrics are cheap and recorded unconditionally

pub mod logging;
pub mod metrics;
