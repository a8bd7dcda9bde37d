//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! GET to registry or CDN origin:
//!     → retries.rs (connect failure? sleep and re-send, bounded count)
//!     → backoff.rs (exponential delay + jitter)
//!     → response or final transport error handed back to the caller
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every outbound call has a deadline
//! - Retries only on connection failures, never on HTTP statuses

pub mod backoff;
pub mod retries;

pub use retries::{get_with_retries, RetryPolicy};
