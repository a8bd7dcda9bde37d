//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming path (decoded, leading slash stripped)
//!     → classifier.rs (pure parse into a RequestShape)
//!     → http/handlers.rs (one handler per shape)
//! ```
//!
//! # Design Decisions
//! - Deterministic: same input always yields the same shape
//! - Exhaustive: every path maps to exactly one shape, `Unmatched` included

pub mod classifier;

pub use classifier::{classify, RequestShape};
