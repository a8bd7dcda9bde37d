//! CDN content subsystem.
//!
//! # Data Flow
//! ```text
//! (package, version, path)
//!     → origin.rs (one candidate URL per configured origin)
//!     → fetcher.rs (walk candidates in order, first 200 wins)
//!     → CdnFile { body, content_type } or CdnError::NotFound
//! ```
//!
//! # Design Decisions
//! - Origin order is priority order; no parallel fan-out
//! - No origin health is remembered between requests
//! - Used identically for entry files and explicitly requested files

pub mod fetcher;
pub mod origin;

pub use fetcher::{CdnError, CdnFetcher, CdnFile, FailureReason, OriginFailure, DEFAULT_CONTENT_TYPE};
pub use origin::CdnOrigin;
