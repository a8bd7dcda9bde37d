//! Package registry subsystem.
//!
//! # Data Flow
//! ```text
//! package name
//!     → client.rs (GET {registry}/{package})
//!     → manifest.rs (typed dist-tags + versions)
//!     → pick version (pinned or dist-tags.latest), must exist in `versions`
//!     → entry.rs (jsdelivr > exports["."] > main)
//!     → relative entry path, handed to the CDN fetcher
//! ```
//!
//! # Design Decisions
//! - `versions` is the only source of truth for "version exists"
//! - Entry resolution is pure; it never fetches
//! - Nothing is cached between requests

pub mod client;
pub mod entry;
pub mod manifest;

pub use client::{RegistryClient, RegistryError};
pub use entry::resolve_entry;
pub use manifest::{ExportTarget, Exports, Manifest, VersionManifest};
