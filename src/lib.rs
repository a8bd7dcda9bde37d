//! npm CDN gateway library.
//!
//! Resolves npm package paths (`/vue`, `/vue@3.3.4`, `/vue@3.3.4/dist/x.js`,
//! ...) into file content served from an ordered list of CDN origins, using
//! registry manifests to pick versions and entry files.

pub mod cdn;
pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod registry;
pub mod resilience;
pub mod routing;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
