//! Entry file resolution.
//!
//! Picks the file a package wants consumers to load by default:
//!
//! 1. `jsdelivr`
//! 2. `exports["."]`: its `default` condition, or the string itself.
//!    A conditions object without `default` falls through to `main`.
//! 3. `main`
//!
//! The chosen path is returned relative to the package root. A path that
//! climbs out of the root with `..` resolves to nothing.

use crate::net::climbs_out;
use crate::registry::manifest::{ExportTarget, VersionManifest};

/// Resolve the entry file of one published version, or `None` when the
/// manifest declares none.
pub fn resolve_entry(manifest: &VersionManifest) -> Option<String> {
    if let Some(jsdelivr) = &manifest.jsdelivr {
        return relative_path(jsdelivr).map(str::to_string);
    }

    if let Some(root) = manifest.exports.as_ref().and_then(|e| e.root()) {
        let target = match root {
            ExportTarget::Path(path) => Some(path.as_str()),
            ExportTarget::Conditions(_) => root.default_condition(),
            ExportTarget::Other(_) => None,
        };
        if let Some(path) = target {
            return relative_path(path).map(str::to_string);
        }
    }

    manifest
        .main
        .as_deref()
        .and_then(relative_path)
        .map(str::to_string)
}

/// Strip a leading `./` or `/` so the path can be appended to
/// `{package}@{version}/`. `None` if the result leaves the package root.
pub fn relative_path(path: &str) -> Option<&str> {
    let path = path.strip_prefix("./").unwrap_or(path);
    let path = path.trim_start_matches('/');
    (!climbs_out(path)).then_some(path)
}
