//! Request path classification.
//!
//! # Shapes
//! ```text
//! lodash                        → PackageEntry
//! lodash/                       → PackageDirLatest
//! lodash@4.17.21                → PackageEntryVersioned
//! lodash@4.17.21/               → PackageDirVersioned
//! lodash@4.17.21/dist/lodash.js → PackageFileVersioned
//! @vue/shared@3.3.4/dist/x.js   → PackageFileVersioned (package "@vue/shared")
//! ```
//!
//! # Design Decisions
//! - Pure function of the decoded path (no leading slash); no I/O
//! - The version separator is the first `@` that is not a leading scope marker
//! - Trailing slash is decided before the version/sub-path split: a versioned
//!   path ending in `/` is a directory view, and everything after the `@`
//!   (minus trailing slashes) is its version, so `lodash@4.17.21/fp/` asks
//!   for version `4.17.21/fp`

use std::fmt;

/// What an inbound path asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestShape {
    /// Entry file of the latest version.
    PackageEntry { package: String },
    /// Directory view of the latest version (redirects to the pinned form).
    PackageDirLatest { package: String },
    /// Entry file of a pinned version.
    PackageEntryVersioned { package: String, version: String },
    /// Directory view of a pinned version.
    PackageDirVersioned { package: String, version: String },
    /// A specific file of a pinned version.
    PackageFileVersioned {
        package: String,
        version: String,
        path: String,
    },
    Unmatched,
}

impl RequestShape {
    /// Stable name for logs and metric labels.
    pub fn name(&self) -> &'static str {
        match self {
            RequestShape::PackageEntry { .. } => "package_entry",
            RequestShape::PackageDirLatest { .. } => "package_dir_latest",
            RequestShape::PackageEntryVersioned { .. } => "package_entry_versioned",
            RequestShape::PackageDirVersioned { .. } => "package_dir_versioned",
            RequestShape::PackageFileVersioned { .. } => "package_file_versioned",
            RequestShape::Unmatched => "unmatched",
        }
    }
}

impl fmt::Display for RequestShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestShape::PackageEntry { package } => write!(f, "entry of {}@latest", package),
            RequestShape::PackageDirLatest { package } => write!(f, "directory of {}@latest", package),
            RequestShape::PackageEntryVersioned { package, version } => {
                write!(f, "entry of {}@{}", package, version)
            }
            RequestShape::PackageDirVersioned { package, version } => {
                write!(f, "directory of {}@{}", package, version)
            }
            RequestShape::PackageFileVersioned { package, version, path } => {
                write!(f, "file {} of {}@{}", path, package, version)
            }
            RequestShape::Unmatched => write!(f, "unmatched"),
        }
    }
}

/// Classify a decoded request path with its leading slash removed.
pub fn classify(path: &str) -> RequestShape {
    if path.is_empty() {
        return RequestShape::Unmatched;
    }
    let directory = path.ends_with('/');

    let Some((package, rest)) = split_version(path) else {
        let package = path.trim_end_matches('/');
        if package.is_empty() {
            return RequestShape::Unmatched;
        }
        let package = package.to_string();
        return if directory {
            RequestShape::PackageDirLatest { package }
        } else {
            RequestShape::PackageEntry { package }
        };
    };

    if package.is_empty() {
        return RequestShape::Unmatched;
    }
    let package = package.to_string();

    if directory {
        return RequestShape::PackageDirVersioned {
            package,
            version: rest.trim_end_matches('/').to_string(),
        };
    }

    match rest.split_once('/') {
        // `name@` carries no version; serve the latest entry.
        None if rest.is_empty() => RequestShape::PackageEntry { package },
        None => RequestShape::PackageEntryVersioned {
            package,
            version: rest.to_string(),
        },
        Some(("", _)) => RequestShape::Unmatched,
        Some((version, sub)) => RequestShape::PackageFileVersioned {
            package,
            version: version.to_string(),
            path: sub.to_string(),
        },
    }
}

/// Split `package@rest` on the first `@` past a leading scope marker.
fn split_version(path: &str) -> Option<(&str, &str)> {
    let search_from = usize::from(path.starts_with('@'));
    let at = path[search_from..].find('@')? + search_from;
    Some((&path[..at], &path[at + 1..]))
}
