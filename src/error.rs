//! Gateway error types.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

use crate::cdn::CdnError;
use crate::registry::RegistryError;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Package {0} not found")]
    PackageNotFound(String),

    #[error("Version {version} of {package} not found")]
    VersionNotFound { package: String, version: String },

    #[error("No entry file declared by {package}@{version}")]
    EntryNotFound { package: String, version: String },

    #[error("{0}")]
    FileNotFound(#[from] CdnError),

    #[error("No route for path")]
    RouteNotFound,

    #[error("Cannot find latest version of {0}")]
    MissingLatest(String),

    #[error("{0}")]
    Upstream(RegistryError),
}

impl From<RegistryError> for GatewayError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound(package) => GatewayError::PackageNotFound(package),
            other => GatewayError::Upstream(other),
        }
    }
}

impl GatewayError {
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::PackageNotFound(_) => "package_not_found",
            Self::VersionNotFound { .. } => "version_not_found",
            Self::EntryNotFound { .. } => "entry_not_found",
            Self::FileNotFound(_) => "file_not_found",
            Self::RouteNotFound => "route_not_found",
            Self::MissingLatest(_) => "missing_latest",
            Self::Upstream(_) => "upstream_error",
        }
    }

    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::PackageNotFound(_)
            | Self::VersionNotFound { .. }
            | Self::EntryNotFound { .. }
            | Self::FileNotFound(_)
            | Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::MissingLatest(_) | Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Plain-text body. Upstream causes are surfaced as-is for diagnosis.
    pub fn message(&self) -> String {
        match self {
            Self::PackageNotFound(_) => "404 Package Not Found".to_owned(),
            Self::VersionNotFound { version, .. } => format!("404 Version {version} Not Found"),
            Self::EntryNotFound { package, version } => {
                format!("404 Entry File Not Found for {package}@{version}")
            }
            Self::FileNotFound(_) => "404 File Not Found".to_owned(),
            Self::RouteNotFound => "404 Not Found".to_owned(),
            Self::MissingLatest(_) => "Error: Cannot find latest version".to_owned(),
            Self::Upstream(err) => format!("Error: {err}"),
        }
    }

    /// Minimal HTML rendering used by the directory views.
    pub fn into_html_response(self) -> Response {
        let body = format!("<h1>{}</h1>", crate::http::pages::escape(&self.message()));
        (self.status_code(), Html(body)).into_response()
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        (self.status_code(), self.message()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_status_codes() {
        assert_eq!(
            GatewayError::PackageNotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(GatewayError::RouteNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            GatewayError::MissingLatest("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn registry_not_found_maps_to_package_not_found() {
        let err: GatewayError = RegistryError::NotFound("left-pad".into()).into();
        assert_eq!(err.error_type(), "package_not_found");
        assert_eq!(err.message(), "404 Package Not Found");
    }

    #[test]
    fn registry_failures_surface_their_cause() {
        let decode = serde_json::from_str::<crate::registry::Manifest>("not json").unwrap_err();
        let err: GatewayError = RegistryError::Decode { package: "vue".into(), source: decode }.into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.message().starts_with("Error: malformed manifest for vue"));
    }

    #[test]
    fn version_message_names_the_version() {
        let err = GatewayError::VersionNotFound {
            package: "vue".into(),
            version: "9.9.9".into(),
        };
        assert_eq!(err.message(), "404 Version 9.9.9 Not Found");
    }

    #[test]
    fn html_rendering_escapes() {
        let err = GatewayError::VersionNotFound {
            package: "x".into(),
            version: "<script>".into(),
        };
        let response = err.into_html_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers()["content-type"],
            "text/html; charset=utf-8"
        );
    }
}
