//! Request handlers.
//!
//! Every path except `/` goes through [`dispatch`], which classifies it and
//! runs the matching pipeline:
//!
//! ```text
//! entry      : manifest → version → entry file → CDN
//! dir latest : manifest → latest → 307 to /{package}@{latest}/
//! dir pinned : manifest → version → stub listing
//! file       : CDN
//! ```

use axum::extract::{Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use std::time::Instant;

use crate::error::GatewayError;
use crate::http::pages;
use crate::http::response::file_response;
use crate::http::server::AppState;
use crate::net::encode_path;
use crate::observability::metrics;
use crate::registry::resolve_entry;
use crate::routing::{classify, RequestShape};

/// `GET /`
pub async fn landing() -> Html<&'static str> {
    Html(pages::LANDING_PAGE)
}

/// `GET /{*path}`
pub async fn dispatch(State(state): State<AppState>, Path(path): Path<String>) -> Response {
    let start = Instant::now();
    let shape = classify(&path);
    let shape_name = shape.name();
    let html_errors = matches!(
        shape,
        RequestShape::PackageDirLatest { .. } | RequestShape::PackageDirVersioned { .. }
    );

    tracing::debug!(shape = shape_name, path = %path, "Classified request");

    let result = match shape {
        RequestShape::PackageEntry { package } => serve_entry(&state, &package, None).await,
        RequestShape::PackageEntryVersioned { package, version } => {
            serve_entry(&state, &package, Some(&version)).await
        }
        RequestShape::PackageDirLatest { package } => redirect_to_latest(&state, &package).await,
        RequestShape::PackageDirVersioned { package, version } => {
            directory(&state, &package, &version).await
        }
        RequestShape::PackageFileVersioned { package, version, path } => {
            serve_file(&state, &package, &version, &path).await
        }
        RequestShape::Unmatched => Err(GatewayError::RouteNotFound),
    };

    let response = match result {
        Ok(response) => response,
        Err(err) => {
            tracing::debug!(path = %path, error = %err, error_type = err.error_type(), "Request failed");
            if html_errors {
                err.into_html_response()
            } else {
                err.into_response()
            }
        }
    };

    metrics::record_request(shape_name, response.status().as_u16(), start);
    response
}

/// Serve the entry file of `package`, at `pinned` or at the latest version.
async fn serve_entry(
    state: &AppState,
    package: &str,
    pinned: Option<&str>,
) -> Result<Response, GatewayError> {
    let manifest = state.registry.fetch_manifest(package).await?;

    let version = pinned.or(manifest.latest()).unwrap_or("latest").to_string();
    let version_manifest = manifest
        .version(&version)
        .ok_or_else(|| GatewayError::VersionNotFound {
            package: package.to_string(),
            version: version.clone(),
        })?;

    let entry = resolve_entry(version_manifest).ok_or_else(|| GatewayError::EntryNotFound {
        package: package.to_string(),
        version: version.clone(),
    })?;

    tracing::debug!(package = %package, version = %version, entry = %entry, "Resolved entry file");
    serve_file(state, package, &version, &entry).await
}

/// Redirect `/{package}/` to the directory view of its latest version.
async fn redirect_to_latest(state: &AppState, package: &str) -> Result<Response, GatewayError> {
    let manifest = state.registry.fetch_manifest(package).await?;
    let latest = manifest
        .latest()
        .ok_or_else(|| GatewayError::MissingLatest(package.to_string()))?;

    let location = encode_path(&format!("/{}@{}/", package, latest));
    let location = HeaderValue::from_str(&location)
        .map_err(|_| GatewayError::MissingLatest(package.to_string()))?;

    Ok((StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, location)]).into_response())
}

/// Directory view of a pinned version.
async fn directory(state: &AppState, package: &str, version: &str) -> Result<Response, GatewayError> {
    let manifest = state.registry.fetch_manifest(package).await?;
    if manifest.version(version).is_none() {
        return Err(GatewayError::VersionNotFound {
            package: package.to_string(),
            version: version.to_string(),
        });
    }
    Ok(Html(pages::directory_listing(package)).into_response())
}

async fn serve_file(
    state: &AppState,
    package: &str,
    version: &str,
    path: &str,
) -> Result<Response, GatewayError> {
    let file = state.cdn.fetch_file(package, version, path).await?;
    Ok(file_response(file))
}
