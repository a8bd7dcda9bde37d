//! Response construction for served files.
//!
//! # Design Decisions
//! - The upstream Content-Type is passed through untouched
//! - File responses are readable cross-origin (`Access-Control-Allow-Origin: *`)

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::cdn::{CdnFile, DEFAULT_CONTENT_TYPE};

/// Turn a fetched CDN file into the outward response.
pub fn file_response(file: CdnFile) -> Response {
    let content_type = HeaderValue::from_str(&file.content_type)
        .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_CONTENT_TYPE));

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*")),
        ],
        file.body,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn test_file_response_headers() {
        let response = file_response(CdnFile {
            body: Bytes::from_static(b"export default 1;"),
            content_type: "application/javascript; charset=utf-8".into(),
            origin: "cdn.jsdelivr.net".into(),
        });
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/javascript; charset=utf-8"
        );
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[test]
    fn test_unrepresentable_content_type_falls_back() {
        let response = file_response(CdnFile {
            body: Bytes::new(),
            content_type: "text/plain\n".into(),
            origin: "unpkg.com".into(),
        });
        assert_eq!(response.headers()[header::CONTENT_TYPE], DEFAULT_CONTENT_TYPE);
    }
}
