//! CDN origin addressing.

use url::Url;

use crate::net::encode_path;

/// One file-serving mirror keyed by `package@version/path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CdnOrigin {
    base: String,
    label: String,
}

impl CdnOrigin {
    /// Create an origin from its base URL (e.g. `https://cdn.jsdelivr.net/npm`).
    pub fn new(base: &str) -> Self {
        let base = base.trim_end_matches('/').to_string();
        let label = Url::parse(&base)
            .ok()
            .and_then(|u| {
                let host = u.host_str()?;
                Some(match u.port() {
                    Some(port) => format!("{}:{}", host, port),
                    None => host.to_string(),
                })
            })
            .unwrap_or_else(|| base.clone());
        Self { base, label }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Short name used in logs and metric labels (host, plus an explicit port).
    pub fn label(&self) -> &str {
        &self.label
    }

    /// `{origin}/{package}@{version}/{path}`, with the package part percent-encoded.
    pub fn file_url(&self, package: &str, version: &str, path: &str) -> String {
        let tail = encode_path(&format!("{}@{}/{}", package, version, path));
        format!("{}/{}", self.base, tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_url() {
        let origin = CdnOrigin::new("https://cdn.jsdelivr.net/npm/");
        assert_eq!(
            origin.file_url("vue", "3.3.4", "dist/vue.runtime.esm-bundler.js"),
            "https://cdn.jsdelivr.net/npm/vue@3.3.4/dist/vue.runtime.esm-bundler.js"
        );
        assert_eq!(
            origin.file_url("@vue/shared", "3.3.4", "index.js"),
            "https://cdn.jsdelivr.net/npm/@vue/shared@3.3.4/index.js"
        );
    }

    #[test]
    fn test_file_url_escapes_query_and_percent() {
        let origin = CdnOrigin::new("https://unpkg.com");
        assert_eq!(
            origin.file_url("pkg", "1.0.0", "a b/c?.js"),
            "https://unpkg.com/pkg@1.0.0/a%20b/c%3F.js"
        );
        assert_eq!(
            origin.file_url("pkg", "1.0.0", "%2e%2e/x.js"),
            "https://unpkg.com/pkg@1.0.0/%252e%252e/x.js"
        );
    }

    #[test]
    fn test_label_is_host() {
        assert_eq!(CdnOrigin::new("https://unpkg.com").label(), "unpkg.com");
        assert_eq!(CdnOrigin::new("http://127.0.0.1:9000/npm").label(), "127.0.0.1:9000");
        assert_eq!(CdnOrigin::new("not a url").label(), "not a url");
    }
}
