//! URL path hygiene for package paths.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Bytes escaped in a path. `/` and `@` pass through so package paths keep
/// their shape; `%` and `\` are escaped so the result cannot be re-read as a
/// different path.
const PATH_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Percent-encode a decoded path for use in a URL or a `Location` header.
pub fn encode_path(path: &str) -> String {
    utf8_percent_encode(path, PATH_SET).to_string()
}

/// True when any `/`-separated segment is `..`.
pub fn climbs_out(path: &str) -> bool {
    path.split(['/', '\\']).any(|segment| segment == "..")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_path() {
        assert_eq!(encode_path("/vue@3.3.4/"), "/vue@3.3.4/");
        assert_eq!(encode_path("/@vue/shared@3.3.4/"), "/@vue/shared@3.3.4/");
        assert_eq!(encode_path("/café@1.0.0/"), "/caf%C3%A9@1.0.0/");
        assert_eq!(encode_path("/a b@1/"), "/a%20b@1/");
        assert_eq!(encode_path("/a%41b@1.0.0/"), "/a%2541b@1.0.0/");
        assert_eq!(encode_path("dist/a.js?x#y"), "dist/a.js%3Fx%23y");
        assert_eq!(encode_path("%2e%2e/x"), "%252e%252e/x");
    }

    #[test]
    fn test_climbs_out() {
        assert!(climbs_out(".."));
        assert!(climbs_out("../victim@2.0.0/secret.js"));
        assert!(climbs_out("dist/../../x.js"));
        assert!(climbs_out("dist\\..\\x.js"));
        assert!(!climbs_out("dist/a.js"));
        assert!(!climbs_out("..foo/a.js"));
        assert!(!climbs_out("a..b/c.js"));
        assert!(!climbs_out(".eslintrc.js"));
    }
}
