//! Static HTML pages: the landing page and the directory view.

/// Files shown in every directory view. The listing is illustrative, not
/// derived from the package's real contents.
pub const LISTED_FILES: [&str; 3] = ["index.js", "package.json", "README.md"];

pub const LANDING_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>npm CDN gateway</title>
</head>
<body>
<h1>npm CDN gateway</h1>
<ul>
<li>Package entry file: /{package}</li>
<li>Package entry file (pinned version): /{package}@{version}</li>
<li>Browse directory (latest): /{package}/</li>
<li>Browse directory (pinned version): /{package}@{version}/</li>
<li>Fetch a file: /{package}@{version}/{file_path}</li>
</ul>
</body>
</html>
"#;

/// Render the directory view of `package`.
pub fn directory_listing(package: &str) -> String {
    let package = escape(package);
    let links: String = LISTED_FILES
        .iter()
        .map(|file| format!("<li><a href=\"{file}\">{file}</a></li>\n"))
        .collect();

    format!(
        "<!DOCTYPE HTML>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{package}</title>\n</head>\n\
         <body>\n<h1>{package}</h1>\n<hr>\n<ul>\n{links}</ul>\n<hr>\n</body>\n</html>"
    )
}

/// Escape text for inclusion in HTML.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_links_fixed_files() {
        let html = directory_listing("vue");
        assert!(html.contains("<title>vue</title>"));
        for file in LISTED_FILES {
            assert!(html.contains(&format!("<a href=\"{file}\">{file}</a>")));
        }
    }

    #[test]
    fn test_listing_escapes_package() {
        let html = directory_listing("<b>x</b>");
        assert!(html.contains("<h1>&lt;b&gt;x&lt;/b&gt;</h1>"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"a&b "c" 'd'"#), "a&amp;b &quot;c&quot; &#39;d&#39;");
    }
}
