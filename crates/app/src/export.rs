//! Export of the detail panel as a downloadable document.
//!
//! The rendered panel HTML is reduced to text by dropping the tags the panel
//! is built from and every bracket character, then wrapped in a minimal HTML
//! document that word processors open as a `.doc` file.

/// Download name of the exported document.
pub const FILE_NAME: &str = "DeviceData.doc";

/// MIME type the document is served with.
pub const CONTENT_TYPE: &str = "application/msword";

const TITLE: &str = "Summary document";

/// Tags removed from the panel markup, opening and closing alike.
const RECOGNIZED_TAGS: &[&str] = &[
    "li", "ul", "p", "br", "strong", "h", "h1", "h2", "h3", "h4", "h5", "h6",
];

const BRACKETS: &[char] = &['{', '}', '[', ']'];

/// Strip recognised tags and bracket characters from `html`.
///
/// Unrecognised tags are kept verbatim. The result is trimmed, and so is
/// every line in it.
#[must_use]
pub fn strip_markup(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(ch) = rest.chars().next() {
        if ch == '<' {
            if let Some(end) = rest.find('>') {
                if is_recognized_tag(&rest[1..end]) {
                    rest = &rest[end + 1..];
                    continue;
                }
            }
        }
        if !BRACKETS.contains(&ch) {
            out.push(ch);
        }
        rest = &rest[ch.len_utf8()..];
    }

    out.trim()
        .lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_recognized_tag(inner: &str) -> bool {
    let inner = inner.strip_prefix('/').unwrap_or(inner);
    let name_len = inner
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(inner.len());
    let (name, after) = inner.split_at(name_len);
    let boundary_ok = after
        .chars()
        .next()
        .is_none_or(|c| c.is_ascii_whitespace() || c == '/');
    boundary_ok
        && RECOGNIZED_TAGS
            .iter()
            .any(|tag| tag.eq_ignore_ascii_case(name))
}

/// Wrap plain text in the export document, one `<br>` per line break.
#[must_use]
pub fn document(text: &str) -> String {
    let body = text.replace('\n', "<br>\n");
    format!(
        "<!DOCTYPE html>
<html lang=\"en\">
<head>
<meta charset=\"UTF-8\">
<title>{TITLE}</title>
</head>
<body>
<div style=\"text-align: center; font-weight: bold; font-size: 16px; font-family: 'Times New Roman';\">{TITLE}</div>
<div style=\"height: 24pt;\"></div>
<div style=\"font-size: 13px; font-family: 'Times New Roman';\">
{body}
</div>
</body>
</html>
"
    )
}

/// Turn rendered panel HTML into the downloadable document.
#[must_use]
pub fn export_panel(panel_html: &str) -> String {
    document(&strip_markup(panel_html))
}
