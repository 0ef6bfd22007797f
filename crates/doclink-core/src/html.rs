//! HTML fragments for resolved links and failure notices.
//!
//! Decoded references come from an untrusted upstream payload, so every
//! value is escaped and hrefs are restricted to http(s) or root-relative
//! paths.

/// Escapes text for use in element content or a quoted attribute.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escaped href, or `#` when the scheme is not one we link to.
fn safe_href(href: &str) -> String {
    let lower = href.trim_start().to_ascii_lowercase();
    let allowed = lower.starts_with("https://")
        || lower.starts_with("http://")
        || (lower.starts_with('/') && !lower.starts_with("//"));
    if allowed {
        escape(href)
    } else {
        "#".to_string()
    }
}

/// Values shown in the optional technical-details block of a notice.
#[derive(Debug, Clone, Copy, Default)]
pub struct Diagnostics<'a> {
    pub encoded: &'a str,
    pub raw: Option<&'a str>,
    pub cleaned: Option<&'a str>,
}

/// Single link opening the document in a new tab.
pub fn render_link(href: &str, label: &str) -> String {
    format!(
        r#"<a class="doclink-link" href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
        safe_href(href),
        escape(label)
    )
}

/// View and download actions for the proxied endpoints.
pub fn render_document_actions(view_href: &str, download_href: &str, title: &str) -> String {
    let title = escape(title);
    format!(
        concat!(
            r#"<span class="doclink-actions">"#,
            r#"<a class="doclink-view" href="{view}" title="View {title}" target="_blank" rel="noopener noreferrer">View</a> "#,
            r#"<a class="doclink-download" href="{download}" title="Download {title}" download>Download</a>"#,
            "</span>"
        ),
        view = safe_href(view_href),
        download = safe_href(download_href),
        title = title
    )
}

/// Inline notice explaining that no document link could be produced.
pub fn render_notice(message: &str, diagnostics: Option<&Diagnostics<'_>>) -> String {
    let mut out = String::from(r#"<div class="doclink-notice" role="note">"#);
    out.push_str(r#"<span class="doclink-notice-text">No document link available: "#);
    out.push_str(&escape(message));
    out.push_str("</span>");
    if let Some(d) = diagnostics {
        out.push_str("<details><summary>Technical details</summary><dl>");
        push_field(&mut out, "Encoded", Some(d.encoded));
        push_field(&mut out, "Decoded", d.raw);
        push_field(&mut out, "Cleaned", d.cleaned);
        out.push_str("</dl></details>");
    }
    out.push_str("</div>");
    out
}

fn push_field(out: &mut String, name: &str, value: Option<&str>) {
    out.push_str("<dt>");
    out.push_str(name);
    out.push_str("</dt><dd><code>");
    match value {
        Some(v) => out.push_str(&escape(v)),
        None => out.push_str("(none)"),
    }
    out.push_str("</code></dd>");
}
