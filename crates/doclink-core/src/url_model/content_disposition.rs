//! Content-Disposition header values for the view and download endpoints.

/// Whether the browser should render the document or save it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Preview in the browser (`/view`).
    Inline,
    /// Save to disk (`/download`).
    Attachment,
}

impl Disposition {
    fn as_str(self) -> &'static str {
        match self {
            Disposition::Inline => "inline",
            Disposition::Attachment => "attachment",
        }
    }
}

/// Builds a Content-Disposition value for `filename`.
///
/// Always carries a quoted ASCII `filename`; non-ASCII names additionally get
/// an RFC 5987 `filename*=UTF-8''...` parameter, which clients prefer.
pub fn content_disposition(filename: &str, disposition: Disposition) -> String {
    let ascii: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii() && !c.is_ascii_control() && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if ascii == filename {
        format!("{}; filename=\"{}\"", disposition.as_str(), ascii)
    } else {
        format!(
            "{}; filename=\"{}\"; filename*=UTF-8''{}",
            disposition.as_str(),
            ascii,
            urlencoding::encode(filename)
        )
    }
}
