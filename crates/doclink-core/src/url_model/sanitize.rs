//! Download filename sanitization.

/// Name used when nothing usable is left after sanitizing.
pub(super) const FALLBACK_FILENAME: &str = "document";

/// Sanitizes a filename taken from a blob path before it goes into a
/// `Content-Disposition` header.
///
/// - Replaces NUL, `/`, `\`, `"` and control characters with `_`
/// - Collapses consecutive underscores
/// - Trims leading/trailing spaces, dots and underscores
/// - Limits length to 255 bytes
pub fn sanitize_filename(name: &str) -> String {
    const NAME_MAX: usize = 255;

    let mut out = String::with_capacity(name.len());
    let mut prev_underscore = false;

    for c in name.chars() {
        let replacement = if c == '/' || c == '\\' || c == '"' || c.is_control() {
            '_'
        } else {
            c
        };

        if replacement == '_' {
            if !prev_underscore {
                out.push('_');
            }
            prev_underscore = true;
        } else {
            out.push(replacement);
            prev_underscore = false;
        }
    }

    let trimmed = out.trim_matches(|c| c == ' ' || c == '.' || c == '_');

    if trimmed.len() > NAME_MAX {
        let mut take = NAME_MAX;
        while take > 0 && !trimmed.is_char_boundary(take) {
            take -= 1;
        }
        trimmed[..take].to_string()
    } else {
        trimmed.to_string()
    }
}
