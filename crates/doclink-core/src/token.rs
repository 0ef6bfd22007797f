//! Access-token (SAS) normalization and URL attachment.
//!
//! Tokens come from page configuration and are often wrapped in quotes or
//! HTML-entity-encoded by the template that emitted them.

use std::fmt;

/// Normalizes a raw access token.
///
/// Trims whitespace, strips one layer of matching quotes, and decodes HTML
/// entities. The steps repeat until the value is stable, so
/// `sanitize(&sanitize(t)) == sanitize(t)`.
pub fn sanitize(token: &str) -> String {
    let mut current = token.to_string();
    loop {
        let next = sanitize_once(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

fn sanitize_once(token: &str) -> String {
    decode_entities(strip_quotes(token.trim()))
}

fn strip_quotes(s: &str) -> &str {
    let bytes = s.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if first == last && (first == b'"' || first == b'\'') {
            return &s[1..s.len() - 1];
        }
    }
    s
}

/// Longest entity body we look for between `&` and `;`.
const MAX_ENTITY_LEN: usize = 10;

/// Named references without a trailing `;` that HTML still decodes.
const LEGACY_ENTITIES: &[(&str, char)] = &[
    ("quot", '"'),
    ("nbsp", '\u{a0}'),
    ("copy", '\u{a9}'),
    ("amp", '&'),
    ("reg", '\u{ae}'),
    ("lt", '<'),
    ("gt", '>'),
];

/// Decodes numeric (`&#39;`, `&#x27;`) and common named (`&amp;`, `&quot;`,
/// `&copy;`, ...) character references, plus the legacy forms without `;`
/// (`&amp`, `&lt`, ...). This is the subset of HTML's table that shows up in
/// templated config values; unknown or malformed references are kept
/// verbatim.
pub fn decode_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let decoded = after
            .char_indices()
            .take(MAX_ENTITY_LEN + 1)
            .find(|&(_, c)| c == ';')
            .and_then(|(semi, _)| entity_char(&after[..semi]).map(|c| (c, semi + 1)))
            .or_else(|| {
                LEGACY_ENTITIES
                    .iter()
                    .find(|(name, _)| after.starts_with(name))
                    .map(|&(name, c)| (c, name.len()))
            });
        match decoded {
            Some((c, consumed)) => {
                out.push(c);
                rest = &after[consumed..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn entity_char(name: &str) -> Option<char> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return char::from_u32(code).filter(|&c| c != '\0');
    }
    let c = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "copy" => '\u{a9}',
        "reg" => '\u{ae}',
        "trade" => '\u{2122}',
        "sect" => '\u{a7}',
        "para" => '\u{b6}',
        "deg" => '\u{b0}',
        "plusmn" => '\u{b1}',
        "times" => '\u{d7}',
        "divide" => '\u{f7}',
        "middot" => '\u{b7}',
        "laquo" => '\u{ab}',
        "raquo" => '\u{bb}',
        "cent" => '\u{a2}',
        "pound" => '\u{a3}',
        "yen" => '\u{a5}',
        "euro" => '\u{20ac}',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201c}',
        "rdquo" => '\u{201d}',
        "hellip" => '\u{2026}',
        "bull" => '\u{2022}',
        _ => return None,
    };
    Some(c)
}

/// Appends `token` as a query string to `url`.
///
/// Accepts the token with or without a leading `?` and joins with `&` when
/// the URL already has a query.
pub fn append_token(url: &str, token: &str) -> String {
    let token = token.strip_prefix('?').unwrap_or(token);
    if token.is_empty() {
        return url.to_string();
    }
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sep}{token}")
}

/// A sanitized access token. `Debug` never prints the value.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(raw: &str) -> Self {
        Self(sanitize(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn append_to(&self, url: &str) -> String {
        append_token(url, &self.0)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("AccessToken(<empty>)")
        } else {
            f.write_str("AccessToken(<redacted>)")
        }
    }
}
