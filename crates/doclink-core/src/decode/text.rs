//! Conversions between decoded bytes and the "binary string" form.

/// Maps each byte to the char with the same code point (U+0000..U+00FF).
pub(crate) fn bytes_to_binary_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Second decoding pass: reads a binary string as UTF-8.
///
/// Undoes the double encoding left behind when UTF-8 URLs are Base64-encoded
/// and decoded byte-wise. Returns the input unchanged when it holds chars
/// above U+00FF or the bytes are not valid UTF-8.
pub fn reinterpret_utf8(binary: &str) -> String {
    let mut bytes = Vec::with_capacity(binary.len());
    for c in binary.chars() {
        match u8::try_from(u32::from(c)) {
            Ok(b) => bytes.push(b),
            Err(_) => return binary.to_string(),
        }
    }
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(_) => binary.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_passes_through() {
        let s = bytes_to_binary_string(b"https://example.com/a.pdf");
        assert_eq!(reinterpret_utf8(&s), "https://example.com/a.pdf");
    }

    #[test]
    fn multibyte_utf8_is_recovered() {
        let s = bytes_to_binary_string("https://example.com/café.pdf".as_bytes());
        assert_ne!(s, "https://example.com/café.pdf");
        assert_eq!(reinterpret_utf8(&s), "https://example.com/café.pdf");
    }

    #[test]
    fn invalid_utf8_keeps_binary_form() {
        let s = bytes_to_binary_string(&[b'h', 0xff, b'x']);
        assert_eq!(reinterpret_utf8(&s), s);
    }

    #[test]
    fn wide_chars_keep_input() {
        assert_eq!(reinterpret_utf8("日本"), "日本");
    }
}
