//! Tolerant Base64 decoding of citation references.
//!
//! References arrive with stray trailing characters, wrong padding, and
//! off-by-one truncation or extension. The decoder strips what it can,
//! retries a bounded number of times, and falls back to the original input
//! instead of failing.

mod policy;
mod text;

pub use policy::{TrimDecision, TrimPolicy};
pub use text::reinterpret_utf8;

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;

use text::bytes_to_binary_string;

use crate::logging::Category;

/// Standard alphabet, accepting non-canonical trailing bits and any padding.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

fn is_base64_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '+' || c == '/' || c == '='
}

/// Removes trailing characters outside the standard Base64 alphabet.
pub fn strip_invalid_suffix(input: &str) -> &str {
    input.trim_end_matches(|c: char| !is_base64_char(c))
}

/// Pads with `=` to the next multiple of four.
pub(crate) fn pad(s: &str) -> String {
    let missing = (4 - s.len() % 4) % 4;
    let mut out = String::with_capacity(s.len() + missing);
    out.push_str(s);
    out.extend(std::iter::repeat('=').take(missing));
    out
}

fn drop_last_char(s: &str) -> &str {
    match s.char_indices().last() {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Base64 decoder with bounded retry-by-truncation.
#[derive(Debug, Clone, Copy, Default)]
pub struct TolerantDecoder {
    policy: TrimPolicy,
}

impl TolerantDecoder {
    pub fn new(policy: TrimPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> TrimPolicy {
        self.policy
    }

    /// Decodes `input` to a binary string, or returns `input` unchanged when
    /// no attempt succeeds.
    pub fn decode(&self, input: &str) -> String {
        let mut candidate = strip_invalid_suffix(input);
        let mut trims = 0u32;
        loop {
            if let Some(decoded) = decode_candidate(candidate) {
                if trims > 0 {
                    tracing::debug!(
                        target: "doclink::decode",
                        category = Category::Decode.as_str(),
                        trims,
                        "decoded reference after trimming trailing characters"
                    );
                }
                return decoded;
            }
            match self.policy.decide(trims, candidate.chars().count()) {
                TrimDecision::Stop => break,
                TrimDecision::TrimOne => {
                    candidate = strip_invalid_suffix(drop_last_char(candidate));
                    trims += 1;
                }
            }
        }
        tracing::debug!(
            target: "doclink::decode",
            category = Category::Decode.as_str(),
            input_len = input.len(),
            "all decode attempts failed; keeping reference as-is"
        );
        input.to_string()
    }
}

/// Decodes with the default trim policy.
pub fn decode(input: &str) -> String {
    TolerantDecoder::default().decode(input)
}

/// One attempt: standard alphabet, then the URL-safe variant.
fn decode_candidate(candidate: &str) -> Option<String> {
    let padded = pad(candidate);
    if let Ok(bytes) = LENIENT.decode(padded.as_bytes()) {
        return Some(bytes_to_binary_string(&bytes));
    }

    // URL-safe references: decode bytes, then read them as UTF-8.
    let standard: String = padded
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    let bytes = LENIENT.decode(standard.as_bytes()).ok()?;
    String::from_utf8(bytes).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
    use base64::Engine as _;

    #[test]
    fn decodes_clean_input() {
        let enc = STANDARD.encode("https://example.com/files/document.pdf");
        assert_eq!(decode(&enc), "https://example.com/files/document.pdf");
    }

    #[test]
    fn strips_trailing_garbage() {
        let enc = STANDARD.encode("https://example.com/a.txt");
        assert_eq!(decode(&format!("{enc}%!")), "https://example.com/a.txt");
    }

    #[test]
    fn missing_padding_is_added() {
        let enc = STANDARD.encode("https://example.com/ab.csv");
        let unpadded = enc.trim_end_matches('=');
        assert_eq!(decode(unpadded), "https://example.com/ab.csv");
    }

    #[test]
    fn excess_padding_is_trimmed() {
        let enc = STANDARD.encode("hi");
        assert_eq!(enc, "aGk=");
        assert_eq!(decode("aGk==="), "hi");
    }

    #[test]
    fn url_safe_variant_decodes() {
        let url = "https://example.com/q???????.pdf";
        let enc = URL_SAFE_NO_PAD.encode(url);
        assert!(enc.contains('-') || enc.contains('_'));
        assert_eq!(decode(&enc), url);
    }

    #[test]
    fn off_by_one_extension_recovers_prefix() {
        let enc = STANDARD.encode("https://example.com/file.pdf");
        let decoded = decode(&format!("{enc}A"));
        assert!(decoded.starts_with("https://example.com/file.pdf"));
    }

    #[test]
    fn undecodable_input_is_returned_unchanged() {
        assert_eq!(decode("a-b_c!!"), "a-b_c!!");
    }

    #[test]
    fn nothing_left_after_stripping_decodes_to_empty() {
        assert_eq!(decode("*"), "");
    }

    #[test]
    fn zero_trim_budget_falls_back_immediately() {
        let decoder = TolerantDecoder::new(TrimPolicy::new(0));
        assert_eq!(decoder.decode("aGk==="), "aGk===");
    }

    #[test]
    fn strip_invalid_suffix_keeps_alphabet() {
        assert_eq!(strip_invalid_suffix("abc=%$ "), "abc=");
        assert_eq!(strip_invalid_suffix("%%"), "");
    }

    #[test]
    fn pad_to_multiple_of_four() {
        assert_eq!(pad("a"), "a===");
        assert_eq!(pad("ab"), "ab==");
        assert_eq!(pad("abcd"), "abcd");
    }
}
