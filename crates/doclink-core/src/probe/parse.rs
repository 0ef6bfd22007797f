//! Parse HTTP response header lines into ProbeResult fields.

use super::ProbeHeaders;

/// Parse collected header lines. With redirects followed, curl reports one
/// header block per hop; only the last block is kept.
pub(crate) fn parse_headers(lines: &[String]) -> ProbeHeaders {
    let mut out = ProbeHeaders::default();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            out = ProbeHeaders::default();
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-length") {
                if let Ok(n) = value.parse::<u64>() {
                    out.content_length = Some(n);
                }
            }
            if name.eq_ignore_ascii_case("content-type") {
                out.content_type = Some(value.to_string());
            }
            if name.eq_ignore_ascii_case("content-disposition") {
                out.content_disposition = Some(value.to_string());
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_type_and_length() {
        let lines = [
            "HTTP/1.1 200 OK".to_string(),
            "Content-Type: application/pdf".to_string(),
            "Content-Length: 12345".to_string(),
        ];
        let r = parse_headers(&lines);
        assert_eq!(r.content_length, Some(12345));
        assert_eq!(r.content_type.as_deref(), Some("application/pdf"));
        assert!(r.content_disposition.is_none());
    }

    #[test]
    fn keeps_last_redirect_hop_only() {
        let lines = [
            "HTTP/1.1 302 Found".to_string(),
            "Content-Type: text/html".to_string(),
            "Location: https://cdn.example.com/a.pdf".to_string(),
            "".to_string(),
            "HTTP/1.1 200 OK".to_string(),
            "Content-Length: 10".to_string(),
        ];
        let r = parse_headers(&lines);
        assert!(r.content_type.is_none());
        assert_eq!(r.content_length, Some(10));
    }

    #[test]
    fn content_disposition_is_captured() {
        let lines = ["Content-Disposition: inline; filename=\"report.pdf\"".to_string()];
        let r = parse_headers(&lines);
        assert!(r
            .content_disposition
            .as_deref()
            .unwrap()
            .contains("report.pdf"));
    }

    #[test]
    fn bad_length_is_ignored() {
        let lines = ["Content-Length: lots".to_string()];
        assert!(parse_headers(&lines).content_length.is_none());
    }
}
