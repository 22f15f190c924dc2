//! Charset detection and decoding for fetched HTML bodies.
//!
//! Order of trust: Content-Type header charset, then a `<meta>` declaration
//! in the first 4KB of the body, then a chardetng sniff.

use crate::fetcher::errors::FetchError;
use encoding_rs::Encoding;
use regex::Regex;
use std::sync::LazyLock;

const META_SCAN_BYTES: usize = 4096;

static HEADER_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

static META_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s/>]+)"#).unwrap());

// Legacy form: <meta http-equiv="Content-Type" content="text/html; charset=...">
static META_HTTP_EQUIV: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)<meta\s+[^>]*?http-equiv\s*=\s*["']?content-type["']?[^>]*?content\s*=\s*["']?[^"'>]*?charset\s*=\s*([^"'\s;/>]+)"#,
    )
    .unwrap()
});

/// Decode a raw HTML body to a UTF-8 string.
pub fn decode_body(content_type: &str, body: &[u8]) -> Result<String, FetchError> {
    let encoding = detect_encoding(content_type, body);
    let (decoded, _, had_errors) = encoding.decode(body);
    if had_errors {
        return Err(FetchError::Charset(format!(
            "failed to decode body as {}",
            encoding.name()
        )));
    }
    Ok(decoded.into_owned())
}

fn detect_encoding(content_type: &str, body: &[u8]) -> &'static Encoding {
    if let Some(enc) = charset_from(&HEADER_CHARSET, content_type) {
        return enc;
    }

    let head = &body[..body.len().min(META_SCAN_BYTES)];
    let head_str = String::from_utf8_lossy(head);
    if let Some(enc) = charset_from(&META_HTTP_EQUIV, &head_str) {
        return enc;
    }
    if let Some(enc) = charset_from(&META_CHARSET, &head_str) {
        return enc;
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(head, false);
    detector.guess(None, true)
}

fn charset_from(re: &Regex, haystack: &str) -> Option<&'static Encoding> {
    let label = re.captures(haystack)?.get(1)?.as_str().to_lowercase();
    Encoding::for_label(label.as_bytes())
}
