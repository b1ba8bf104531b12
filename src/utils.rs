use crate::error::{Result, SentinelError};
use crate::types::HttpResponse;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use std::path::Path;
use std::time::SystemTime;
use tiny_http::{Header, Response};

pub const SECURITY_HEADERS: [(&str, &str); 3] = [
    ("X-Frame-Options", "DENY"),
    ("X-Content-Type-Options", "nosniff"),
    ("X-XSS-Protection", "1; mode=block"),
];

pub fn header(name: &str, value: &str) -> Result<Header> {
    Header::from_bytes(name.as_bytes(), value.as_bytes())
        .map_err(|_| SentinelError::Header(format!("{}: {}", name, value)))
}

pub fn with_header(response: HttpResponse, name: &str, value: &str) -> Result<HttpResponse> {
    Ok(response.with_header(header(name, value)?))
}

pub fn add_security_headers(response: HttpResponse) -> Result<HttpResponse> {
    let mut response = response;
    for (name, value) in SECURITY_HEADERS {
        response = with_header(response, name, value)?;
    }
    Ok(response)
}

pub fn text_response(status: u16, body: &str) -> Result<HttpResponse> {
    let response = Response::from_data(body.as_bytes().to_vec()).with_status_code(status);
    with_header(response, "Content-Type", "text/plain; charset=utf-8")
}

pub fn json_response<T: serde::Serialize>(status: u16, value: &T) -> Result<HttpResponse> {
    let body = serde_json::to_vec(value)?;
    let response = Response::from_data(body).with_status_code(status);
    with_header(response, "Content-Type", "application/json; charset=utf-8")
}

/// Strong entity tag: quoted SHA-256 of the body.
pub fn calculate_etag(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    format!("\"{:x}\"", result)
}

/// True when an `If-None-Match` value names `etag` (or is `*`).
pub fn etag_matches(if_none_match: &str, etag: &str) -> bool {
    if_none_match
        .split(',')
        .map(|candidate| candidate.trim())
        .map(|candidate| candidate.strip_prefix("W/").unwrap_or(candidate))
        .any(|candidate| candidate == "*" || candidate == etag)
}

pub fn http_date(time: SystemTime) -> String {
    let time: DateTime<Utc> = time.into();
    time.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase());

    match ext.as_deref() {
        Some("html") | Some("htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") | Some("mjs") => "application/javascript; charset=utf-8",
        Some("json") | Some("map") => "application/json; charset=utf-8",
        Some("txt") => "text/plain; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("apk") => "application/vnd.android.package-archive",
        _ => "application/octet-stream",
    }
}

/// True when the `If-Modified-Since` date is at or after `modified`, at
/// one-second precision. Unparsable dates never match.
pub fn unmodified_since(if_modified_since: &str, modified: SystemTime) -> bool {
    let since = match DateTime::parse_from_rfc2822(if_modified_since.trim()) {
        Ok(since) => since,
        Err(_) => return false,
    };
    let modified: DateTime<Utc> = modified.into();
    modified.timestamp() <= since.timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn test_etag_is_quoted_sha256() {
        let etag = calculate_etag(b"abc");
        assert_eq!(
            etag,
            "\"ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad\""
        );
    }

    #[test]
    fn test_etag_matching() {
        let etag = calculate_etag(b"page");
        assert!(etag_matches(&etag, &etag));
        assert!(etag_matches(&format!("\"other\", W/{}", etag), &etag));
        assert!(etag_matches("*", &etag));
        assert!(!etag_matches("\"other\"", &etag));
    }

    #[test]
    fn test_http_date_format() {
        let time = UNIX_EPOCH + Duration::from_secs(784_111_777);
        assert_eq!(http_date(time), "Sun, 06 Nov 1994 08:49:37 GMT");
    }

    #[test]
    fn test_content_types() {
        assert_eq!(content_type_for(Path::new("index.html")), "text/html; charset=utf-8");
        assert_eq!(content_type_for(Path::new("css/STYLE.CSS")), "text/css; charset=utf-8");
        assert_eq!(content_type_for(Path::new("blob")), "application/octet-stream");
    }

    #[test]
    fn test_unmodified_since() {
        let modified = UNIX_EPOCH + Duration::from_millis(784_111_777_250);
        assert!(unmodified_since("Sun, 06 Nov 1994 08:49:37 GMT", modified));
        assert!(unmodified_since("Fri, 01 Jan 2100 00:00:00 GMT", modified));
        assert!(!unmodified_since("Sun, 06 Nov 1994 08:49:36 GMT", modified));
        assert!(!unmodified_since("yesterday", modified));
    }
}
