use crate::config::INDEX_FILE;
use crate::error::Result;
use crate::types::HttpResponse;
use crate::utils::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tiny_http::Response;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaticMatch {
    File(PathBuf),
    Redirect(String),
    NotFound,
}

/// Maps a request URL onto the public directory.
///
/// Dotfiles, `..` segments, control characters and paths that do not decode
/// to UTF-8 never match; the caller falls through to the single page for
/// those. Malformed escapes stay literal.
pub fn resolve(public_dir: &Path, url: &str) -> StaticMatch {
    let (raw_path, query) = match url.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (url, None),
    };

    if !raw_path.starts_with('/') {
        return StaticMatch::NotFound;
    }

    let decoded = match urlencoding::decode(raw_path) {
        Ok(decoded) => decoded,
        Err(_) => return StaticMatch::NotFound,
    };

    let mut path = public_dir.to_path_buf();
    for segment in decoded.split('/').filter(|s| !s.is_empty()) {
        if segment.starts_with('.')
            || segment.contains('\\')
            || segment.chars().any(char::is_control)
        {
            return StaticMatch::NotFound;
        }
        path.push(segment);
    }

    if path.is_file() {
        return StaticMatch::File(path);
    }

    if path.is_dir() {
        if !decoded.ends_with('/') {
            let location = match query {
                Some(query) => format!("{}/?{}", raw_path, query),
                None => format!("{}/", raw_path),
            };
            return StaticMatch::Redirect(location);
        }
        let index = path.join(INDEX_FILE);
        if index.is_file() {
            return StaticMatch::File(index);
        }
    }

    StaticMatch::NotFound
}

/// Conditional request headers, as sent by the client.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validators<'a> {
    pub if_none_match: Option<&'a str>,
    pub if_modified_since: Option<&'a str>,
}

impl Validators<'_> {
    /// `If-None-Match` decides alone when present; otherwise the copy is
    /// fresh if `If-Modified-Since` is not older than `modified`.
    pub fn is_fresh(&self, etag: &str, modified: SystemTime) -> bool {
        match (self.if_none_match, self.if_modified_since) {
            (Some(if_none_match), _) => etag_matches(if_none_match, etag),
            (None, Some(since)) => unmodified_since(since, modified),
            (None, None) => false,
        }
    }
}

/// Reads `path` and answers with cache validators. A fresh client copy
/// turns the answer into an empty 304.
pub fn serve_file(path: &Path, max_age: u64, validators: Validators<'_>) -> Result<HttpResponse> {
    let data = fs::read(path)?;
    let modified = fs::metadata(path)?.modified()?;
    let etag = calculate_etag(&data);

    let not_modified = validators.is_fresh(&etag, modified);

    let response = if not_modified {
        Response::from_data(Vec::new()).with_status_code(304)
    } else {
        let response = Response::from_data(data).with_status_code(200);
        with_header(response, "Content-Type", content_type_for(path))?
    };

    let response = with_header(response, "ETag", &etag)?;
    let response = with_header(response, "Last-Modified", &http_date(modified))?;
    with_header(
        response,
        "Cache-Control",
        &format!("public, max-age={}", max_age),
    )
}

pub fn redirect(location: &str) -> Result<HttpResponse> {
    let body = format!("Redirecting to {}", location);
    let response = text_response(301, &body)?;
    with_header(response, "Location", location)
}
