use crate::config::{Config, STATIC_MAX_AGE_SECS};
use crate::error::{Result, SentinelError};
use crate::static_files::{self, StaticMatch, Validators};
use crate::types::{HealthResponse, HttpResponse};
use crate::utils::*;
use tiny_http::{Method, Request, Server};

pub const SERVER_FAULT_BODY: &str = "Quantum systems offline. Please try again.";

pub fn bind(config: &Config) -> Result<Server> {
    let addr = config.bind_addr();
    Server::http(&addr).map_err(|e| SentinelError::Bind {
        addr,
        reason: e.to_string(),
    })
}

/// Blocking request loop. Returns once the server is unblocked.
pub fn serve(server: &Server, config: &Config) {
    for request in server.incoming_requests() {
        handle_request(request, config);
    }
}

pub fn handle_request(request: Request, config: &Config) {
    let method = request.method().clone();
    let url = request.url().to_string();
    let if_none_match = header_value(&request, "If-None-Match");
    let if_modified_since = header_value(&request, "If-Modified-Since");
    let validators = Validators {
        if_none_match: if_none_match.as_deref(),
        if_modified_since: if_modified_since.as_deref(),
    };

    log::debug!("{} {}", method, url);

    let response = match route(&method, &url, validators, config) {
        Ok(response) => response,
        Err(e) => {
            log::error!("Quantum Sentinel error on {} {}: {}", method, url, e);
            server_fault()
        }
    };

    let response = match add_security_headers(response) {
        Ok(response) => response,
        Err(e) => {
            log::error!("Quantum Sentinel error on {} {}: {}", method, url, e);
            bare_server_fault()
        }
    };

    if let Err(e) = request.respond(response) {
        log::warn!("Failed to write response for {} {}: {}", method, url, e);
    }
}

fn header_value(request: &Request, name: &'static str) -> Option<String> {
    request
        .headers()
        .iter()
        .find(|h| h.field.equiv(name))
        .map(|h| h.value.as_str().to_string())
}

pub fn route(
    method: &Method,
    url: &str,
    validators: Validators<'_>,
    config: &Config,
) -> Result<HttpResponse> {
    let is_read = matches!(method, Method::Get | Method::Head);
    let path = url.split('?').next().unwrap_or("");

    if !is_read {
        return text_response(404, &format!("Cannot {} {}", method, path));
    }

    if path == "/health" {
        return handle_health();
    }

    match static_files::resolve(&config.public_dir, url) {
        StaticMatch::File(file) => {
            static_files::serve_file(&file, STATIC_MAX_AGE_SECS, validators)
        }
        StaticMatch::Redirect(location) => static_files::redirect(&location),
        StaticMatch::NotFound => handle_single_page(config, validators),
    }
}

fn handle_health() -> Result<HttpResponse> {
    json_response(200, &HealthResponse::operational())
}

// catch-all: the single page, revalidated on every load
fn handle_single_page(config: &Config, validators: Validators<'_>) -> Result<HttpResponse> {
    static_files::serve_file(&config.index_path(), 0, validators)
}

fn server_fault() -> HttpResponse {
    text_response(500, SERVER_FAULT_BODY).unwrap_or_else(|_| bare_server_fault())
}

fn bare_server_fault() -> HttpResponse {
    tiny_http::Response::from_data(SERVER_FAULT_BODY.as_bytes().to_vec()).with_status_code(500)
}
