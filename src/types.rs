use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use tiny_http::Response;

pub type HttpResponse = Response<Cursor<Vec<u8>>>;

pub const HEALTH_OPERATIONAL: &str = "operational";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

impl HealthResponse {
    pub fn operational() -> Self {
        Self {
            status: HEALTH_OPERATIONAL.to_string(),
            // 2026-10-16T09:30:00.000Z
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
