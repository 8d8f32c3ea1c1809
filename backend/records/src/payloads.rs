//! Request and response bodies of the recorder's HTTP surface.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ResponseRecord, iso_millis};

pub const HEALTH_OK: &str = "ok";

/// Body of `POST /yes`. Every field is optional.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct YesRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct YesResponse {
    pub success: bool,
    pub data: ResponseRecord,
    pub total_responses: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ResponsesPayload {
    pub count: usize,
    pub responses: Vec<ResponseRecord>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HealthPayload {
    pub status: String,
    /// Seconds since the recorder started.
    pub uptime: f64,
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
    pub total_responses: usize,
}
