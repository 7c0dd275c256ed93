use serde::{Deserialize, Serialize};

pub const API_PREFIX: [&str; 3] = ["api", "v1beta1", "distributions"];
pub const INVALIDATIONS_SEGMENT: &str = "invalidations";
pub const HEALTH_SEGMENT: &str = "healthz";

/// Catalog body. Names are validated one by one by the client.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DistributionsResponse {
    pub distributions: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct InvalidationRequest {
    pub paths: Vec<String>,
}

/// Body of a failed API call. Only `status` is meaningful to the console.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
}

/// Server-defined invalidation record. The console only displays it.
pub type InvalidationRecord = serde_json::Value;
