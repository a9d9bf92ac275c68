//! # `GET /health` の本文
//!
//! ```
//! use upkoding_shared::HealthResponse;
//!
//! let body = serde_json::to_value(HealthResponse::healthy("0.1.0")).unwrap();
//! assert_eq!(body, serde_json::json!({ "status": "healthy", "version": "0.1.0" }));
//! ```

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status:  HealthStatus,
    /// ビルドしたクレートのバージョン
    pub version: String,
}

impl HealthResponse {
    pub fn healthy(version: impl Into<String>) -> Self {
        Self {
            status:  HealthStatus::Healthy,
            version: version.into(),
        }
    }
}
