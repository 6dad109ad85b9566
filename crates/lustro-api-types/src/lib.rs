//! Wire types shared between the Lustro server and API consumers.
//!
//! These mirror the JSON bodies of the public endpoints exactly; the server
//! crate re-exports them so integration tests and external clients agree on
//! the contract.

use serde::{Deserialize, Serialize};

/// Messaging platform a lead wants to be contacted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadPlatform {
    Instagram,
    Telegram,
}

impl LeadPlatform {
    pub fn as_str(self) -> &'static str {
        match self {
            LeadPlatform::Instagram => "instagram",
            LeadPlatform::Telegram => "telegram",
        }
    }
}

/// Request body for `POST /api/leads`.
///
/// `platform` is kept as a raw string so the server can reject unknown
/// values with a 400 instead of a deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub message: String,
}

/// Success body for `POST /api/leads` (HTTP 200).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadAccepted {
    pub success: bool,
    pub message: String,
}

/// Failure body for `POST /api/leads` (HTTP 4xx/5xx).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadRejected {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Response body for `GET /api/consent`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsentClassification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    /// One of `required`, `notification`, `none`.
    pub requirement: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lead_request_defaults_missing_fields_to_empty() {
        let parsed: LeadRequest = serde_json::from_str(r#"{"name":"Anna"}"#).unwrap();
        assert_eq!(parsed.name, "Anna");
        assert!(parsed.platform.is_empty());
        assert!(parsed.contact.is_empty());
        assert!(parsed.message.is_empty());
    }

    #[test]
    fn rejected_body_omits_absent_details() {
        let body = LeadRejected {
            error: "Invalid platform".into(),
            details: None,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"error":"Invalid platform"}"#
        );
    }

    #[test]
    fn platform_round_trips_snake_case() {
        let json = serde_json::to_string(&LeadPlatform::Instagram).unwrap();
        assert_eq!(json, r#""instagram""#);
        let back: LeadPlatform = serde_json::from_str(&json).unwrap();
        assert_eq!(back, LeadPlatform::Instagram);
    }
}
