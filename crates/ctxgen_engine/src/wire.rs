//! JSON bodies exchanged with the generation service and the tracking collector.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequestBody {
    #[serde(rename = "repoUrl")]
    pub repo_url: String,
}

/// Only `filePath` is read; anything else in the reply is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenerateResponseBody {
    #[serde(rename = "filePath", default)]
    pub file_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingPayload {
    pub event: String,
    pub event_category: String,
    pub event_label: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub value: Option<i64>,
    pub sent_utc: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_repo_url_field() {
        let body = GenerateRequestBody {
            repo_url: "https://github.com/org/repo".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({ "repoUrl": "https://github.com/org/repo" })
        );
    }

    #[test]
    fn response_ignores_unknown_fields() {
        let body: GenerateResponseBody =
            serde_json::from_str(r#"{"filePath":"tmp/a/out.md","size":12}"#).unwrap();
        assert_eq!(body.file_path.as_deref(), Some("tmp/a/out.md"));
    }

    #[test]
    fn response_without_file_path_parses() {
        let body: GenerateResponseBody = serde_json::from_str(r#"{"status":"ok"}"#).unwrap();
        assert_eq!(body.file_path, None);

        let body: GenerateResponseBody = serde_json::from_str(r#"{"filePath":null}"#).unwrap();
        assert_eq!(body.file_path, None);
    }

    #[test]
    fn tracking_payload_omits_missing_value() {
        let payload = TrackingPayload {
            event: "generate_context".to_string(),
            event_category: "engagement".to_string(),
            event_label: "https://github.com/org/repo".to_string(),
            value: None,
            sent_utc: "2024-01-01T00:00:00Z".to_string(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("value").is_none());
        assert_eq!(json["event_category"], "engagement");
    }
}
