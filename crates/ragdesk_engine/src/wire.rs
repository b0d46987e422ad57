//! JSON bodies exchanged with the knowledge service.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct ScrapeRequest<'a> {
    pub urls: &'a [String],
}

#[derive(Debug, Serialize)]
pub(crate) struct QuestionRequest<'a> {
    pub question: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnswerResponse {
    pub answer: String,
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

/// Pulls a string `detail` out of an error body, if there is one.
///
/// Framework validation errors send `detail` as an array of objects; those
/// are treated as absent.
pub(crate) fn error_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("detail")?
        .as_str()
        .map(ToOwned::to_owned)
}

#[cfg(test)]
mod tests {
    use super::error_detail;

    #[test]
    fn detail_string_is_extracted() {
        assert_eq!(
            error_detail(r#"{"detail":"No content could be scraped"}"#),
            Some("No content could be scraped".to_string())
        );
    }

    #[test]
    fn non_string_or_missing_detail_is_absent() {
        assert_eq!(error_detail(r#"{"detail":[{"loc":["body","urls"]}]}"#), None);
        assert_eq!(error_detail(r#"{"error":"boom"}"#), None);
        assert_eq!(error_detail("Internal Server Error"), None);
        assert_eq!(error_detail(""), None);
    }
}
