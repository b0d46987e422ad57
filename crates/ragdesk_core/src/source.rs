use std::collections::HashSet;

use url::Url;

use crate::ValidationError;

/// Answer text produced by the external service for one question.
pub type Answer = String;

/// Non-empty, ordered list of source identifiers to ingest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBatch {
    urls: Vec<String>,
}

impl SourceBatch {
    /// Builds a batch from individual entries, trimming each one and dropping
    /// blanks and duplicates. The first occurrence of a duplicate keeps its
    /// position.
    pub fn new<I, S>(entries: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let urls: Vec<String> = entries
            .into_iter()
            .filter_map(|entry| {
                let trimmed = entry.as_ref().trim();
                if trimmed.is_empty() {
                    return None;
                }
                seen.insert(normalize_url_for_dedupe(trimmed))
                    .then(|| trimmed.to_string())
            })
            .collect();

        if urls.is_empty() {
            return Err(ValidationError::EmptySources);
        }
        Ok(Self { urls })
    }

    /// Builds a batch from free text holding one identifier per line.
    pub fn from_text(raw: &str) -> Result<Self, ValidationError> {
        Self::new(raw.lines())
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

/// A question ready to be sent; never blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question(String);

impl Question {
    /// Accepts the text as typed, provided it is not blank.
    pub fn new(text: impl Into<String>) -> Result<Self, ValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyQuestion);
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Key used to collapse equivalent source identifiers.
///
/// Parseable URLs are compared with lowercase scheme and host, no fragment
/// and no trailing slash on the path. Anything else is compared exactly as
/// trimmed.
pub fn normalize_url_for_dedupe(raw: &str) -> String {
    let trimmed = raw.trim();
    match Url::parse(trimmed) {
        Ok(mut url) => {
            url.set_fragment(None);
            let mut normalized = url.to_string();
            if url.query().is_none() && normalized.ends_with('/') {
                normalized.pop();
            }
            normalized
        }
        Err(_) => trimmed.to_string(),
    }
}
