use std::time::Duration;

use url::Url;

use crate::EngineError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Where the knowledge service lives and how long to wait for it.
#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Upstream base; `/api/*` paths are resolved beneath it.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            // Scraping fetches every source before answering.
            request_timeout: Duration::from_secs(120),
        }
    }
}

impl ApiSettings {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Resolves the endpoint URLs, keeping any path prefix of the base.
    pub fn endpoints(&self) -> Result<Endpoints, EngineError> {
        let invalid = |message: String| EngineError::InvalidBaseUrl {
            url: self.base_url.clone(),
            message,
        };

        let mut base = Url::parse(self.base_url.trim()).map_err(|err| invalid(err.to_string()))?;
        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            return Err(invalid("expected an http(s) url".to_string()));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.set_query(None);
        base.set_fragment(None);

        let join = |path: &str| base.join(path).map_err(|err| invalid(err.to_string()));
        Ok(Endpoints {
            scrape: join("api/scrape")?,
            question: join("api/question")?,
            health: join("api/health")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub scrape: Url,
    pub question: Url,
    pub health: Url,
}

/// Bounds applied by the coordinator around each client call.
#[derive(Debug, Clone)]
pub struct CoordinatorSettings {
    pub operation_timeout: Duration,
}

impl Default for CoordinatorSettings {
    fn default() -> Self {
        Self {
            operation_timeout: Duration::from_secs(150),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_resolve_under_host() {
        let endpoints = ApiSettings::with_base_url("http://localhost:8000")
            .endpoints()
            .unwrap();
        assert_eq!(endpoints.scrape.as_str(), "http://localhost:8000/api/scrape");
        assert_eq!(endpoints.question.as_str(), "http://localhost:8000/api/question");
        assert_eq!(endpoints.health.as_str(), "http://localhost:8000/api/health");
    }

    #[test]
    fn endpoints_keep_path_prefix() {
        let endpoints = ApiSettings::with_base_url("https://example.com/rag?x=1")
            .endpoints()
            .unwrap();
        assert_eq!(endpoints.scrape.as_str(), "https://example.com/rag/api/scrape");
    }

    #[test]
    fn non_http_base_is_rejected() {
        for base in ["mailto:someone@example.com", "ftp://example.com", "not a url"] {
            let err = ApiSettings::with_base_url(base).endpoints().unwrap_err();
            assert!(matches!(err, EngineError::InvalidBaseUrl { .. }), "{base}");
        }
    }
}
