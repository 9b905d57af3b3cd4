//! API configuration loaded from the environment.
//!
//! One knob: the base URL of the tutorial collection. Unset or blank falls
//! back to `/api` (the deployment proxies the backend under the same host).

const BASE_URL_ENV: &str = "TUTODASH_API_BASE_URL";
const DEFAULT_BASE_URL: &str = "/api";

/// Where the REST backend lives.
///
/// | Env | Default | Description |
/// |-----|---------|-------------|
/// | TUTODASH_API_BASE_URL | `/api` | Collection base URL; trailing `/` stripped. |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    /// Load from environment. Unset, blank, or whitespace-only => default.
    pub fn from_env() -> Self {
        Self::from_value(std::env::var(BASE_URL_ENV).ok())
    }

    fn from_value(raw: Option<String>) -> Self {
        let base_url = raw
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self { base_url }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_value(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_falls_back_to_default() {
        assert_eq!(ApiConfig::from_value(None).base_url, "/api");
    }

    #[test]
    fn blank_falls_back_to_default() {
        assert_eq!(ApiConfig::from_value(Some("   ".to_string())).base_url, "/api");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let cfg = ApiConfig::from_value(Some("http://localhost:8080/api/".to_string()));
        assert_eq!(cfg.base_url, "http://localhost:8080/api");
    }

    #[test]
    fn value_is_trimmed() {
        let cfg = ApiConfig::from_value(Some("  http://localhost:8080/api  ".to_string()));
        assert_eq!(cfg.base_url, "http://localhost:8080/api");
    }
}
