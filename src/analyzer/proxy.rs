//! Proxy analyzer: forwards requests to the external Grok API
//!
//! One outbound `POST {base_url}/analyze` per inbound request, single
//! attempt, bounded by the configured timeout. Dropping the returned future
//! aborts the outbound call.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};

use super::{AnalysisBackend, AnalyzerError};
use crate::types::AnalysisResult;

/// Outbound request body.
#[derive(Debug, Serialize)]
struct ProxyPayload<'a> {
    prompt: &'a str,
    max_tokens: u32,
    temperature: f64,
    context: Option<&'a Map<String, Value>>,
}

/// Backend that delegates analysis to a remote Grok API.
#[derive(Debug, Clone)]
pub struct ProxyAnalyzer {
    base_url: String,
    timeout: Duration,
}

impl ProxyAnalyzer {
    /// Fails with [`AnalyzerError::Configuration`] if `api_url` is blank.
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self, AnalyzerError> {
        let api_url = api_url.trim();
        if api_url.is_empty() {
            return Err(AnalyzerError::Configuration(
                "GROK_API_URL must be set for proxy mode".to_string(),
            ));
        }

        let base_url = api_url.trim_end_matches('/').to_string();
        tracing::info!(api_url = %base_url, timeout_secs = timeout.as_secs(), "Proxy mode configured");

        Ok(Self { base_url, timeout })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self) -> String {
        format!("{}/analyze", self.base_url)
    }
}

#[async_trait]
impl AnalysisBackend for ProxyAnalyzer {
    async fn analyze(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f64,
        context: Option<&Map<String, Value>>,
    ) -> Result<AnalysisResult, AnalyzerError> {
        let payload = ProxyPayload {
            prompt,
            max_tokens,
            temperature,
            context,
        };

        // Scoped to this call; dropped on every return path.
        let http = reqwest::Client::builder().timeout(self.timeout).build()?;

        let start = Instant::now();
        let resp = http.post(self.endpoint()).json(&payload).send().await?;
        let status = resp.status();

        tracing::debug!(
            status = status.as_u16(),
            latency_ms = start.elapsed().as_millis(),
            "Received response from Grok API"
        );

        if !status.is_success() {
            // A body cut off mid-read is a transport failure, not an upstream one.
            let body = resp.text().await?;
            return Err(AnalyzerError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = resp.bytes().await?;
        let result: AnalysisResult = serde_json::from_slice(&bytes)
            .map_err(|e| AnalyzerError::InvalidResponse(e.to_string()))?;

        if !result.confidence_in_range() {
            return Err(AnalyzerError::InvalidResponse(format!(
                "confidence {} outside [0, 1]",
                result.confidence
            )));
        }

        Ok(result)
    }

    fn backend_name(&self) -> &'static str {
        "proxy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blank_url_is_configuration_error() {
        for url in ["", "   "] {
            let err = ProxyAnalyzer::new(url, Duration::from_secs(60)).unwrap_err();
            assert!(matches!(err, AnalyzerError::Configuration(_)));
            assert!(err.to_string().contains("GROK_API_URL"));
        }
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let proxy = ProxyAnalyzer::new("http://grok:9000/", Duration::from_secs(60)).expect("proxy");
        assert_eq!(proxy.base_url(), "http://grok:9000");
        assert_eq!(proxy.endpoint(), "http://grok:9000/analyze");
    }

    #[test]
    fn test_payload_shape() {
        let mut ctx = Map::new();
        ctx.insert("anomalies".to_string(), json!([]));
        let payload = ProxyPayload {
            prompt: "check",
            max_tokens: 500,
            temperature: 0.3,
            context: Some(&ctx),
        };
        let v = serde_json::to_value(&payload).expect("serialize");
        assert_eq!(
            v,
            json!({"prompt": "check", "max_tokens": 500, "temperature": 0.3, "context": {"anomalies": []}})
        );

        let bare = ProxyPayload {
            prompt: "check",
            max_tokens: 1,
            temperature: 0.0,
            context: None,
        };
        let v = serde_json::to_value(&bare).expect("serialize");
        assert!(v["context"].is_null());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        // Bind then release a port so nothing is listening on it.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);

        let proxy = ProxyAnalyzer::new(&format!("http://{addr}"), Duration::from_secs(2)).expect("proxy");
        let err = proxy.analyze("p", 10, 0.1, None).await.unwrap_err();
        assert!(matches!(err, AnalyzerError::Transport(_)), "got {err:?}");
        assert!(!err.is_startup_error());
    }
}
