//! HTTP executor
//!
//! Posts step sequences as JSON to a browser-tool relay and decodes the
//! per-step results it returns.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::browser::ActionStep;
use crate::core::config::ExecutorConfig;
use crate::core::{LandRecordsError, Result, StepResult};
use crate::executor::traits::StepExecutor;

/// Executor reached over plain JSON-over-HTTP
#[derive(Clone)]
pub struct HttpExecutor {
    client: Client,
    endpoint: String,
    api_token: Option<String>,
    tool: String,
}

/// Tool invocation request
#[derive(Debug, Serialize)]
struct InvokeRequest<'a> {
    tool: &'a str,
    input: &'a [ActionStep],
}

/// Tool invocation response
#[derive(Debug, Deserialize)]
struct InvokeResponse {
    steps: Vec<WireStep>,
}

/// One step's outcome as sent by the relay
#[derive(Debug, Deserialize)]
struct WireStep {
    #[serde(default)]
    index: Option<usize>,
    #[serde(default)]
    output: Option<serde_json::Value>,
}

impl WireStep {
    fn into_result(self, position: usize) -> StepResult {
        let output = match self.output {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::String(s)) => Some(s),
            // Structured payloads are kept in their serialized form
            Some(other) => Some(other.to_string()),
        };

        StepResult {
            step_index: self.index.unwrap_or(position),
            output,
        }
    }
}

impl HttpExecutor {
    /// Create an executor from configuration
    pub fn from_config(config: &ExecutorConfig) -> Result<Self> {
        let endpoint = config
            .endpoint
            .clone()
            .ok_or(LandRecordsError::ExecutorNotConfigured)?;

        if config.timeout_secs == 0 {
            return Err(LandRecordsError::config(
                "Executor timeout must be a positive number of seconds",
            ));
        }

        url::Url::parse(&endpoint).map_err(|e| {
            LandRecordsError::config(format!("Invalid executor endpoint '{}': {}", endpoint, e))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint,
            api_token: config.api_token.clone(),
            tool: config.tool.clone(),
        })
    }

    /// Create an executor for an endpoint with default settings
    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self> {
        Self::from_config(&ExecutorConfig {
            endpoint: Some(endpoint.into()),
            api_token: None,
            tool: "browser".to_string(),
            timeout_secs: 120,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl StepExecutor for HttpExecutor {
    async fn execute(&self, steps: &[ActionStep]) -> Result<Vec<StepResult>> {
        let request = InvokeRequest {
            tool: &self.tool,
            input: steps,
        };

        tracing::debug!(
            endpoint = %self.endpoint,
            tool = %self.tool,
            steps = steps.len(),
            "submitting step sequence"
        );

        let mut builder = self.client.post(&self.endpoint).json(&request);
        if let Some(token) = &self.api_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_connect() {
                LandRecordsError::executor(format!(
                    "Cannot connect to executor at {}. Is it running?",
                    self.endpoint
                ))
            } else if e.is_timeout() {
                LandRecordsError::executor(format!("Executor at {} timed out", self.endpoint))
            } else {
                LandRecordsError::from(e)
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(LandRecordsError::executor(format!(
                "Executor API error ({}): {}",
                status, error_text
            )));
        }

        let body = response.text().await?;
        let decoded: InvokeResponse = serde_json::from_str(&body).map_err(|e| {
            LandRecordsError::executor(format!("Unexpected executor response: {}", e))
        })?;

        let results: Vec<StepResult> = decoded
            .steps
            .into_iter()
            .enumerate()
            .map(|(i, step)| step.into_result(i))
            .collect();

        tracing::debug!(results = results.len(), "executor returned step results");

        Ok(results)
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_endpoint() {
        let config = ExecutorConfig {
            endpoint: None,
            api_token: None,
            tool: "browser".to_string(),
            timeout_secs: 5,
        };
        assert!(matches!(
            HttpExecutor::from_config(&config),
            Err(LandRecordsError::ExecutorNotConfigured)
        ));
    }

    #[test]
    fn test_rejects_bad_endpoint() {
        assert!(matches!(
            HttpExecutor::with_endpoint("relay without scheme"),
            Err(LandRecordsError::Config(_))
        ));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let config = ExecutorConfig {
            endpoint: Some("http://127.0.0.1:9000/invoke".to_string()),
            api_token: None,
            tool: "browser".to_string(),
            timeout_secs: 0,
        };
        assert!(matches!(
            HttpExecutor::from_config(&config),
            Err(LandRecordsError::Config(_))
        ));
    }

    #[test]
    fn test_response_without_steps_fails_to_decode() {
        assert!(serde_json::from_str::<InvokeResponse>(r#"{"error": "invalid api key"}"#).is_err());
        let empty: InvokeResponse = serde_json::from_str(r#"{"steps": []}"#).unwrap();
        assert!(empty.steps.is_empty());
    }

    #[test]
    fn test_wire_step_outputs() {
        let step: WireStep = serde_json::from_str(r#"{"output": {"outer_html": "<table/>"}}"#).unwrap();
        let result = step.into_result(4);
        assert_eq!(result.step_index, 4);
        assert_eq!(result.output.as_deref(), Some(r#"{"outer_html":"<table/>"}"#));

        let step: WireStep = serde_json::from_str(r#"{"index": 2, "output": null}"#).unwrap();
        assert_eq!(step.into_result(0), StepResult::empty(2));
    }

    #[test]
    fn test_request_shape() {
        let steps = vec![ActionStep::click("#go")];
        let request = InvokeRequest {
            tool: "browser",
            input: &steps,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"tool": "browser", "input": [{"click": {"selector": "#go"}}]})
        );
    }
}
