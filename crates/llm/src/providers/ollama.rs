use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::provider::{LlmError, LlmProvider, SamplingOptions};

pub struct OllamaGenerator {
    client: reqwest::Client,
    url: String,
    model: String,
}

impl OllamaGenerator {
    pub fn new(url: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
            model,
        }
    }
}

/// Decoding options for the request body. Disabled sampling produces an
/// empty map so the backend keeps its own defaults.
fn options_map(sampling: &SamplingOptions) -> serde_json::Map<String, serde_json::Value> {
    let sampling = sampling.effective();
    let mut options = serde_json::Map::new();
    if let Some(temperature) = sampling.temperature {
        options.insert("temperature".to_string(), json!(temperature));
    }
    if let Some(top_p) = sampling.top_p {
        options.insert("top_p".to_string(), json!(top_p));
    }
    options
}

#[async_trait]
impl LlmProvider for OllamaGenerator {
    async fn complete(&self, prompt: &str, sampling: &SamplingOptions) -> Result<String, LlmError> {
        let url = format!("{}/api/generate", self.url);

        let body = json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
            "options": options_map(sampling),
        });

        debug!("Ollama request to {}", url);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api { status, body });
        }

        let resp: serde_json::Value = response.json().await?;
        let content = resp["response"]
            .as_str()
            .ok_or_else(|| LlmError::Parse("missing response field".into()))?
            .to_string();

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sampling_enabled_passes_both_params() {
        let options = options_map(&SamplingOptions::sampled(0.7, 0.9));
        assert_eq!(options.get("temperature"), Some(&json!(0.7f32)));
        assert_eq!(options.get("top_p"), Some(&json!(0.9f32)));
    }

    #[test]
    fn sampling_disabled_omits_params_entirely() {
        let options = options_map(&SamplingOptions::greedy());
        assert!(options.is_empty());

        // Even leftover values are dropped when do_sample is off.
        let stale = SamplingOptions {
            do_sample: false,
            temperature: Some(0.7),
            top_p: Some(0.9),
        };
        assert!(options_map(&stale).is_empty());
    }
}
