use super::types::*;
use crate::{Error, Result, config::UpstreamConfig};
use async_openai::{Client, config::OpenAIConfig, error::OpenAIError, types as openai_types};
use async_trait::async_trait;
use backoff::{ExponentialBackoff, ExponentialBackoffBuilder};
use std::time::Duration;
use tracing::{debug, error};

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn describe_image(&self, request: VisionRequest) -> Result<VisionReply>;
}

pub struct OpenAiClient {
    client: Client<OpenAIConfig>,
    timeout_secs: u64,
}

impl OpenAiClient {
    pub fn new(config: &UpstreamConfig, api_key: &str) -> Result<Self> {
        let mut openai_config = OpenAIConfig::new().with_api_key(api_key);

        if !config.base_url.is_empty() {
            openai_config = openai_config.with_api_base(&config.base_url);
        }

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        let client = Client::with_config(openai_config)
            .with_http_client(http_client)
            .with_backoff(single_attempt());

        Ok(Self {
            client,
            timeout_secs: config.timeout_secs,
        })
    }

    fn classify(&self, err: OpenAIError) -> Error {
        match err {
            OpenAIError::Reqwest(e) if e.is_timeout() => Error::UpstreamTimeout {
                secs: self.timeout_secs,
            },
            other => Error::upstream(other.to_string()),
        }
    }
}

/// async-openai retries rate limits and 5xx by default; a guess makes
/// exactly one attempt.
fn single_attempt() -> ExponentialBackoff {
    ExponentialBackoffBuilder::new()
        .with_max_elapsed_time(Some(Duration::ZERO))
        .build()
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn describe_image(&self, request: VisionRequest) -> Result<VisionReply> {
        debug!(
            "Sending image of {} bytes to model {}",
            request.image_url.len(),
            request.model
        );

        let message = request.to_openai_message()?;

        let mut request_builder = openai_types::CreateChatCompletionRequestArgs::default();
        request_builder
            .model(&request.model)
            .messages(vec![message])
            .temperature(request.temperature);

        #[allow(deprecated)]
        request_builder.max_tokens(request.max_tokens);

        let openai_request = request_builder
            .build()
            .map_err(|e| Error::internal(format!("Failed to build request: {}", e)))?;

        let response = match self.client.chat().create(openai_request).await {
            Ok(response) => response,
            Err(e) => {
                error!("Vision API error: {}", e);
                return Err(self.classify(e));
            }
        };

        debug!(
            "Received chat completion response with {} choices",
            response.choices.len()
        );

        let choice = response.choices.into_iter().next();
        let finish_reason = choice
            .as_ref()
            .and_then(|c| c.finish_reason.as_ref().map(|fr| format!("{fr:?}")));
        let content = choice.and_then(|c| c.message.content);

        let usage = response.usage.map(|u| Usage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        Ok(VisionReply {
            content,
            model: response.model,
            finish_reason,
            usage,
        })
    }
}
