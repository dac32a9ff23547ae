use super::{
    prompt,
    reply::parse_reply,
    types::{GuessRequest, GuessResult},
};
use crate::{
    Error, Result,
    access::verify_access_code,
    config::{ACCESS_CODE_ENV, API_KEY_ENV, Config, UpstreamConfig},
    llm::{LlmClient, OpenAiClient, VisionRequest},
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Validates one guess request and asks the vision model about it.
///
/// Holds nothing that changes between requests, so a single instance is
/// shared by every connection.
pub struct GuessRelay {
    access_code: Option<String>,
    upstream: UpstreamConfig,
    llm: Option<Arc<dyn LlmClient>>,
}

impl GuessRelay {
    pub fn new(
        access_code: Option<String>,
        upstream: UpstreamConfig,
        llm: Option<Arc<dyn LlmClient>>,
    ) -> Self {
        Self {
            access_code,
            upstream,
            llm,
        }
    }

    /// Builds the relay from loaded configuration. Missing secrets are
    /// warned about here and reported on every request.
    pub fn from_config(config: &Config) -> Result<Self> {
        if config.secrets.access_code.is_none() {
            warn!("{} is not set; every guess will be rejected", ACCESS_CODE_ENV);
        }

        let llm: Option<Arc<dyn LlmClient>> = match config.secrets.api_key.as_deref() {
            Some(api_key) => Some(Arc::new(OpenAiClient::new(&config.upstream, api_key)?)),
            None => {
                warn!("{} is not set; every guess will be rejected", API_KEY_ENV);
                None
            }
        };

        Ok(Self::new(
            config.secrets.access_code.clone(),
            config.upstream.clone(),
            llm,
        ))
    }

    /// Fails when no access code is configured. Checked before anything
    /// about the request is looked at.
    pub fn ensure_configured(&self) -> Result<&str> {
        self.access_code
            .as_deref()
            .ok_or(Error::MissingAccessCodeSecret)
    }

    pub async fn guess(&self, request: GuessRequest) -> Result<GuessResult> {
        let configured = self.ensure_configured()?;

        if !verify_access_code(configured, request.access_code()) {
            return Err(Error::InvalidAccessCode);
        }

        let image = request
            .image()
            .filter(|image| !image.is_empty())
            .ok_or(Error::MissingImage)?
            .to_string();

        let llm = self.llm.as_ref().ok_or(Error::MissingApiKey)?;

        let vision_request = VisionRequest {
            model: self.upstream.model.clone(),
            prompt: prompt::resolve(self.upstream.prompt.as_deref()).to_string(),
            image_url: image,
            temperature: self.upstream.temperature,
            max_tokens: self.upstream.max_tokens,
        };

        let reply = llm.describe_image(vision_request).await?;

        let content = reply
            .content
            .filter(|content| !content.is_empty())
            .ok_or(Error::EmptyReply)?;

        debug!(
            model = %reply.model,
            finish_reason = ?reply.finish_reason,
            usage = ?reply.usage,
            "Model replied: {}",
            content
        );

        parse_reply(&content)
    }
}
