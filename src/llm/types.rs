use crate::{Error, Result};
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestMessageContentPartImage,
    ChatCompletionRequestMessageContentPartText, ChatCompletionRequestUserMessageArgs,
    ChatCompletionRequestUserMessageContent, ChatCompletionRequestUserMessageContentPart,
    ImageUrl,
};

/// One image plus instruction, sent as a single user turn.
#[derive(Debug, Clone)]
pub struct VisionRequest {
    pub model: String,
    pub prompt: String,
    /// Data URI or remote URL of the image.
    pub image_url: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Default)]
pub struct VisionReply {
    /// Text of the first choice, if the model produced any.
    pub content: Option<String>,
    pub model: String,
    pub finish_reason: Option<String>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl VisionRequest {
    pub fn to_openai_message(&self) -> Result<ChatCompletionRequestMessage> {
        let parts = vec![
            ChatCompletionRequestUserMessageContentPart::Text(
                ChatCompletionRequestMessageContentPartText {
                    text: self.prompt.clone(),
                },
            ),
            ChatCompletionRequestUserMessageContentPart::ImageUrl(
                ChatCompletionRequestMessageContentPartImage {
                    image_url: ImageUrl {
                        url: self.image_url.clone(),
                        detail: None,
                    },
                },
            ),
        ];

        let msg = ChatCompletionRequestUserMessageArgs::default()
            .content(ChatCompletionRequestUserMessageContent::Array(parts))
            .build()
            .map_err(|e| Error::internal(format!("Failed to build user message: {}", e)))?;

        Ok(msg.into())
    }
}
