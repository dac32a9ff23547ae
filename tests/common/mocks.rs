use async_trait::async_trait;
use sketch_guess::{
    Error, Result,
    llm::{LlmClient, VisionReply, VisionRequest},
};
use std::sync::{Arc, Mutex};

/// Mock vision client for testing
#[derive(Debug)]
pub struct MockLlmClient {
    pub replies: Arc<Mutex<Vec<VisionReply>>>,
    pub requests: Arc<Mutex<Vec<VisionRequest>>>,
    pub error: Option<String>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            error: None,
        }
    }

    /// Answers every request with the same text.
    pub fn with_text(self, text: &str) -> Self {
        self.with_reply(VisionReply {
            content: Some(text.to_string()),
            model: "Qwen/Qwen2-VL-72B-Instruct".to_string(),
            finish_reason: Some("Stop".to_string()),
            usage: None,
        })
    }

    pub fn with_reply(self, reply: VisionReply) -> Self {
        self.replies.lock().unwrap().push(reply);
        self
    }

    pub fn with_error(mut self, error: String) -> Self {
        self.error = Some(error);
        self
    }

    pub fn get_requests(&self) -> Vec<VisionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn describe_image(&self, request: VisionRequest) -> Result<VisionReply> {
        self.requests.lock().unwrap().push(request);

        if let Some(ref error) = self.error {
            return Err(Error::upstream(error.clone()));
        }

        let replies = self.replies.lock().unwrap();
        match replies.first() {
            Some(reply) => Ok(reply.clone()),
            None => Err(Error::upstream("No mock replies available")),
        }
    }
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new()
    }
}
