use async_trait::async_trait;

/// A single text-completion request to the generation backend.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn new(prompt: String, max_tokens: u32, temperature: f32) -> Self {
        Self {
            prompt,
            max_tokens,
            temperature,
        }
    }
}

/// Adapter trait for the opaque text-generation collaborator.
///
/// Listing content generation treats the backend as a prompt-in, text-out
/// service; callers fall back to template generation when a request fails.
#[async_trait]
pub trait TextCompletion: Send + Sync {
    /// Run one completion and return the raw generated text.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}
