//! Hosted chat backend: Anthropic's Claude, reached over the Messages API.
//! Documents are indexed in the context so the model can cite `[n]`.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use super::types::{AnswerRequest, RetrievedDocument};
use super::AnswerBackend;
use crate::errors::AnswerError;

const PROMPT_TEMPLATE: &str = "資料:
{context}
上記の資料をもとに以下の質問に回答しなさい。[0]の形式で参考にした資料を示しなさい。また資料がないものは「わかりません」と答えなさい。
質問:
{question}";

const API_BASE: &str = "https://api.anthropic.com";
const API_VERSION: &str = "2023-06-01";
const DEFAULT_MODEL: &str = "claude-3-haiku-20240307";
const MAX_TOKENS: u32 = 1024;

/// Capability seam over the hosted chat service: send a rendered prompt,
/// get the generated text back.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, AnswerError>;
}

/// Anthropic-backed [`ChatClient`].
pub struct AnthropicClient {
    base_url: String,
    api_key: String,
    model: String,
    client: Client,
}

impl AnthropicClient {
    pub fn new(api_key: String) -> Self {
        Self {
            base_url: API_BASE.to_string(),
            api_key,
            model: DEFAULT_MODEL.to_string(),
            client: Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }
}

#[async_trait]
impl ChatClient for AnthropicClient {
    async fn complete(&self, prompt: &str) -> Result<String, AnswerError> {
        let url = format!("{}/v1/messages", self.base_url);

        let body = json!({
            "model": self.model,
            "max_tokens": MAX_TOKENS,
            "messages": [{ "role": "user", "content": prompt }],
        });

        let res = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(AnswerError::chat)?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(AnswerError::Chat(format!("{}: {}", status, text)));
        }

        let payload: Value = res.json().await.map_err(AnswerError::chat)?;
        payload["content"][0]["text"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| {
                AnswerError::MalformedResponse("no text block in chat response".to_string())
            })
    }
}

pub struct ClaudeBackend {
    client: Arc<dyn ChatClient>,
}

impl ClaudeBackend {
    pub fn new(client: Arc<dyn ChatClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AnswerBackend for ClaudeBackend {
    fn name(&self) -> &str {
        "claude"
    }

    async fn answer(&self, request: &AnswerRequest) -> Result<String, AnswerError> {
        let context = make_context(&request.documents);
        let prompt = PROMPT_TEMPLATE
            .replace("{context}", &context)
            .replace("{question}", &request.user_utterance);
        tracing::debug!("prompt: {}", prompt);

        self.client.complete(&prompt).await
    }
}

/// One `[index]title` line plus the excerpt per document; the zero-based
/// index is what the model cites.
fn make_context(documents: &[RetrievedDocument]) -> String {
    let mut context = String::new();
    for (doc_id, doc) in documents.iter().enumerate() {
        context.push_str(&format!("[{}]{}\n{}\n", doc_id, doc.title, doc.excerpt));
    }
    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct FakeChat {
        prompts: Mutex<Vec<String>>,
    }

    impl FakeChat {
        fn new() -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ChatClient for FakeChat {
        async fn complete(&self, prompt: &str) -> Result<String, AnswerError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok("締め切りは毎月25日です。[0]".to_string())
        }
    }

    fn docs(n: usize) -> Vec<RetrievedDocument> {
        (0..n)
            .map(|i| RetrievedDocument {
                title: format!("資料{}", i),
                excerpt: format!("本文{}", i),
            })
            .collect()
    }

    #[test]
    fn context_prefixes_each_document_with_its_index() {
        let context = make_context(&docs(3));
        assert!(context.contains("[0]資料0\n本文0\n"));
        assert!(context.contains("[1]資料1\n本文1\n"));
        assert!(context.contains("[2]資料2\n本文2\n"));
    }

    #[tokio::test]
    async fn answer_renders_prompt_and_returns_backend_text() {
        let chat = Arc::new(FakeChat::new());
        let backend = ClaudeBackend::new(chat.clone());

        let request = AnswerRequest {
            user_utterance: "締め切りは？".to_string(),
            documents: docs(2),
        };
        let answer = backend.answer(&request).await.unwrap();
        assert_eq!(answer, "締め切りは毎月25日です。[0]");

        let prompts = chat.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("[0]資料0"));
        assert!(prompts[0].contains("[1]資料1"));
        assert!(prompts[0].contains("締め切りは？"));
        assert!(prompts[0].contains("「わかりません」"));
    }
}
