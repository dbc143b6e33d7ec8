//! Self-hosted backend: a rinna-family model served from a SageMaker
//! endpoint. The model is newline-sensitive, so the wire format replaces
//! newlines with a `<NL>` sentinel in both directions.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use super::sagemaker::InferenceClient;
use super::types::{AnswerRequest, RetrievedDocument};
use super::AnswerBackend;
use crate::errors::AnswerError;

const PROMPT_TEMPLATE: &str = "システム: システムは資料から抜粋して質問に答えます。資料にない内容は答えず「わかりません」と答えます。
    {context}

\t上記の資料に基づき以下の質問について資料から抜粋して解答を行います。
\t資料にない内容は答えず「わかりません」と答えます。
ユーザー: {question}
";

const NL_SENTINEL: &str = "<NL>";

/// Request/response codec for the rinna endpoint. Encoding and decoding
/// share the sentinel, so they live in one type.
struct NlCodec;

impl NlCodec {
    fn encode(&self, prompt: &str) -> Result<Vec<u8>, AnswerError> {
        let body = json!({
            "instruction": "",
            "input": prompt.replace('\n', NL_SENTINEL),
            "max_new_tokens": 256,
            "temperature": 0.3,
            "do_sample": true,
            // token ids fixed by the rinna model family
            "pad_token_id": 0,
            "bos_token_id": 2,
            "eos_token_id": 3,
        });
        serde_json::to_vec(&body).map_err(AnswerError::endpoint)
    }

    fn decode(&self, bytes: &[u8]) -> Result<String, AnswerError> {
        // the endpoint answers with a bare JSON string
        let text: String = serde_json::from_slice(bytes)
            .map_err(|err| AnswerError::MalformedResponse(err.to_string()))?;
        Ok(text.replace(NL_SENTINEL, "\n"))
    }
}

pub struct RinnaBackend {
    endpoint_name: String,
    client: Arc<dyn InferenceClient>,
    codec: NlCodec,
}

impl RinnaBackend {
    pub fn new(endpoint_name: String, client: Arc<dyn InferenceClient>) -> Self {
        Self {
            endpoint_name,
            client,
            codec: NlCodec,
        }
    }
}

#[async_trait]
impl AnswerBackend for RinnaBackend {
    fn name(&self) -> &str {
        "rinna"
    }

    async fn answer(&self, request: &AnswerRequest) -> Result<String, AnswerError> {
        let context = make_context(&request.documents);
        let prompt = PROMPT_TEMPLATE
            .replace("{context}", &context)
            .replace("{question}", &request.user_utterance);
        tracing::debug!("prompt: {}", prompt);

        let body = self.codec.encode(&prompt)?;
        let response = self
            .client
            .invoke(&self.endpoint_name, body, "application/json")
            .await?;
        self.codec.decode(&response)
    }
}

/// Title and excerpt per document, tab-indented under the instruction block.
fn make_context(documents: &[RetrievedDocument]) -> String {
    let mut context = String::new();
    for doc in documents {
        context.push_str(&format!("\t{}\n\t\t抜粋: {}\n", doc.title, doc.excerpt));
    }
    context
}
