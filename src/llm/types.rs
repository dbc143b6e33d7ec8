use serde::{Deserialize, Serialize};

/// A document returned by the search service, reduced to what the prompt
/// templates need.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedDocument {
    pub title: String,
    pub excerpt: String,
}

/// One answer-generation request: the user's question plus the documents
/// retrieved for it, in ranking order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRequest {
    #[serde(alias = "userUtterance")]
    pub user_utterance: String,
    pub documents: Vec<RetrievedDocument>,
}
