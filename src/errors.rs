use thiserror::Error;

/// Failures from the object-storage seam.
///
/// The rewriter swallows `MissingCredentials` (the unsigned URI is still
/// returned to the caller); everything else propagates.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage credentials unavailable")]
    MissingCredentials,
    #[error("presign request failed: {0}")]
    Presign(String),
}

impl StorageError {
    pub fn presign<E: std::fmt::Display>(err: E) -> Self {
        StorageError::Presign(err.to_string())
    }
}

/// Failures from the answer-generation seam.
#[derive(Debug, Error)]
pub enum AnswerError {
    #[error("unsupported LLM backend: {0}")]
    UnsupportedBackend(String),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("inference endpoint error: {0}")]
    Endpoint(String),
    #[error("chat backend error: {0}")]
    Chat(String),
    #[error("malformed backend response: {0}")]
    MalformedResponse(String),
}

impl AnswerError {
    pub fn endpoint<E: std::fmt::Display>(err: E) -> Self {
        AnswerError::Endpoint(err.to_string())
    }

    pub fn chat<E: std::fmt::Display>(err: E) -> Self {
        AnswerError::Chat(err.to_string())
    }
}
