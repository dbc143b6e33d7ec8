//! Glue utilities for a retrieval-augmented document Q&A service.
//!
//! Two independent, stateless pieces, both invoked per request by the
//! surrounding service:
//!
//! - [`presign::rewrite_result_uris`] rewrites S3-backed `DocumentURI`
//!   values in a search-result payload into pre-signed download links.
//! - [`llm::AnswerService`] renders a backend-specific prompt from retrieved
//!   documents and forwards it to the configured text-generation backend.

pub mod config;
pub mod errors;
pub mod llm;
pub mod logging;
pub mod presign;
pub mod storage;

pub use config::AppConfig;
pub use errors::{AnswerError, StorageError};
pub use llm::{AnswerRequest, AnswerService, RetrievedDocument};
pub use presign::rewrite_result_uris;
pub use storage::{ObjectStore, S3Store};
