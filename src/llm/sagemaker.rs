use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_sagemakerruntime::primitives::Blob;

use crate::errors::AnswerError;

/// Capability seam over the self-hosted inference service: send a request
/// body to a named endpoint, get the raw response body back.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    async fn invoke(
        &self,
        endpoint_name: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<Vec<u8>, AnswerError>;
}

/// SageMaker-runtime backed [`InferenceClient`].
#[derive(Clone)]
pub struct SageMakerClient {
    client: aws_sdk_sagemakerruntime::Client,
}

impl SageMakerClient {
    pub fn new(client: aws_sdk_sagemakerruntime::Client) -> Self {
        Self { client }
    }

    pub async fn from_region(region: &str) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;
        Self::new(aws_sdk_sagemakerruntime::Client::new(&config))
    }
}

#[async_trait]
impl InferenceClient for SageMakerClient {
    async fn invoke(
        &self,
        endpoint_name: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<Vec<u8>, AnswerError> {
        let output = self
            .client
            .invoke_endpoint()
            .endpoint_name(endpoint_name)
            .content_type(content_type)
            .accept(content_type)
            .body(Blob::new(body))
            .send()
            .await
            .map_err(AnswerError::endpoint)?;

        let body = output
            .body()
            .ok_or_else(|| AnswerError::MalformedResponse("empty endpoint body".to_string()))?;

        Ok(body.as_ref().to_vec())
    }
}
