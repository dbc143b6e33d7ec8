use std::time::Duration;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::presigning::PresigningConfig;

use crate::errors::StorageError;

/// Capability seam over the object store: hand out time-limited read URLs.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn presigned_get_url(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> Result<String, StorageError>;
}

/// S3-backed [`ObjectStore`].
#[derive(Clone)]
pub struct S3Store {
    client: aws_sdk_s3::Client,
}

impl S3Store {
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }

    /// Build a store from the default credential/region chain.
    pub async fn from_env() -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest()).load().await;
        Self::new(aws_sdk_s3::Client::new(&config))
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn presigned_get_url(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> Result<String, StorageError> {
        let presigning = PresigningConfig::expires_in(expires_in)
            .map_err(StorageError::presign)?;

        let request = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|err| match err {
                // The credential chain resolves while the request is being
                // constructed and signed; an empty chain surfaces here.
                SdkError::ConstructionFailure(_) => StorageError::MissingCredentials,
                other => StorageError::presign(other),
            })?;

        Ok(request.uri().to_string())
    }
}
