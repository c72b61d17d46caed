use aws_sdk_s3::{
    Client,
    config::{BehaviorVersion, Credentials, Region},
};
use bytes::Bytes;
use tracing::instrument;

use crate::domain::common::ObjectStorageConfig;
use crate::domain::common::entities::app_errors::CoreError;
use crate::domain::storage::ports::ObjectStoragePort;

#[derive(Debug, Clone)]
pub struct S3ObjectStorage {
    client: Client,
}

impl S3ObjectStorage {
    pub fn new(config: ObjectStorageConfig) -> Self {
        let credentials = Credentials::new(
            config.access_key,
            config.secret_key,
            None,
            None,
            "ayeaye-storage",
        );

        let scheme = if config.use_ssl { "https" } else { "http" };
        let endpoint = config.endpoint.trim_end_matches('/');
        let endpoint_url = if endpoint.starts_with("http") {
            endpoint.to_string()
        } else {
            format!("{}://{}", scheme, endpoint)
        };

        let s3_config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region))
            .credentials_provider(credentials)
            .endpoint_url(endpoint_url)
            .force_path_style(true)
            .build();

        Self {
            client: Client::from_conf(s3_config),
        }
    }
}

impl ObjectStoragePort for S3ObjectStorage {
    #[instrument(skip(self))]
    async fn get_object(&self, bucket: String, object_key: String) -> Result<Bytes, CoreError> {
        let response = self
            .client
            .get_object()
            .bucket(&bucket)
            .key(&object_key)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    bucket = %bucket,
                    key = %object_key,
                    error = %e,
                    "failed to fetch object"
                );
                CoreError::ObjectStorageError(format!("Failed to fetch object: {}", e))
            })?;

        let data = response.body.collect().await.map_err(|e| {
            tracing::error!(
                bucket = %bucket,
                key = %object_key,
                error = %e,
                "failed to read object body"
            );
            CoreError::ObjectStorageError(format!("Failed to read object body: {}", e))
        })?;

        Ok(data.into_bytes())
    }
}
