use std::future::Future;

use crate::domain::common::entities::app_errors::CoreError;

/// Client trait for calling generative AI models.
///
/// Both methods take a JSON response schema the model is asked to conform to;
/// the raw (string) model output is returned so callers can run their own
/// parse/validate pipeline on it.
#[cfg_attr(test, mockall::automock)]
pub trait LlmClient: Send + Sync {
    fn generate_with_image(
        &self,
        prompt: String,
        image_data: Vec<u8>,
        response_schema: serde_json::Value,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;

    fn generate_with_text(
        &self,
        prompt: String,
        response_schema: serde_json::Value,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}
