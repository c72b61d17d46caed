use std::future::Future;

use bytes::Bytes;

use crate::domain::common::entities::app_errors::CoreError;

/// Port for fetching uploaded scan images from object storage.
///
/// Upload negotiation (presigned URLs etc.) is handled outside this crate;
/// the detection pipeline only ever reads.
#[cfg_attr(test, mockall::automock)]
pub trait ObjectStoragePort: Send + Sync {
    fn get_object(
        &self,
        bucket: String,
        object_key: String,
    ) -> impl Future<Output = Result<Bytes, CoreError>> + Send;
}
