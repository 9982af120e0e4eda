//! Error conversion glue between layers.
//!
//! The domain and forms layers must not depend on service/repository error
//! types, so the cross-layer `From` impls live here.

use crate::forms::attachments::AttachmentError;
use crate::models::supplier::SupplierRowError;
use crate::repository::RepositoryError;
use crate::services::ServiceError;

impl From<AttachmentError> for ServiceError {
    fn from(err: AttachmentError) -> Self {
        let slot = err.slot().to_string();
        match err {
            AttachmentError::SizeExceeded { .. } => ServiceError::FileSizeExceeded { slot },
            AttachmentError::InvalidType { allowed, .. } => {
                ServiceError::InvalidFileType { slot, allowed }
            }
            AttachmentError::MalformedPayload { .. } | AttachmentError::Decode { .. } => {
                ServiceError::MalformedFile { slot }
            }
        }
    }
}

impl From<SupplierRowError> for RepositoryError {
    fn from(err: SupplierRowError) -> Self {
        RepositoryError::Corrupted(err.to_string())
    }
}
