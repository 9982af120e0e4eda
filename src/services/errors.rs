use thiserror::Error;

use crate::forms::suppliers::FieldError;

/// Error taxonomy for the submission pipeline.
///
/// Every failure is tagged at the point it is detected; the HTTP boundary
/// maps tags to statuses and safe messages without inspecting message text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// The client exceeded its submission budget for the current window.
    #[error("too many submissions")]
    RateLimited,
    /// One or more fields violated the submission schema.
    #[error("validation failed")]
    Validation(Vec<FieldError>),
    /// An uploaded file's decoded size exceeds the ceiling.
    #[error("file for {slot} exceeds the 5 MB size limit")]
    FileSizeExceeded { slot: String },
    /// An uploaded file's MIME type is not in the slot's allow-list.
    #[error("file type for {slot} is not allowed (allowed: {allowed})")]
    InvalidFileType { slot: String, allowed: String },
    /// An uploaded file was not a decodable `data:` payload.
    #[error("file for {slot} is not a valid upload payload")]
    MalformedFile { slot: String },
    /// The blob store rejected or failed an upload.
    #[error("failed to store file for {slot}")]
    Storage { slot: String },
    /// The supplier record could not be persisted.
    #[error("failed to persist the submission")]
    Persistence,
    /// Anything not covered by a more specific tag.
    #[error("internal error")]
    Internal,
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
