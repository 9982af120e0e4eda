//! Inspection of uploaded file payloads.
//!
//! Files arrive embedded in the JSON body as self-describing
//! `data:<mime>;base64,<bytes>` blobs. Declared size and MIME type are
//! checked against the slot's allow-list before any bytes are decoded.

use std::fmt::{Display, Formatter};

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;

use crate::MAX_UPLOAD_BYTES;

/// MIME types accepted for logo and product-image uploads.
pub const IMAGE_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/webp",
    "image/gif",
];

/// MIME types accepted for the catalog file slot.
pub const CATALOG_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/webp",
    "image/gif",
    "application/pdf",
];

/// Named upload positions within a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Logo,
    /// Zero-based position within the product-images slot.
    ProductImage(usize),
    CatalogFile,
}

impl Slot {
    /// MIME allow-list for this slot.
    pub fn allowed_types(self) -> &'static [&'static str] {
        match self {
            Self::Logo | Self::ProductImage(_) => IMAGE_MIME_TYPES,
            Self::CatalogFile => CATALOG_MIME_TYPES,
        }
    }
}

impl Display for Slot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Logo => write!(f, "logo"),
            Self::ProductImage(index) => write!(f, "product image {}", index + 1),
            Self::CatalogFile => write!(f, "catalog file"),
        }
    }
}

/// Failures detected while inspecting or decoding an uploaded file.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AttachmentError {
    /// The payload is not a `data:<mime>;base64,<bytes>` blob.
    #[error("file for {slot} is not a valid upload payload")]
    MalformedPayload { slot: Slot },
    /// Decoded size would exceed [`MAX_UPLOAD_BYTES`].
    #[error("file for {slot} exceeds the 5 MB size limit")]
    SizeExceeded { slot: Slot },
    /// Declared MIME type is absent or not in the slot's allow-list.
    #[error("file type for {slot} is not allowed (allowed: {allowed})")]
    InvalidType { slot: Slot, allowed: String },
    /// The base64 payload could not be decoded.
    #[error("file for {slot} could not be decoded")]
    Decode { slot: Slot },
}

impl AttachmentError {
    pub fn slot(&self) -> Slot {
        match self {
            Self::MalformedPayload { slot }
            | Self::SizeExceeded { slot }
            | Self::InvalidType { slot, .. }
            | Self::Decode { slot } => *slot,
        }
    }
}

/// Wire shape for a single uploaded file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FilePayload {
    /// Self-describing `data:<mime>;base64,<bytes>` blob.
    pub data: String,
    /// Original filename as provided by the client.
    pub filename: String,
}

/// Wire shape for the multi-file product-images slot: equal-length arrays
/// of blobs and original filenames.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductImagesPayload {
    pub data: Vec<String>,
    pub filenames: Vec<String>,
}

/// An upload that passed the size and MIME checks, ready to decode.
#[derive(Debug, Clone)]
pub struct InspectedFile {
    slot: Slot,
    content_type: String,
    encoded: String,
    filename: String,
}

impl InspectedFile {
    /// Parse the self-describing blob and check it against the slot's
    /// limits. The size check runs before the MIME check, and both run
    /// before any base64 decoding.
    pub fn inspect(slot: Slot, payload: &FilePayload) -> Result<Self, AttachmentError> {
        let rest = payload
            .data
            .strip_prefix("data:")
            .ok_or(AttachmentError::MalformedPayload { slot })?;
        let (content_type, encoded) = rest
            .split_once(";base64,")
            .ok_or(AttachmentError::MalformedPayload { slot })?;

        // Decoded length is encoded length * 3/4.
        if encoded.len() * 3 / 4 > MAX_UPLOAD_BYTES {
            return Err(AttachmentError::SizeExceeded { slot });
        }

        let content_type = content_type.trim().to_ascii_lowercase();
        let allowed = slot.allowed_types();
        if !allowed.contains(&content_type.as_str()) {
            return Err(AttachmentError::InvalidType {
                slot,
                allowed: allowed.join(", "),
            });
        }

        Ok(Self {
            slot,
            content_type,
            encoded: encoded.to_string(),
            filename: payload.filename.clone(),
        })
    }

    pub fn slot(&self) -> Slot {
        self.slot
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Decode the payload into raw bytes for upload.
    pub fn decode(&self) -> Result<Vec<u8>, AttachmentError> {
        BASE64
            .decode(self.encoded.as_bytes())
            .map_err(|_| AttachmentError::Decode { slot: self.slot })
    }

    /// Storage key for this file: millisecond prefix (plus slot index for
    /// multi-file slots) followed by the sanitized original filename.
    pub fn storage_key(&self) -> String {
        let millis = Utc::now().timestamp_millis();
        let name = sanitize_filename(&self.filename);
        match self.slot {
            Slot::ProductImage(index) => format!("{millis}-{index}_{name}"),
            _ => format!("{millis}_{name}"),
        }
    }
}

/// Replace every character outside `[A-Za-z0-9.-]` with an underscore.
///
/// Idempotent: sanitizing an already-sanitized name is a no-op.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
