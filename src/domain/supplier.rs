use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CatalogKind, SupplierId, SupplierStatus};

/// Where a supplier's product catalog comes from.
///
/// Exactly one variant is populated per submission; the three shapes are
/// mutually exclusive on the wire and in storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum CatalogSource {
    /// Free-text catalog description entered in the form.
    Text(String),
    /// Uploaded catalog file, stored in the blob store.
    File { url: String },
    /// Externally hosted catalog link carried through verbatim.
    DriveLink(String),
}

impl CatalogSource {
    pub fn kind(&self) -> CatalogKind {
        match self {
            Self::Text(_) => CatalogKind::Text,
            Self::File { .. } => CatalogKind::File,
            Self::DriveLink(_) => CatalogKind::DriveLink,
        }
    }

    /// The persisted payload for this catalog shape.
    pub fn value(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::File { url } => url,
            Self::DriveLink(link) => link,
        }
    }
}

/// A registered supplier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
    pub id: SupplierId,
    pub business_name: String,
    /// Registered company number, if the business has one.
    pub company_number: Option<String>,
    pub contact_name: String,
    pub phone: String,
    pub email: String,
    pub about: String,
    pub categories: Vec<String>,
    pub activity_areas: Vec<String>,
    pub website: Option<String>,
    pub instagram: Option<String>,
    pub address: String,
    pub logo_url: Option<String>,
    pub product_image_urls: Vec<String>,
    pub catalog: Option<CatalogSource>,
    pub status: SupplierStatus,
    pub created_at: NaiveDateTime,
}

/// Information required to persist a new [`Supplier`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewSupplier {
    pub business_name: String,
    pub company_number: Option<String>,
    pub contact_name: String,
    pub phone: String,
    pub email: String,
    pub about: String,
    pub categories: Vec<String>,
    pub activity_areas: Vec<String>,
    pub website: Option<String>,
    pub instagram: Option<String>,
    pub address: String,
    pub logo_url: Option<String>,
    pub product_image_urls: Vec<String>,
    pub catalog: Option<CatalogSource>,
    pub status: SupplierStatus,
    pub created_at: NaiveDateTime,
}
