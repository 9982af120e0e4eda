use chrono::NaiveDateTime;
use diesel::prelude::*;
use thiserror::Error;

use crate::domain::supplier::{CatalogSource, NewSupplier as DomainNewSupplier, Supplier as DomainSupplier};
use crate::domain::types::{CatalogKind, SupplierId, SupplierStatus, TypeConstraintError};

/// Diesel representation of a supplier row.
///
/// List-valued fields (categories, activity areas, product image URLs) are
/// stored as JSON arrays in text columns; the catalog union is flattened
/// into a `(kind, value)` pair.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::suppliers)]
pub struct Supplier {
    pub id: i32,
    pub business_name: String,
    pub company_number: Option<String>,
    pub contact_name: String,
    pub phone: String,
    pub email: String,
    pub about: String,
    pub categories: String,
    pub activity_areas: String,
    pub website: Option<String>,
    pub instagram: Option<String>,
    pub address: String,
    pub logo_url: Option<String>,
    pub product_image_urls: String,
    pub catalog_kind: Option<String>,
    pub catalog_value: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
}

/// Insertable supplier row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::suppliers)]
pub struct NewSupplier {
    pub business_name: String,
    pub company_number: Option<String>,
    pub contact_name: String,
    pub phone: String,
    pub email: String,
    pub about: String,
    pub categories: String,
    pub activity_areas: String,
    pub website: Option<String>,
    pub instagram: Option<String>,
    pub address: String,
    pub logo_url: Option<String>,
    pub product_image_urls: String,
    pub catalog_kind: Option<String>,
    pub catalog_value: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
}

/// Failures mapping between supplier rows and domain values.
#[derive(Debug, Error)]
pub enum SupplierRowError {
    #[error("invalid JSON column: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Constraint(#[from] TypeConstraintError),
    #[error("catalog kind present without a value")]
    MissingCatalogValue,
}

impl TryFrom<Supplier> for DomainSupplier {
    type Error = SupplierRowError;

    fn try_from(row: Supplier) -> Result<Self, Self::Error> {
        let catalog = match (row.catalog_kind.as_deref(), row.catalog_value) {
            (None, _) => None,
            (Some(_), None) => return Err(SupplierRowError::MissingCatalogValue),
            (Some(kind), Some(value)) => Some(match CatalogKind::try_from(kind)? {
                CatalogKind::Text => CatalogSource::Text(value),
                CatalogKind::File => CatalogSource::File { url: value },
                CatalogKind::DriveLink => CatalogSource::DriveLink(value),
            }),
        };

        Ok(DomainSupplier {
            id: SupplierId::new(row.id)?,
            business_name: row.business_name,
            company_number: row.company_number,
            contact_name: row.contact_name,
            phone: row.phone,
            email: row.email,
            about: row.about,
            categories: serde_json::from_str(&row.categories)?,
            activity_areas: serde_json::from_str(&row.activity_areas)?,
            website: row.website,
            instagram: row.instagram,
            address: row.address,
            logo_url: row.logo_url,
            product_image_urls: serde_json::from_str(&row.product_image_urls)?,
            catalog,
            status: SupplierStatus::try_from(row.status)?,
            created_at: row.created_at,
        })
    }
}

impl TryFrom<&DomainNewSupplier> for NewSupplier {
    type Error = SupplierRowError;

    fn try_from(supplier: &DomainNewSupplier) -> Result<Self, Self::Error> {
        Ok(Self {
            business_name: supplier.business_name.clone(),
            company_number: supplier.company_number.clone(),
            contact_name: supplier.contact_name.clone(),
            phone: supplier.phone.clone(),
            email: supplier.email.clone(),
            about: supplier.about.clone(),
            categories: serde_json::to_string(&supplier.categories)?,
            activity_areas: serde_json::to_string(&supplier.activity_areas)?,
            website: supplier.website.clone(),
            instagram: supplier.instagram.clone(),
            address: supplier.address.clone(),
            logo_url: supplier.logo_url.clone(),
            product_image_urls: serde_json::to_string(&supplier.product_image_urls)?,
            catalog_kind: supplier.catalog.as_ref().map(|c| c.kind().as_str().to_string()),
            catalog_value: supplier.catalog.as_ref().map(|c| c.value().to_string()),
            status: supplier.status.as_str().to_string(),
            created_at: supplier.created_at,
        })
    }
}
