//! Validation of raw supplier registration payloads.
//!
//! [`SupplierForm`] mirrors the JSON body the public form submits. A single
//! validation pass trims every string field and collects one [`FieldError`]
//! per violated field, so the client can highlight everything at once.

use serde::{Deserialize, Serialize};
use validator::{ValidateEmail, ValidateUrl};

use crate::MAX_PRODUCT_IMAGES;
use crate::forms::attachments::{FilePayload, ProductImagesPayload};

const MAX_BUSINESS_NAME: usize = 120;
const MAX_COMPANY_NUMBER: usize = 40;
const MAX_CONTACT_NAME: usize = 80;
const MAX_PHONE: usize = 30;
const MAX_EMAIL: usize = 120;
const MAX_ABOUT: usize = 2000;
const MAX_LIST_ENTRY: usize = 60;
const MAX_LIST_ENTRIES: usize = 20;
const MAX_WEBSITE: usize = 200;
const MAX_INSTAGRAM: usize = 200;
const MAX_ADDRESS: usize = 300;
const MAX_CATALOG_TEXT: usize = 2000;
const MAX_CATALOG_LINK: usize = 300;

/// One violated rule, keyed by the wire field path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Display label for a wire field path, used in error responses.
pub fn field_label(field: &str) -> &'static str {
    match field {
        "businessName" => "Business name",
        "companyNumber" => "Company number",
        "contactName" => "Contact name",
        "phone" => "Phone",
        "email" => "Email",
        "about" => "About the business",
        "categories" => "Categories",
        "activityAreas" => "Activity areas",
        "website" => "Website",
        "instagram" => "Instagram",
        "address" => "Main address",
        "logo" => "Logo",
        "productImages" => "Product images",
        "catalog" => "Product catalog",
        _ => "Field",
    }
}

/// Raw request payload for a supplier registration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SupplierForm {
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
    pub logo: Option<FilePayload>,
    pub product_images: Option<ProductImagesPayload>,
    pub catalog: Option<CatalogPayload>,
}

/// Catalog slot: exactly one of three shapes, tagged by `kind`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogPayload {
    Text { content: String },
    File { data: String, filename: String },
    DriveLink { url: String },
}

/// A submission that passed validation. All strings are trimmed; the
/// product-images arrays are zipped into per-file payloads.
#[derive(Debug, Clone)]
pub struct SupplierSubmission {
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
    pub logo: Option<FilePayload>,
    pub product_images: Vec<FilePayload>,
    pub catalog: Option<CatalogPayload>,
}

impl SupplierForm {
    /// Validate the raw payload, collecting every violated field.
    ///
    /// Each field contributes at most one error; checks stop at the first
    /// violated rule for that field.
    pub fn validate(self) -> Result<SupplierSubmission, Vec<FieldError>> {
        let mut errors = Vec::new();

        let business_name =
            required_text(&mut errors, "businessName", &self.business_name, MAX_BUSINESS_NAME);
        let company_number = optional_text(
            &mut errors,
            "companyNumber",
            self.company_number.as_deref(),
            MAX_COMPANY_NUMBER,
        );
        let contact_name =
            required_text(&mut errors, "contactName", &self.contact_name, MAX_CONTACT_NAME);
        let phone = required_text(&mut errors, "phone", &self.phone, MAX_PHONE);
        let email = self.email.trim().to_string();
        if email.is_empty() {
            errors.push(FieldError::new("email", "This field is required"));
        } else if email.len() > MAX_EMAIL {
            errors.push(FieldError::new(
                "email",
                format!("Must be at most {MAX_EMAIL} characters"),
            ));
        } else if !email.as_str().validate_email() {
            errors.push(FieldError::new("email", "Must be a valid email address"));
        }
        let about = required_text(&mut errors, "about", &self.about, MAX_ABOUT);
        let address = required_text(&mut errors, "address", &self.address, MAX_ADDRESS);

        let categories = string_list(&mut errors, "categories", &self.categories);
        let activity_areas = string_list(&mut errors, "activityAreas", &self.activity_areas);

        let website = match self.website.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            None => None,
            Some(url) if url.len() > MAX_WEBSITE => {
                errors.push(FieldError::new(
                    "website",
                    format!("Must be at most {MAX_WEBSITE} characters"),
                ));
                None
            }
            Some(url) if !url.validate_url() => {
                errors.push(FieldError::new("website", "Must be a valid URL"));
                None
            }
            Some(url) => Some(url.to_string()),
        };
        let instagram = optional_text(
            &mut errors,
            "instagram",
            self.instagram.as_deref(),
            MAX_INSTAGRAM,
        );

        let product_images = match &self.product_images {
            None => Vec::new(),
            Some(payload) => {
                if payload.data.len() != payload.filenames.len() {
                    errors.push(FieldError::new(
                        "productImages",
                        "Image data and filenames must have the same length",
                    ));
                    Vec::new()
                } else if payload.data.len() > MAX_PRODUCT_IMAGES {
                    errors.push(FieldError::new(
                        "productImages",
                        format!("At most {MAX_PRODUCT_IMAGES} images are allowed"),
                    ));
                    Vec::new()
                } else {
                    payload
                        .data
                        .iter()
                        .zip(&payload.filenames)
                        .map(|(data, filename)| FilePayload {
                            data: data.clone(),
                            filename: filename.clone(),
                        })
                        .collect()
                }
            }
        };

        let catalog = match self.catalog {
            None => None,
            Some(CatalogPayload::Text { content }) => {
                let content = content.trim().to_string();
                if content.is_empty() {
                    errors.push(FieldError::new("catalog", "Catalog text cannot be empty"));
                    None
                } else if content.len() > MAX_CATALOG_TEXT {
                    errors.push(FieldError::new(
                        "catalog",
                        format!("Catalog text must be at most {MAX_CATALOG_TEXT} characters"),
                    ));
                    None
                } else {
                    Some(CatalogPayload::Text { content })
                }
            }
            Some(CatalogPayload::DriveLink { url }) => {
                let url = url.trim().to_string();
                if url.is_empty() || url.len() > MAX_CATALOG_LINK || !url.as_str().validate_url() {
                    errors.push(FieldError::new("catalog", "Catalog link must be a valid URL"));
                    None
                } else {
                    Some(CatalogPayload::DriveLink { url })
                }
            }
            Some(CatalogPayload::File { data, filename }) => {
                if data.is_empty() || filename.trim().is_empty() {
                    errors.push(FieldError::new(
                        "catalog",
                        "Catalog file is missing its data or filename",
                    ));
                    None
                } else {
                    Some(CatalogPayload::File {
                        data,
                        filename: filename.trim().to_string(),
                    })
                }
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(SupplierSubmission {
            business_name,
            company_number,
            contact_name,
            phone,
            email,
            about,
            categories,
            activity_areas,
            website,
            instagram,
            address,
            logo: self.logo,
            product_images,
            catalog,
        })
    }
}

fn required_text(errors: &mut Vec<FieldError>, field: &str, value: &str, max: usize) -> String {
    let trimmed = value.trim().to_string();
    if trimmed.is_empty() {
        errors.push(FieldError::new(field, "This field is required"));
    } else if trimmed.len() > max {
        errors.push(FieldError::new(
            field,
            format!("Must be at most {max} characters"),
        ));
    }
    trimmed
}

fn optional_text(
    errors: &mut Vec<FieldError>,
    field: &str,
    value: Option<&str>,
    max: usize,
) -> Option<String> {
    let trimmed = value.map(str::trim).filter(|v| !v.is_empty())?;
    if trimmed.len() > max {
        errors.push(FieldError::new(
            field,
            format!("Must be at most {max} characters"),
        ));
    }
    Some(trimmed.to_string())
}

fn string_list(errors: &mut Vec<FieldError>, field: &str, values: &[String]) -> Vec<String> {
    let entries: Vec<String> = values
        .iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect();

    if entries.is_empty() {
        errors.push(FieldError::new(field, "Select at least one entry"));
    } else if entries.len() > MAX_LIST_ENTRIES {
        errors.push(FieldError::new(
            field,
            format!("At most {MAX_LIST_ENTRIES} entries are allowed"),
        ));
    } else if entries.iter().any(|v| v.len() > MAX_LIST_ENTRY) {
        errors.push(FieldError::new(
            field,
            format!("Entries must be at most {MAX_LIST_ENTRY} characters"),
        ));
    }

    entries
}
