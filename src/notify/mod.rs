//! Submission notifications.
//!
//! Two messages go out after a supplier record is persisted: an HTML
//! summary to the fixed internal recipient list, and a confirmation to the
//! submitter. Bodies are rendered through Tera templates with autoescape
//! on, so free-text fields cannot inject markup into the email.

use std::sync::Arc;

use async_trait::async_trait;
use tera::{Context, Tera};
use thiserror::Error;

use crate::domain::supplier::Supplier;

pub mod smtp;

pub use smtp::SmtpMailer;

/// Failures while rendering or sending notification email.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("template error: {0}")]
    Template(#[from] tera::Error),
    #[error("invalid recipient address: {0}")]
    InvalidAddress(String),
    #[error("mail transport error: {0}")]
    Transport(String),
}

/// Low-level mail transport seam, so notification composition can be
/// tested without an SMTP server.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &[String], subject: &str, html: String) -> Result<(), NotifyError>;
}

/// Notifier collaborator used by the submission pipeline.
#[async_trait]
pub trait SupplierNotifier: Send + Sync {
    /// Send the submission summary to the internal recipient list.
    async fn notify_internal(&self, supplier: &Supplier) -> Result<(), NotifyError>;
    /// Send the confirmation message to the submitter's own address.
    async fn notify_submitter(&self, supplier: &Supplier) -> Result<(), NotifyError>;
}

/// Tera instance with the bundled email templates registered.
///
/// Templates are compiled in, so the binary has no runtime dependency on a
/// templates directory.
pub fn email_templates() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_template(
        "emails/internal.html",
        include_str!("../../templates/emails/internal.html"),
    )?;
    tera.add_raw_template(
        "emails/confirmation.html",
        include_str!("../../templates/emails/confirmation.html"),
    )?;
    Ok(tera)
}

/// Renders and sends both notification emails over a [`Mailer`].
pub struct EmailNotifier {
    mailer: Arc<dyn Mailer>,
    tera: Tera,
    internal_recipients: Vec<String>,
}

impl EmailNotifier {
    pub fn new(
        mailer: Arc<dyn Mailer>,
        internal_recipients: Vec<String>,
    ) -> Result<Self, NotifyError> {
        Ok(Self {
            mailer,
            tera: email_templates()?,
            internal_recipients,
        })
    }

    fn context(supplier: &Supplier) -> Context {
        let mut context = Context::new();
        context.insert("supplier_id", &supplier.id.get());
        context.insert("business_name", &supplier.business_name);
        context.insert("company_number", &supplier.company_number);
        context.insert("contact_name", &supplier.contact_name);
        context.insert("phone", &supplier.phone);
        context.insert("email", &supplier.email);
        context.insert("about", &supplier.about);
        context.insert("categories", &supplier.categories);
        context.insert("activity_areas", &supplier.activity_areas);
        context.insert("website", &supplier.website);
        context.insert("instagram", &supplier.instagram);
        context.insert("address", &supplier.address);
        context.insert("logo_url", &supplier.logo_url);
        context.insert("product_image_urls", &supplier.product_image_urls);
        context.insert(
            "catalog_kind",
            &supplier.catalog.as_ref().map(|c| c.kind().as_str()),
        );
        context.insert("catalog_value", &supplier.catalog.as_ref().map(|c| c.value()));
        context.insert(
            "submitted_at",
            &supplier.created_at.format("%Y-%m-%d %H:%M").to_string(),
        );
        context
    }
}

#[async_trait]
impl SupplierNotifier for EmailNotifier {
    async fn notify_internal(&self, supplier: &Supplier) -> Result<(), NotifyError> {
        let html = self
            .tera
            .render("emails/internal.html", &Self::context(supplier))?;
        let subject = format!("New supplier registration: {}", supplier.business_name);
        self.mailer
            .send(&self.internal_recipients, &subject, html)
            .await
    }

    async fn notify_submitter(&self, supplier: &Supplier) -> Result<(), NotifyError> {
        let html = self
            .tera
            .render("emails/confirmation.html", &Self::context(supplier))?;
        self.mailer
            .send(
                std::slice::from_ref(&supplier.email),
                "We received your registration",
                html,
            )
            .await
    }
}
