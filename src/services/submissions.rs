//! The submission pipeline.
//!
//! Orders the work for one registration attempt: rate-limit gate,
//! validation, per-file inspection and upload, record persistence, then
//! notifications. Steps run strictly in sequence; any failure up to and
//! including persistence aborts the submission, while notification
//! failures are logged and swallowed because the record is already
//! durable. Blobs uploaded before a failing step are not rolled back.

use chrono::Utc;

use crate::domain::supplier::{CatalogSource, NewSupplier};
use crate::domain::types::{SupplierId, SupplierStatus};
use crate::forms::attachments::{FilePayload, InspectedFile, Slot};
use crate::forms::suppliers::{CatalogPayload, SupplierForm};
use crate::notify::SupplierNotifier;
use crate::rate_limit::RateLimitStore;
use crate::repository::SupplierWriter;
use crate::storage::ObjectStorage;

use super::{ServiceError, ServiceResult};

/// Logical bucket for uploaded logos.
pub const LOGO_BUCKET: &str = "logos";
/// Logical bucket for uploaded product images.
pub const PRODUCT_BUCKET: &str = "products";
/// Logical bucket for uploaded catalog files.
pub const CATALOG_BUCKET: &str = "catalogs";

/// Process one registration attempt end to end and return the id of the
/// persisted supplier record.
pub async fn submit_supplier<R, S, N, L>(
    form: SupplierForm,
    client_id: &str,
    repo: &R,
    storage: &S,
    notifier: &N,
    limiter: &L,
) -> ServiceResult<SupplierId>
where
    R: SupplierWriter,
    S: ObjectStorage + ?Sized,
    N: SupplierNotifier + ?Sized,
    L: RateLimitStore + ?Sized,
{
    if !limiter.check_and_increment(client_id) {
        log::warn!("Rate-limited submission from {client_id}");
        return Err(ServiceError::RateLimited);
    }

    let submission = form.validate().map_err(ServiceError::Validation)?;

    let logo_url = match &submission.logo {
        Some(payload) => Some(upload_file(storage, LOGO_BUCKET, Slot::Logo, payload).await?),
        None => None,
    };

    // Uploads stay sequential so the stored URLs keep the input order.
    let mut product_image_urls = Vec::with_capacity(submission.product_images.len());
    for (index, payload) in submission.product_images.iter().enumerate() {
        let url = upload_file(storage, PRODUCT_BUCKET, Slot::ProductImage(index), payload).await?;
        product_image_urls.push(url);
    }

    let catalog = match &submission.catalog {
        None => None,
        Some(CatalogPayload::Text { content }) => Some(CatalogSource::Text(content.clone())),
        Some(CatalogPayload::DriveLink { url }) => Some(CatalogSource::DriveLink(url.clone())),
        Some(CatalogPayload::File { data, filename }) => {
            let payload = FilePayload {
                data: data.clone(),
                filename: filename.clone(),
            };
            let url = upload_file(storage, CATALOG_BUCKET, Slot::CatalogFile, &payload).await?;
            Some(CatalogSource::File { url })
        }
    };

    let record = NewSupplier {
        business_name: submission.business_name,
        company_number: submission.company_number,
        contact_name: submission.contact_name,
        phone: submission.phone,
        email: submission.email,
        about: submission.about,
        categories: submission.categories,
        activity_areas: submission.activity_areas,
        website: submission.website,
        instagram: submission.instagram,
        address: submission.address,
        logo_url,
        product_image_urls,
        catalog,
        status: SupplierStatus::Pending,
        created_at: Utc::now().naive_utc(),
    };

    // Single durability commit point: nothing before this is "saved".
    let supplier = repo.create_supplier(&record).map_err(|e| {
        log::error!("Failed to persist supplier submission: {e}");
        ServiceError::Persistence
    })?;

    if let Err(e) = notifier.notify_internal(&supplier).await {
        log::error!(
            "Failed to send internal notification for supplier {}: {e}",
            supplier.id
        );
    }
    if let Err(e) = notifier.notify_submitter(&supplier).await {
        log::error!("Failed to send confirmation to {}: {e}", supplier.email);
    }

    log::info!(
        "Registered supplier {} ({})",
        supplier.id,
        supplier.business_name
    );
    Ok(supplier.id)
}

/// Inspect, decode and store a single file, returning its public URL.
async fn upload_file<S>(
    storage: &S,
    bucket: &str,
    slot: Slot,
    payload: &FilePayload,
) -> ServiceResult<String>
where
    S: ObjectStorage + ?Sized,
{
    let inspected = InspectedFile::inspect(slot, payload)?;
    let bytes = inspected.decode()?;
    let key = inspected.storage_key();
    storage
        .upload(bucket, &key, bytes, inspected.content_type())
        .await
        .map_err(|e| {
            log::error!("Failed to store file for {slot}: {e}");
            ServiceError::Storage {
                slot: slot.to_string(),
            }
        })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD as BASE64;

    use super::*;
    use crate::domain::supplier::Supplier;
    use crate::forms::attachments::ProductImagesPayload;
    use crate::notify::{NotifyError, SupplierNotifier};
    use crate::rate_limit::InMemoryRateLimiter;
    use crate::repository::test::TestRepository;
    use crate::storage::test::MemoryStorage;

    #[derive(Default)]
    struct RecordingNotifier {
        internal: AtomicUsize,
        submitter: AtomicUsize,
        fail_internal: bool,
    }

    impl RecordingNotifier {
        fn failing_internal() -> Self {
            Self {
                fail_internal: true,
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl SupplierNotifier for RecordingNotifier {
        async fn notify_internal(&self, _supplier: &Supplier) -> Result<(), NotifyError> {
            self.internal.fetch_add(1, Ordering::SeqCst);
            if self.fail_internal {
                return Err(NotifyError::Transport("simulated outage".to_string()));
            }
            Ok(())
        }

        async fn notify_submitter(&self, _supplier: &Supplier) -> Result<(), NotifyError> {
            self.submitter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn limiter() -> InMemoryRateLimiter {
        InMemoryRateLimiter::new(3, std::time::Duration::from_secs(3600))
    }

    fn valid_form() -> SupplierForm {
        SupplierForm {
            business_name: "Olive & Thyme".to_string(),
            company_number: None,
            contact_name: "Dana Peretz".to_string(),
            phone: "+972-50-1234567".to_string(),
            email: "dana@example.com".to_string(),
            about: "Cold-pressed oils".to_string(),
            categories: vec!["food".to_string()],
            activity_areas: vec!["north".to_string()],
            website: None,
            instagram: None,
            address: "12 HaZait St, Tivon".to_string(),
            logo: None,
            product_images: None,
            catalog: None,
        }
    }

    fn image_payload(bytes: &[u8], filename: &str) -> FilePayload {
        FilePayload {
            data: format!("data:image/png;base64,{}", BASE64.encode(bytes)),
            filename: filename.to_string(),
        }
    }

    #[tokio::test]
    async fn valid_submission_without_files_persists_a_pending_record() {
        let repo = TestRepository::new();
        let storage = MemoryStorage::new();
        let notifier = RecordingNotifier::default();

        let id = submit_supplier(valid_form(), "10.0.0.1", &repo, &storage, &notifier, &limiter())
            .await
            .unwrap();

        assert_eq!(id.get(), 1);
        let stored = repo.latest().unwrap();
        assert_eq!(stored.status, SupplierStatus::Pending);
        assert!(stored.logo_url.is_none());
        assert!(stored.product_image_urls.is_empty());
        assert!(stored.catalog.is_none());
        assert!(storage.uploads().is_empty());
        assert_eq!(notifier.internal.load(Ordering::SeqCst), 1);
        assert_eq!(notifier.submitter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn oversized_logo_aborts_without_record_or_upload() {
        let repo = TestRepository::new();
        let storage = MemoryStorage::new();
        let notifier = RecordingNotifier::default();

        let mut form = valid_form();
        form.logo = Some(image_payload(&vec![0u8; 6 * 1024 * 1024], "logo.png"));

        let err = submit_supplier(form, "10.0.0.1", &repo, &storage, &notifier, &limiter())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ServiceError::FileSizeExceeded {
                slot: "logo".to_string()
            }
        );
        assert_eq!(repo.count(), 0);
        assert!(storage.uploads().is_empty());
        assert_eq!(notifier.internal.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn fourth_submission_in_window_is_rejected_before_any_work() {
        let repo = TestRepository::new();
        let storage = MemoryStorage::new();
        let notifier = RecordingNotifier::default();
        let limiter = limiter();

        for _ in 0..3 {
            submit_supplier(valid_form(), "10.0.0.1", &repo, &storage, &notifier, &limiter)
                .await
                .unwrap();
        }

        // The fourth attempt is invalid on top of being rate limited; the
        // gate must fire first, so no validation errors surface.
        let err = submit_supplier(
            SupplierForm::default(),
            "10.0.0.1",
            &repo,
            &storage,
            &notifier,
            &limiter,
        )
        .await
        .unwrap_err();

        assert_eq!(err, ServiceError::RateLimited);
        assert_eq!(repo.count(), 3);
    }

    #[tokio::test]
    async fn internal_notification_failure_does_not_fail_the_request() {
        let repo = TestRepository::new();
        let storage = MemoryStorage::new();
        let notifier = RecordingNotifier::failing_internal();

        let id = submit_supplier(valid_form(), "10.0.0.1", &repo, &storage, &notifier, &limiter())
            .await
            .unwrap();

        assert_eq!(id.get(), 1);
        assert_eq!(repo.count(), 1);
        // The submitter confirmation is still attempted.
        assert_eq!(notifier.submitter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn product_image_urls_keep_input_order() {
        let repo = TestRepository::new();
        let storage = MemoryStorage::new();
        let notifier = RecordingNotifier::default();

        let mut form = valid_form();
        let images: Vec<FilePayload> = (0..3)
            .map(|i| image_payload(format!("img-{i}").as_bytes(), &format!("photo-{i}.png")))
            .collect();
        form.product_images = Some(ProductImagesPayload {
            data: images.iter().map(|p| p.data.clone()).collect(),
            filenames: images.iter().map(|p| p.filename.clone()).collect(),
        });

        submit_supplier(form, "10.0.0.1", &repo, &storage, &notifier, &limiter())
            .await
            .unwrap();

        let stored = repo.latest().unwrap();
        assert_eq!(stored.product_image_urls.len(), 3);
        for (index, url) in stored.product_image_urls.iter().enumerate() {
            assert!(url.contains(&format!("-{index}_photo-{index}.png")));
        }
        let uploads = storage.uploads();
        assert!(uploads.iter().all(|u| u.bucket == PRODUCT_BUCKET));
    }

    #[tokio::test]
    async fn bad_mime_on_second_image_aborts_after_first_upload() {
        let repo = TestRepository::new();
        let storage = MemoryStorage::new();
        let notifier = RecordingNotifier::default();

        let mut form = valid_form();
        form.product_images = Some(ProductImagesPayload {
            data: vec![
                image_payload(b"ok", "a.png").data,
                format!("data:application/zip;base64,{}", BASE64.encode(b"zip")),
            ],
            filenames: vec!["a.png".to_string(), "b.zip".to_string()],
        });

        let err = submit_supplier(form, "10.0.0.1", &repo, &storage, &notifier, &limiter())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::InvalidFileType { ref slot, .. } if slot == "product image 2"
        ));
        // No record, but the first image is already in the store and is
        // intentionally not retracted.
        assert_eq!(repo.count(), 0);
        assert_eq!(storage.uploads().len(), 1);
    }

    #[tokio::test]
    async fn catalog_file_uploads_and_link_carries_through() {
        let repo = TestRepository::new();
        let storage = MemoryStorage::new();
        let notifier = RecordingNotifier::default();
        let limiter = limiter();

        let mut form = valid_form();
        form.catalog = Some(CatalogPayload::File {
            data: format!("data:application/pdf;base64,{}", BASE64.encode(b"%PDF")),
            filename: "catalog.pdf".to_string(),
        });
        submit_supplier(form, "10.0.0.1", &repo, &storage, &notifier, &limiter)
            .await
            .unwrap();
        let stored = repo.latest().unwrap();
        match stored.catalog {
            Some(CatalogSource::File { ref url }) => {
                assert!(url.starts_with("memory://catalogs/"))
            }
            other => panic!("unexpected catalog: {other:?}"),
        }

        let mut form = valid_form();
        form.catalog = Some(CatalogPayload::DriveLink {
            url: "https://drive.example.com/d/abc".to_string(),
        });
        submit_supplier(form, "10.0.0.1", &repo, &storage, &notifier, &limiter)
            .await
            .unwrap();
        let stored = repo.latest().unwrap();
        assert_eq!(
            stored.catalog,
            Some(CatalogSource::DriveLink(
                "https://drive.example.com/d/abc".to_string()
            ))
        );
        // Only the catalog-file submission touched the store.
        assert_eq!(storage.uploads().len(), 1);
    }

    #[tokio::test]
    async fn storage_outage_aborts_with_no_record() {
        let repo = TestRepository::new();
        let storage = MemoryStorage::failing();
        let notifier = RecordingNotifier::default();

        let mut form = valid_form();
        form.logo = Some(image_payload(b"logo", "logo.png"));

        let err = submit_supplier(form, "10.0.0.1", &repo, &storage, &notifier, &limiter())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ServiceError::Storage {
                slot: "logo".to_string()
            }
        );
        assert_eq!(repo.count(), 0);
    }

    #[tokio::test]
    async fn persistence_failure_aborts_before_notifications() {
        let repo = TestRepository::failing();
        let storage = MemoryStorage::new();
        let notifier = RecordingNotifier::default();

        let err = submit_supplier(valid_form(), "10.0.0.1", &repo, &storage, &notifier, &limiter())
            .await
            .unwrap_err();

        assert_eq!(err, ServiceError::Persistence);
        assert_eq!(notifier.internal.load(Ordering::SeqCst), 0);
        assert_eq!(notifier.submitter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn invalid_form_reports_every_field_without_side_effects() {
        let repo = TestRepository::new();
        let storage = MemoryStorage::new();
        let notifier = RecordingNotifier::default();

        let err = submit_supplier(
            SupplierForm::default(),
            "10.0.0.1",
            &repo,
            &storage,
            &notifier,
            &limiter(),
        )
        .await
        .unwrap_err();

        match err {
            ServiceError::Validation(errors) => assert_eq!(errors.len(), 8),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(repo.count(), 0);
        assert!(storage.uploads().is_empty());
    }
}
