use actix_web::{HttpRequest, HttpResponse, Responder, post, route, web};

use crate::dto::suppliers::{SubmissionAccepted, SubmissionRejected};
use crate::forms::suppliers::SupplierForm;
use crate::notify::SupplierNotifier;
use crate::rate_limit::InMemoryRateLimiter;
use crate::repository::DieselRepository;
use crate::routes::client_id;
use crate::services::ServiceError;
use crate::services::submissions::submit_supplier as submit_supplier_service;
use crate::storage::ObjectStorage;

#[post("/suppliers")]
pub async fn submit_supplier(
    req: HttpRequest,
    form: web::Json<SupplierForm>,
    repo: web::Data<DieselRepository>,
    storage: web::Data<dyn ObjectStorage>,
    notifier: web::Data<dyn SupplierNotifier>,
    limiter: web::Data<InMemoryRateLimiter>,
) -> impl Responder {
    let client = client_id(&req);

    match submit_supplier_service(
        form.into_inner(),
        &client,
        repo.get_ref(),
        storage.get_ref(),
        notifier.get_ref(),
        limiter.get_ref(),
    )
    .await
    {
        Ok(id) => HttpResponse::Ok().json(SubmissionAccepted::new(id.get())),
        Err(ServiceError::RateLimited) => HttpResponse::TooManyRequests().json(
            SubmissionRejected::message("Too many submissions. Please try again later."),
        ),
        Err(ServiceError::Validation(errors)) => {
            HttpResponse::BadRequest().json(SubmissionRejected::validation(errors))
        }
        // Attachment rejections carry no internal detail, so their own
        // messages are safe to surface.
        Err(
            err @ (ServiceError::FileSizeExceeded { .. }
            | ServiceError::InvalidFileType { .. }
            | ServiceError::MalformedFile { .. }),
        ) => HttpResponse::BadRequest().json(SubmissionRejected::message(err.to_string())),
        Err(err) => {
            log::error!("Submission processing failed: {err}");
            HttpResponse::InternalServerError().json(SubmissionRejected::message(
                "Something went wrong. Please try again.",
            ))
        }
    }
}

#[route("/suppliers", method = "OPTIONS")]
pub async fn suppliers_preflight() -> impl Responder {
    HttpResponse::NoContent().finish()
}
