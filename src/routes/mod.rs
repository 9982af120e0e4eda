use actix_web::middleware::DefaultHeaders;
use actix_web::{HttpRequest, HttpResponse, Responder, get, web};

use crate::UNKNOWN_CLIENT;
use crate::dto::suppliers::SubmissionRejected;

pub mod suppliers;

/// Registers every route of the service; shared between `main` and the
/// endpoint tests so both run the same routing table.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health)
        .service(suppliers::submit_supplier)
        .service(suppliers::suppliers_preflight);
}

/// CORS headers attached to every response. The form is served from a
/// different origin, so the endpoint answers with a wildcard policy.
pub fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add(("Access-Control-Allow-Methods", "POST, OPTIONS"))
        .add((
            "Access-Control-Allow-Headers",
            "authorization, apikey, content-type",
        ))
}

/// JSON extractor configuration: bumps the default payload limit (uploads
/// arrive base64-encoded inside the body) and keeps the error body in the
/// same shape as every other rejection.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(100 * 1024 * 1024)
        .error_handler(|err, _req| {
            let body = SubmissionRejected::message("Invalid request body");
            actix_web::error::InternalError::from_response(
                err,
                HttpResponse::BadRequest().json(body),
            )
            .into()
        })
}

/// Client identifier used for rate limiting.
///
/// Takes the first comma-separated value of the forwarded-address header
/// set by the reverse proxy; header-less clients all share the
/// [`UNKNOWN_CLIENT`] bucket.
pub fn client_id(req: &HttpRequest) -> String {
    req.headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(UNKNOWN_CLIENT)
        .to_string()
}

#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;

    use super::*;

    #[test]
    fn client_id_takes_first_forwarded_value() {
        let req = TestRequest::default()
            .insert_header(("X-Forwarded-For", "203.0.113.7, 10.0.0.1"))
            .to_http_request();
        assert_eq!(client_id(&req), "203.0.113.7");
    }

    #[test]
    fn missing_or_blank_header_falls_back_to_unknown() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(client_id(&req), UNKNOWN_CLIENT);

        let req = TestRequest::default()
            .insert_header(("X-Forwarded-For", "   "))
            .to_http_request();
        assert_eq!(client_id(&req), UNKNOWN_CLIENT);
    }
}
