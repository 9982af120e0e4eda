//! JSON response shapes for the submission endpoint.
//!
//! The client relies on these staying stable regardless of which pipeline
//! step failed.

use serde::Serialize;

use crate::forms::suppliers::{FieldError, field_label};

/// Body returned for an accepted submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionAccepted {
    pub success: bool,
    pub message: String,
    pub supplier_id: i32,
}

impl SubmissionAccepted {
    pub fn new(supplier_id: i32) -> Self {
        Self {
            success: true,
            message: "Registration received; our team will review it shortly".to_string(),
            supplier_id,
        }
    }
}

/// Per-field detail in a rejection body.
#[derive(Debug, Clone, Serialize)]
pub struct RejectedField {
    pub field: String,
    pub label: String,
    pub message: String,
}

/// Body returned when a submission is rejected at any step.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionRejected {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<RejectedField>,
}

impl SubmissionRejected {
    /// Rejection carrying only a top-level message.
    pub fn message(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            details: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Rejection carrying the full field-error list from validation.
    pub fn validation(errors: Vec<FieldError>) -> Self {
        let details = errors
            .iter()
            .map(|e| format!("{}: {}", field_label(&e.field), e.message))
            .collect();
        let fields = errors
            .into_iter()
            .map(|e| RejectedField {
                label: field_label(&e.field).to_string(),
                field: e.field,
                message: e.message,
            })
            .collect();
        Self {
            success: false,
            error: "Some fields need attention".to_string(),
            details,
            fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_body_pairs_fields_with_labels() {
        let body = SubmissionRejected::validation(vec![FieldError {
            field: "businessName".to_string(),
            message: "This field is required".to_string(),
        }]);

        assert!(!body.success);
        assert_eq!(body.fields.len(), 1);
        assert_eq!(body.fields[0].label, "Business name");
        assert_eq!(body.details[0], "Business name: This field is required");

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["fields"][0]["field"], "businessName");
    }

    #[test]
    fn message_body_omits_empty_detail_arrays() {
        let json = serde_json::to_value(SubmissionRejected::message("nope")).unwrap();
        assert!(json.get("details").is_none());
        assert!(json.get("fields").is_none());
    }

    #[test]
    fn accepted_body_uses_camel_case_id() {
        let json = serde_json::to_value(SubmissionAccepted::new(12)).unwrap();
        assert_eq!(json["supplierId"], 12);
        assert_eq!(json["success"], true);
    }
}
