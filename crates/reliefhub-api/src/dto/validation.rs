//! Bridges `validator` failures into the API error shape.

use serde_json::json;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use reliefhub_core::error::AppError;
use reliefhub_core::result::AppResult;

/// Validate a request DTO, mapping failures to a 400 with the structured
/// list of `{field, message}` errors (nested fields use dotted paths).
pub fn validate<T: Validate>(value: &T) -> AppResult<()> {
    value.validate().map_err(|errors| {
        let mut fields = Vec::new();
        flatten("", &errors, &mut fields);
        AppError::validation("Validation failed").with_details(json!(fields))
    })
}

/// Recursively flatten nested validation errors into dotted field paths.
fn flatten(prefix: &str, errors: &ValidationErrors, out: &mut Vec<serde_json::Value>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for err in field_errors {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for '{path}'"));
                    out.push(json!({ "field": path, "message": message }));
                }
            }
            ValidationErrorsKind::Struct(nested) => flatten(&path, nested, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    flatten(&format!("{path}[{index}]"), nested, out);
                }
            }
        }
    }
}
