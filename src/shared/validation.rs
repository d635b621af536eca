//! Validation Utilities

use validator::ValidationErrors;

use super::error::AppError;

/// Convert validation errors to AppError.
///
/// Each failing rule becomes one `"<field>: <message>"` entry, ordered by
/// field name so responses are stable.
pub fn validation_error(errors: ValidationErrors) -> AppError {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    let messages: Vec<String> = fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .clone()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Invalid value.".into());
                format!("{}: {}", field, message)
            })
        })
        .collect();

    if messages.is_empty() {
        return AppError::validation("Validation failed");
    }

    AppError::Validation(messages)
}
