use crate::error::{PriceCheckError, PriceCheckResult};
use validator::{Validate, ValidationErrors};

pub fn validate_model<T: Validate>(model: &T) -> PriceCheckResult<()> {
    match model.validate() {
        Ok(()) => Ok(()),
        Err(errors) => Err(PriceCheckError::invalid_request(
            "body",
            format_validation_errors(&errors),
        )),
    }
}

pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| match &error.message {
                Some(message) => message.to_string(),
                None => format!("Validation failed for field '{}': {}", field, error.code),
            })
        })
        .collect();

    // field_errors() is a HashMap; keep the output stable
    messages.sort();
    messages.join(", ")
}
