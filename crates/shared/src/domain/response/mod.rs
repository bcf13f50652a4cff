use crate::utils::AppError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::ValidationErrors;

pub mod transfer;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub status: String,
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
            data,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
        }
    }
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        let message = match error {
            AppError::SqlxError(_) => "Database error occurred".to_string(),
            AppError::StoreError(ref e) => format!("Transfer table is malformed: {e}"),
            AppError::NotFound(ref msg) => msg.clone(),
            AppError::AlreadyReceived(_) => error.to_string(),
            AppError::ValidationError(ref errors) => validation_message(errors),
            AppError::InternalError(ref msg) => msg.clone(),
        };

        ErrorResponse::error(message)
    }
}

/// Flattens field errors into one line, e.g. `sku: SKU is required`.
fn validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let parts: Vec<String> = fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => format!("{field}: {message}"),
                None => format!("{field}: {}", e.code),
            })
        })
        .collect();

    if parts.is_empty() {
        "Validation error".to_string()
    } else {
        parts.join(", ")
    }
}
