use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::model::transfer::Warehouse;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateTransferRequest {
    #[validate(custom(function = "not_blank", message = "SKU is required"))]
    pub sku: String,

    #[validate(custom(function = "known_origin"))]
    pub origin: Warehouse,

    #[validate(custom(function = "known_destination"))]
    pub destination: Warehouse,

    #[validate(custom(function = "not_blank", message = "Sender name is required"))]
    pub sender_name: String,

    #[validate(range(min = 1, message = "Box count must be at least 1"))]
    pub box_count: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
pub struct ReceiveTransferRequest {
    #[validate(custom(function = "not_blank", message = "Receiver name is required"))]
    pub receiver_name: String,

    #[validate(range(min = 0, message = "Received count cannot be negative"))]
    pub received_box_count: i32,
}

/// Whitespace-only text counts as missing.
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn known_origin(warehouse: &Warehouse) -> Result<(), ValidationError> {
    if warehouse.is_origin() {
        return Ok(());
    }
    let mut err = ValidationError::new("origin");
    err.message = Some(format!("{warehouse} is not a departing warehouse").into());
    Err(err)
}

fn known_destination(warehouse: &Warehouse) -> Result<(), ValidationError> {
    if warehouse.is_destination() {
        return Ok(());
    }
    let mut err = ValidationError::new("destination");
    err.message = Some(format!("{warehouse} is not a receiving warehouse").into());
    Err(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn send_form() -> CreateTransferRequest {
        CreateTransferRequest {
            sku: "X1".to_string(),
            origin: Warehouse::Wh3,
            destination: Warehouse::Wh1,
            sender_name: "Alice".to_string(),
            box_count: 5,
        }
    }

    #[test]
    fn valid_send_form_passes() {
        assert!(send_form().validate().is_ok());
    }

    #[test]
    fn blank_sku_and_sender_are_rejected() {
        let form = CreateTransferRequest {
            sku: "   ".to_string(),
            sender_name: String::new(),
            ..send_form()
        };

        let errors = form.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("sku"));
        assert!(fields.contains_key("sender_name"));
    }

    #[test]
    fn zero_boxes_are_rejected() {
        let form = CreateTransferRequest {
            box_count: 0,
            ..send_form()
        };

        assert!(form.validate().unwrap_err().field_errors().contains_key("box_count"));
    }

    #[test]
    fn origin_must_be_a_departing_warehouse() {
        let form = CreateTransferRequest {
            origin: Warehouse::Wh1,
            destination: Warehouse::Wh3,
            ..send_form()
        };

        let errors = form.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("origin"));
        assert!(fields.contains_key("destination"));
    }

    #[test]
    fn receive_form_allows_zero_but_not_blank_names() {
        let ok = ReceiveTransferRequest {
            receiver_name: "Bob".to_string(),
            received_box_count: 0,
        };
        assert!(ok.validate().is_ok());

        let blank = ReceiveTransferRequest {
            receiver_name: " ".to_string(),
            received_box_count: 3,
        };
        assert!(blank
            .validate()
            .unwrap_err()
            .field_errors()
            .contains_key("receiver_name"));
    }
}
