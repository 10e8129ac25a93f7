//! Cart type conversion functions.

use lookbook_core::CartId;

use crate::shopify::types::{Cart, CartUserError};

use super::super::queries::{CartSummaryFields, CartUserErrorFields};

pub fn convert_cart(cart: CartSummaryFields) -> Cart {
    Cart {
        id: CartId::new(cart.id),
        checkout_url: cart.checkout_url,
        total_quantity: cart.total_quantity,
    }
}

pub fn convert_user_errors(errors: Vec<CartUserErrorFields>) -> Vec<CartUserError> {
    errors
        .into_iter()
        .map(|e| CartUserError {
            code: e.code,
            field: e.field,
            message: e.message,
        })
        .collect()
}

/// Join user errors into one message, prefixing each with its input path.
pub fn format_user_errors(errors: &[CartUserError]) -> String {
    errors
        .iter()
        .map(|e| match &e.field {
            Some(field) if !field.is_empty() => format!("{}: {}", field.join("."), e.message),
            _ => e.message.clone(),
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_user_errors_with_field() {
        let errors = vec![
            CartUserError {
                code: Some("INVALID".to_string()),
                field: Some(vec!["lines".to_string(), "0".to_string(), "quantity".to_string()]),
                message: "must be positive".to_string(),
            },
            CartUserError {
                code: None,
                field: None,
                message: "cart is locked".to_string(),
            },
        ];
        assert_eq!(
            format_user_errors(&errors),
            "lines.0.quantity: must be positive; cart is locked"
        );
    }
}
