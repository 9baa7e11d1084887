//! # Validation Module
//!
//! Field presence checks run by the application commands before a record is
//! created or edited.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: UI form                                                      │
//! │  └── Immediate feedback ("Le nom du client ... sont obligatoires")     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: App command (Rust)                                           │
//! │  └── THIS MODULE: presence, positive quantity, non-negative amount     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Core types                                                            │
//! │  └── Stock clamps at zero, totals derive from items                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use boutique_core::validation::{validate_required, validate_quantity};
//!
//! assert!(validate_required("customer name", "Awa").is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::SaleItem;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates that a text field is present (non-blank).
///
/// ## Returns
/// The trimmed value.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(value.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a sold quantity (must be > 0).
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a price, stock level or expense amount (must be >= 0).
///
/// ## Example
/// ```rust
/// use boutique_core::validation::validate_non_negative;
///
/// assert!(validate_non_negative("price", 0).is_ok());
/// assert!(validate_non_negative("price", -100).is_err());
/// ```
pub fn validate_non_negative(field: &str, value: i64) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates the line items of a sale: at least one, each with qty > 0.
pub fn validate_sale_items(items: &[SaleItem]) -> ValidationResult<()> {
    if items.is_empty() {
        return Err(ValidationError::Empty {
            field: "items".to_string(),
        });
    }

    for item in items {
        validate_quantity(item.quantity)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required() {
        assert_eq!(validate_required("name", "  Riz ").unwrap(), "Riz");
        assert!(validate_required("name", "").is_err());
        assert!(validate_required("name", "   ").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative("amount", 0).is_ok());
        assert!(validate_non_negative("amount", 1500).is_ok());
        assert!(validate_non_negative("amount", -1).is_err());
    }

    #[test]
    fn test_validate_sale_items() {
        assert!(validate_sale_items(&[]).is_err());

        let item = SaleItem {
            product_id: "p1".to_string(),
            product_name: "Riz".to_string(),
            quantity: 0,
            price: 500,
        };
        assert!(validate_sale_items(&[item.clone()]).is_err());

        let item = SaleItem { quantity: 2, ..item };
        assert!(validate_sale_items(&[item]).is_ok());
    }
}
