use thiserror::Error;

use crate::model::CustomerFormData;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reasons a customer form cannot be submitted.
pub enum CustomerFormError {
    /// Name is blank.
    #[error("Please enter the customer name.")]
    MissingName,
    /// Phone is blank.
    #[error("Please enter a phone number.")]
    MissingPhone,
}

/// Checks required fields in display order.
///
/// # Errors
///
/// Returns the first missing required field.
pub fn validate_customer(data: &CustomerFormData) -> Result<(), CustomerFormError> {
    if data.name.trim().is_empty() {
        return Err(CustomerFormError::MissingName);
    }
    if data.phone.trim().is_empty() {
        return Err(CustomerFormError::MissingPhone);
    }
    Ok(())
}
