use medireg_model::Phone;
use medireg_store::StoreError;
use thiserror::Error;

use crate::form::ValidationErrors;

/// Outcome of a rejected form submission. None of these are fatal; each is
/// rendered back to the user as a message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// One or more fields failed validation.
    #[error("{0}")]
    Validation(ValidationErrors),
    /// A lookup phone number is malformed.
    #[error("Please enter a valid 10-digit phone number")]
    InvalidPhone,
    /// The phone number already belongs to another patient.
    #[error("A patient with this phone number is already registered!")]
    DuplicateKey(Phone),
    /// No patient matches the lookup or update key.
    #[error("Patient not found!")]
    NotFound,
}

impl From<StoreError> for FormError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateKey(phone) => FormError::DuplicateKey(phone),
            StoreError::NotFound(_) => FormError::NotFound,
        }
    }
}
