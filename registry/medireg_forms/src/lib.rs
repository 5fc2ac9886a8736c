//! Form handling for the medireg registry.
//!
//! Raw user input arrives as [`PatientForm`], [`UpdateForm`] or
//! [`LookupQuery`]. [`FormController`] validates it, talks to a borrowed
//! [`medireg_store::RecordStore`], and turns store failures into
//! user-facing [`FormError`]s. It keeps no state of its own between calls.
//!
//! ```
//! use medireg_forms::{FormController, LookupMode, LookupQuery, PatientForm};
//! use medireg_store::MemoryStore;
//!
//! let mut store = MemoryStore::new();
//! let mut forms = FormController::new(&mut store);
//!
//! let form = PatientForm {
//!     name: "Jane Doe".into(),
//!     age: 34,
//!     gender: "Female".into(),
//!     phone: "555-000-1111".into(),
//!     address: "1 Main St".into(),
//! };
//! let record = forms.register(&form).unwrap();
//!
//! let found = forms
//!     .lookup(&LookupQuery::new(LookupMode::ByPhone, "5550001111"))
//!     .unwrap();
//! assert_eq!(found.hospital_id, record.hospital_id);
//! ```

#![warn(missing_docs)]

/// Register, lookup, update and stats over a [`medireg_store::RecordStore`].
pub mod controller;
/// Errors reported back to the form user.
pub mod error;
/// Raw form input and field validation.
pub mod form;

pub use controller::{FormController, Stats, UpdateOutcome, RECENT_LIMIT};
pub use error::FormError;
pub use form::{
    Field, FieldError, FieldErrorKind, LookupMode, LookupQuery, PatientForm, UpdateForm,
    ValidationErrors,
};
