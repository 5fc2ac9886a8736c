//! Typed patient record model for the medireg registry.
//!
//! The registry keeps a small set of patient records keyed by a normalized
//! phone number. This crate defines the record shape and the two key types
//! used to address a record:
//!
//! - [`Phone`]: the primary key, normalized by stripping spaces and hyphens
//! - [`HospitalId`]: an opaque `HSP-XXXXXXXX` identifier assigned once
//!
//! ```
//! use medireg_model::{Gender, HospitalId, PatientFields, PatientRecord, Phone};
//!
//! let phone = Phone::parse("555-000-1111").unwrap();
//! assert_eq!(phone.as_str(), "5550001111");
//!
//! let fields = PatientFields {
//!     name: "Jane Doe".into(),
//!     age: 34,
//!     gender: Gender::Female,
//!     phone,
//!     address: "1 Main St".into(),
//! };
//! let record = PatientRecord::new(HospitalId::generate(), fields);
//! assert!(record.hospital_id.as_str().starts_with("HSP-"));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

/// Hospital ID generation and lookup normalization.
pub mod hospital_id;
/// Patient record and its field types.
pub mod patient;
/// Phone number normalization, the record key.
pub mod phone;

pub use hospital_id::{HospitalId, HOSPITAL_ID_PREFIX};
pub use patient::{Gender, ParseGenderError, PatientFields, PatientRecord, MAX_AGE, MIN_AGE};
pub use phone::{normalize_phone, Phone, PhoneError};
