//! Patient record storage.
//!
//! [`RecordStore`] is the contract the form layer talks to; [`MemoryStore`]
//! is the in-memory implementation that lives for one UI session.

#![warn(missing_docs)]

/// `Vec`-backed store with a phone index.
pub mod memory;

pub use memory::MemoryStore;

use medireg_model::{HospitalId, PatientFields, PatientRecord, Phone};
use thiserror::Error;

/// Why a store operation was refused. The store is unchanged in both cases.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The phone number already belongs to a record.
    #[error("a patient with phone number {0} is already registered")]
    DuplicateKey(Phone),
    /// No record is stored under the phone number.
    #[error("no patient is registered under phone number {0}")]
    NotFound(Phone),
}

/// Storage of patient records keyed by normalized phone number.
///
/// Implementations own their records exclusively. Phone numbers are unique
/// across all records and hospital IDs are never reassigned.
pub trait RecordStore {
    /// Adds `record`, failing if its phone number is already taken.
    fn insert(&mut self, record: PatientRecord) -> Result<(), StoreError>;

    /// The record stored under `phone`.
    fn find_by_phone(&self, phone: &Phone) -> Option<&PatientRecord>;

    /// The record carrying `hospital_id`, if any.
    fn find_by_id(&self, hospital_id: &HospitalId) -> Option<&PatientRecord>;

    /// Replaces the mutable fields of the record stored under `old_phone`.
    ///
    /// When `fields.phone` differs from `old_phone` the record is re-keyed:
    /// removed from the old key and reinserted at the new one, which makes it
    /// the most recent entry. The hospital ID always carries over.
    fn update(
        &mut self,
        old_phone: &Phone,
        fields: PatientFields,
    ) -> Result<&PatientRecord, StoreError>;

    /// Number of stored records.
    fn count(&self) -> usize;

    /// Up to `limit` records, most recently inserted first.
    fn recent(&self, limit: usize) -> Vec<&PatientRecord>;

    /// Whether any record carries `hospital_id`.
    fn contains_id(&self, hospital_id: &HospitalId) -> bool {
        self.find_by_id(hospital_id).is_some()
    }
}
