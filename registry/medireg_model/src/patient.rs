use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::hospital_id::HospitalId;
use crate::phone::Phone;

/// Youngest accepted age. Age 0 is rejected.
pub const MIN_AGE: u8 = 1;
/// Oldest accepted age.
pub const MAX_AGE: u8 = 150;

/// The three options offered by the gender selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Gender {
    /// "Male"
    Male,
    /// "Female"
    Female,
    /// "Other"
    Other,
}

impl Gender {
    /// Every option, in selector order.
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    /// Label shown in the form and stored in the record.
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input that names none of the [`Gender`] options.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown gender {0:?}")]
pub struct ParseGenderError(pub String);

impl FromStr for Gender {
    type Err = ParseGenderError;

    /// Accepts the three option labels, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Gender::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseGenderError(s.to_string()))
    }
}

/// The mutable part of a patient record.
///
/// Forms produce this after validation; the store only ever receives values
/// that already satisfy the field rules.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PatientFields {
    /// Full name, trimmed.
    pub name: String,
    /// Age in years, within [`MIN_AGE`]..=[`MAX_AGE`].
    pub age: u8,
    /// Selected gender option.
    pub gender: Gender,
    /// Normalized phone number, the record's key.
    pub phone: Phone,
    /// Postal address, trimmed.
    pub address: String,
}

/// A registered patient.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PatientRecord {
    /// Assigned at registration, never changed.
    pub hospital_id: HospitalId,
    /// Full name.
    pub name: String,
    /// Age in years.
    pub age: u8,
    /// Selected gender option.
    pub gender: Gender,
    /// Current key in the store.
    pub phone: Phone,
    /// Postal address.
    pub address: String,
}

impl PatientRecord {
    /// Combines a fresh ID with validated fields.
    pub fn new(hospital_id: HospitalId, fields: PatientFields) -> Self {
        let PatientFields {
            name,
            age,
            gender,
            phone,
            address,
        } = fields;
        Self {
            hospital_id,
            name,
            age,
            gender,
            phone,
            address,
        }
    }

    /// Replaces every mutable field at once. The hospital ID is untouched.
    pub fn apply(&mut self, fields: PatientFields) {
        self.name = fields.name;
        self.age = fields.age;
        self.gender = fields.gender;
        self.phone = fields.phone;
        self.address = fields.address;
    }

    /// Copies out the mutable fields, e.g. to pre-fill an edit form.
    pub fn fields(&self) -> PatientFields {
        PatientFields {
            name: self.name.clone(),
            age: self.age,
            gender: self.gender,
            phone: self.phone.clone(),
            address: self.address.clone(),
        }
    }
}
