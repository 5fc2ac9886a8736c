use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Literal tag every generated hospital ID starts with.
pub const HOSPITAL_ID_PREFIX: &str = "HSP-";

const TOKEN_LEN: usize = 8;

/// Opaque identifier assigned to a patient at registration.
///
/// The value never changes once assigned, even when the record is re-keyed
/// under a new phone number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct HospitalId(String);

impl HospitalId {
    /// Builds a fresh `HSP-XXXXXXXX` identifier from a random v4 UUID.
    pub fn generate() -> Self {
        let token: String = Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .take(TOKEN_LEN)
            .collect();
        Self(format!("{HOSPITAL_ID_PREFIX}{}", token.to_ascii_uppercase()))
    }

    /// Normalizes user input for a lookup by uppercasing it.
    ///
    /// No format check happens here: an unknown or malformed ID is simply a
    /// lookup miss.
    pub fn from_lookup(raw: &str) -> Self {
        Self(raw.to_uppercase())
    }

    /// The identifier as shown to the user.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HospitalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
