//! Shared fixtures for the medireg integration tests.

use std::sync::Once;

use log::LevelFilter;
use medireg_forms::{LookupMode, LookupQuery, PatientForm, UpdateForm};

static INIT: Once = Once::new();

/// Initialize the logger once per test binary.
pub fn init_test_logger() {
    INIT.call_once(|| {
        let _ = env_logger::builder()
            .is_test(true)
            .filter_level(LevelFilter::Debug)
            .try_init();
    });
}

pub fn patient_form(name: &str, age: i64, gender: &str, phone: &str, address: &str) -> PatientForm {
    PatientForm {
        name: name.to_string(),
        age,
        gender: gender.to_string(),
        phone: phone.to_string(),
        address: address.to_string(),
    }
}

/// The registration used throughout the end-to-end scenario.
pub fn jane_doe() -> PatientForm {
    patient_form("Jane Doe", 34, "Female", "555-000-1111", "1 Main St")
}

pub fn update_form(original_phone: &str, patient: PatientForm) -> UpdateForm {
    UpdateForm {
        original_phone: original_phone.to_string(),
        patient,
    }
}

pub fn by_phone(value: &str) -> LookupQuery {
    LookupQuery::new(LookupMode::ByPhone, value)
}

pub fn by_id(value: &str) -> LookupQuery {
    LookupQuery::new(LookupMode::ById, value)
}
