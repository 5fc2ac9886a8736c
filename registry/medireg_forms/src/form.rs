use std::fmt;

use medireg_model::{Gender, PatientFields, Phone, PhoneError, MAX_AGE, MIN_AGE};
use serde::{Deserialize, Deserializer, Serialize};

/// Shown when the name is blank.
pub const NAME_REQUIRED: &str = "Name is required";
/// Shown when the age is missing or outside 1..=150.
pub const AGE_INVALID: &str = "Valid age is required";
/// Shown when no gender is selected.
pub const GENDER_REQUIRED: &str = "Gender selection is required";
/// Shown when the gender is none of the options.
pub const GENDER_UNKNOWN: &str = "Please select Male, Female or Other";
/// Shown when the phone number is blank.
pub const PHONE_REQUIRED: &str = "Phone number is required";
/// Shown when the phone number is not ten digits after normalization.
pub const PHONE_INVALID: &str = "Please enter a valid 10-digit phone number";
/// Shown when the address is blank.
pub const ADDRESS_REQUIRED: &str = "Address is required";

/// A form input, in the order fields are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    /// Patient name.
    Name,
    /// Age in years.
    Age,
    /// Gender selector.
    Gender,
    /// Phone number.
    Phone,
    /// Postal address.
    Address,
}

/// What is wrong with a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldErrorKind {
    /// Left blank.
    Required,
    /// Numeric value outside the accepted range.
    OutOfRange,
    /// Not one of the offered options.
    UnknownOption,
    /// Not a 10-digit phone number.
    InvalidPhone,
}

/// One problem with one field, with the message shown next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// The offending input.
    pub field: Field,
    /// Category of the problem.
    pub kind: FieldErrorKind,
    /// User-facing text.
    pub message: &'static str,
}

/// Every field-level problem found in one submission, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    fn push(&mut self, field: Field, kind: FieldErrorKind, message: &'static str) {
        self.0.push(FieldError {
            field,
            kind,
            message,
        });
    }

    /// True when the submission was valid.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of field errors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Field errors in field order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Just the user-facing messages, in field order.
    pub fn messages(&self) -> Vec<&'static str> {
        self.0.iter().map(|e| e.message).collect()
    }

    /// Whether `field` failed with `kind`.
    pub fn has(&self, field: Field, kind: FieldErrorKind) -> bool {
        self.0.iter().any(|e| e.field == field && e.kind == kind)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            f.write_str(err.message)?;
        }
        Ok(())
    }
}

/// Raw registration or edit input, exactly as typed into the form.
///
/// Missing keys deserialize as blank values so they are reported as
/// "required" instead of failing to parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PatientForm {
    /// Patient name as typed.
    pub name: String,
    /// Whole number of years. Also read from a numeric string, as browsers
    /// submit form fields; anything unreadable becomes 0 and fails validation.
    #[serde(deserialize_with = "lenient_age")]
    pub age: i64,
    /// Selected gender label.
    pub gender: String,
    /// Phone number as typed, separators included.
    pub phone: String,
    /// Postal address as typed.
    pub address: String,
}

impl PatientForm {
    /// Checks every field and collects all failures before returning.
    pub fn validate(&self) -> Result<PatientFields, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let name = self.name.trim();
        if name.is_empty() {
            errors.push(Field::Name, FieldErrorKind::Required, NAME_REQUIRED);
        }

        let age = u8::try_from(self.age)
            .ok()
            .filter(|a| (MIN_AGE..=MAX_AGE).contains(a));
        if age.is_none() {
            errors.push(Field::Age, FieldErrorKind::OutOfRange, AGE_INVALID);
        }

        let gender = if self.gender.trim().is_empty() {
            errors.push(Field::Gender, FieldErrorKind::Required, GENDER_REQUIRED);
            None
        } else {
            match self.gender.parse::<Gender>() {
                Ok(g) => Some(g),
                Err(_) => {
                    errors.push(Field::Gender, FieldErrorKind::UnknownOption, GENDER_UNKNOWN);
                    None
                }
            }
        };

        let phone = match Phone::parse(&self.phone) {
            Ok(p) => Some(p),
            Err(PhoneError::Empty) => {
                errors.push(Field::Phone, FieldErrorKind::Required, PHONE_REQUIRED);
                None
            }
            Err(PhoneError::InvalidFormat) => {
                errors.push(Field::Phone, FieldErrorKind::InvalidPhone, PHONE_INVALID);
                None
            }
        };

        let address = self.address.trim();
        if address.is_empty() {
            errors.push(Field::Address, FieldErrorKind::Required, ADDRESS_REQUIRED);
        }

        match (age, gender, phone) {
            (Some(age), Some(gender), Some(phone)) if errors.is_empty() => Ok(PatientFields {
                name: name.to_string(),
                age,
                gender,
                phone,
                address: address.to_string(),
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAge {
    Whole(i64),
    Real(f64),
    Text(String),
}

fn lenient_age<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(match Option::<RawAge>::deserialize(deserializer)? {
        Some(RawAge::Whole(n)) => n,
        Some(RawAge::Real(f)) if f.fract() == 0.0 && f.abs() <= f64::from(u16::MAX) => f as i64,
        Some(RawAge::Text(text)) => text.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

/// Edit submission for an existing record, addressed by the phone number the
/// record was found under.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateForm {
    /// Phone number the record was found under before editing.
    #[serde(default)]
    pub original_phone: String,
    /// The edited values.
    #[serde(flatten)]
    pub patient: PatientForm,
}

/// Which key a search uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LookupMode {
    /// Search by phone number.
    ByPhone,
    /// Search by hospital ID.
    ById,
}

/// A search submission.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LookupQuery {
    /// Key to search by.
    pub mode: LookupMode,
    /// Search text as typed.
    #[serde(default)]
    pub value: String,
}

impl LookupQuery {
    /// Builds a query from its parts.
    pub fn new(mode: LookupMode, value: impl Into<String>) -> Self {
        Self {
            mode,
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn blank_form_reports_every_field() {
        let errors = PatientForm::default().validate().unwrap_err();
        assert_eq!(
            errors.messages(),
            vec![
                NAME_REQUIRED,
                AGE_INVALID,
                GENDER_REQUIRED,
                PHONE_REQUIRED,
                ADDRESS_REQUIRED
            ]
        );
    }

    #[test]
    fn display_joins_messages() {
        let form = PatientForm {
            name: "Jane".into(),
            age: 0,
            gender: "Female".into(),
            phone: "12345".into(),
            address: "x".into(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.to_string(), format!("{AGE_INVALID}; {PHONE_INVALID}"));
    }

    #[test]
    fn missing_keys_deserialize_as_blank() {
        let form: PatientForm = serde_json::from_str(r#"{"name":"Jane"}"#).unwrap();
        assert_eq!(form.age, 0);
        assert!(form.phone.is_empty());

        let update: UpdateForm =
            serde_json::from_str(r#"{"originalPhone":"5550001111","name":"Jane","age":3}"#)
                .unwrap();
        assert_eq!(update.original_phone, "5550001111");
        assert_eq!(update.patient.age, 3);
    }

    #[test]
    fn age_is_read_from_strings_and_whole_floats() {
        let age = |json: &str| serde_json::from_str::<PatientForm>(json).unwrap().age;
        assert_eq!(age(r#"{"age":"34"}"#), 34);
        assert_eq!(age(r#"{"age":" 7 "}"#), 7);
        assert_eq!(age(r#"{"age":40.0}"#), 40);
        assert_eq!(age(r#"{"age":3.5}"#), 0);
        assert_eq!(age(r#"{"age":"thirty"}"#), 0);
        assert_eq!(age(r#"{"age":null}"#), 0);

        let update: UpdateForm =
            serde_json::from_str(r#"{"originalPhone":"5550001111","age":"12"}"#).unwrap();
        assert_eq!(update.patient.age, 12);
    }

    #[test]
    fn unreadable_age_fails_validation() {
        let form: PatientForm = serde_json::from_str(
            r#"{"name":"Jane","age":"old","gender":"Female","phone":"5550001111","address":"x"}"#,
        )
        .unwrap();
        assert_eq!(form.validate().unwrap_err().messages(), vec![AGE_INVALID]);
    }

    #[test]
    fn lookup_mode_uses_camel_case() {
        let q: LookupQuery = serde_json::from_str(r#"{"mode":"byId","value":"hsp-1"}"#).unwrap();
        assert_eq!(q, LookupQuery::new(LookupMode::ById, "hsp-1"));
    }
}
