use log::{debug, info};
use medireg_model::{HospitalId, PatientRecord, Phone};
use medireg_store::RecordStore;
use serde::Serialize;

use crate::error::FormError;
use crate::form::{LookupMode, LookupQuery, PatientForm, UpdateForm};

/// How many records the summary view lists.
pub const RECENT_LIMIT: usize = 3;

/// Result of a successful update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    /// The record after the update.
    pub record: PatientRecord,
    /// The phone number changed, so the record now lives under a new key.
    pub rekeyed: bool,
}

/// Summary shown in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Number of registered patients.
    pub total_count: usize,
    /// Up to [`RECENT_LIMIT`] records, newest first.
    pub most_recent_records: Vec<PatientRecord>,
}

/// Request/response glue between form input and a [`RecordStore`].
pub struct FormController<'s, S: RecordStore + ?Sized> {
    store: &'s mut S,
}

impl<'s, S: RecordStore + ?Sized> FormController<'s, S> {
    /// Wraps a borrowed store for the duration of one or more form calls.
    pub fn new(store: &'s mut S) -> Self {
        Self { store }
    }

    /// Validates `form` and creates a record under a fresh hospital ID.
    pub fn register(&mut self, form: &PatientForm) -> Result<PatientRecord, FormError> {
        let fields = form.validate().map_err(FormError::Validation)?;
        if self.store.find_by_phone(&fields.phone).is_some() {
            return Err(FormError::DuplicateKey(fields.phone));
        }

        let record = PatientRecord::new(self.fresh_id(), fields);
        self.store.insert(record.clone())?;
        info!(
            "registered patient {} ({} total)",
            record.hospital_id,
            self.store.count()
        );
        Ok(record)
    }

    /// Finds a record by phone number or hospital ID.
    ///
    /// A malformed phone number fails with [`FormError::InvalidPhone`] before
    /// the store is consulted.
    pub fn lookup(&self, query: &LookupQuery) -> Result<PatientRecord, FormError> {
        let found = match query.mode {
            LookupMode::ByPhone => {
                let phone = Phone::parse(&query.value).map_err(|_| FormError::InvalidPhone)?;
                self.store.find_by_phone(&phone)
            }
            LookupMode::ById => self.store.find_by_id(&HospitalId::from_lookup(&query.value)),
        };
        debug!("lookup {:?}: hit={}", query.mode, found.is_some());
        found.cloned().ok_or(FormError::NotFound)
    }

    /// Validates the edited values and writes them over the record found
    /// under `form.original_phone`.
    pub fn update(&mut self, form: &UpdateForm) -> Result<UpdateOutcome, FormError> {
        let fields = form.patient.validate().map_err(FormError::Validation)?;
        // No record can live under a malformed key.
        let original = Phone::parse(&form.original_phone).map_err(|_| FormError::NotFound)?;

        let rekeyed = fields.phone != original;
        let record = self.store.update(&original, fields)?.clone();
        info!(
            "updated patient {}{}",
            record.hospital_id,
            if rekeyed { " (phone changed)" } else { "" }
        );
        Ok(UpdateOutcome { record, rekeyed })
    }

    /// Total count and the most recent records.
    pub fn stats(&self) -> Stats {
        Stats {
            total_count: self.store.count(),
            most_recent_records: self
                .store
                .recent(RECENT_LIMIT)
                .into_iter()
                .cloned()
                .collect(),
        }
    }

    fn fresh_id(&self) -> HospitalId {
        loop {
            let id = HospitalId::generate();
            if !self.store.contains_id(&id) {
                return id;
            }
            debug!("hospital id {id} already assigned, drawing again");
        }
    }
}
