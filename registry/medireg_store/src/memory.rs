use std::collections::HashMap;

use log::debug;
use medireg_model::{HospitalId, PatientFields, PatientRecord, Phone};

use crate::{RecordStore, StoreError};

/// In-memory record store.
///
/// Records sit in a `Vec` in registration order; `by_phone` maps each current
/// phone number to its slot. A record whose phone changes is re-registered
/// under the new number, so it moves to the end of the `Vec`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<PatientRecord>,
    by_phone: HashMap<Phone, usize>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// All records, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &PatientRecord> {
        self.records.iter()
    }
}

impl RecordStore for MemoryStore {
    fn insert(&mut self, record: PatientRecord) -> Result<(), StoreError> {
        if self.by_phone.contains_key(&record.phone) {
            return Err(StoreError::DuplicateKey(record.phone));
        }
        debug!("insert {} (slot {})", record.hospital_id, self.records.len());
        self.by_phone.insert(record.phone.clone(), self.records.len());
        self.records.push(record);
        Ok(())
    }

    fn find_by_phone(&self, phone: &Phone) -> Option<&PatientRecord> {
        self.by_phone.get(phone).map(|&slot| &self.records[slot])
    }

    fn find_by_id(&self, hospital_id: &HospitalId) -> Option<&PatientRecord> {
        self.records.iter().find(|r| &r.hospital_id == hospital_id)
    }

    fn update(
        &mut self,
        old_phone: &Phone,
        fields: PatientFields,
    ) -> Result<&PatientRecord, StoreError> {
        let slot = *self
            .by_phone
            .get(old_phone)
            .ok_or_else(|| StoreError::NotFound(old_phone.clone()))?;

        let rekey = &fields.phone != old_phone;
        if rekey {
            if self.by_phone.contains_key(&fields.phone) {
                return Err(StoreError::DuplicateKey(fields.phone));
            }
            // All index edits happen under this &mut borrow, so no reader can
            // observe the record missing from both keys.
            self.by_phone.remove(old_phone);
            let mut moved = self.records.remove(slot);
            moved.apply(fields);
            for later in &self.records[slot..] {
                if let Some(index) = self.by_phone.get_mut(&later.phone) {
                    *index -= 1;
                }
            }
            let tail = self.records.len();
            self.by_phone.insert(moved.phone.clone(), tail);
            self.records.push(moved);
            debug!("re-key {}: slot {slot} -> {tail}", self.records[tail].hospital_id);
            return Ok(&self.records[tail]);
        }

        self.records[slot].apply(fields);
        let record = &self.records[slot];
        debug!("updated {}", record.hospital_id);
        Ok(record)
    }

    fn count(&self) -> usize {
        self.records.len()
    }

    fn recent(&self, limit: usize) -> Vec<&PatientRecord> {
        self.records.iter().rev().take(limit).collect()
    }
}
