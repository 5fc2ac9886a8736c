use medireg_forms::{FormController, FormError};
use medireg_model::HOSPITAL_ID_PREFIX;
use medireg_store::MemoryStore;
use pretty_assertions::assert_eq;
use tests::{by_id, by_phone, init_test_logger, jane_doe, patient_form, update_form};

#[test]
fn register_lookup_update_lookup() {
    init_test_logger();
    let mut store = MemoryStore::new();
    let mut forms = FormController::new(&mut store);

    let registered = forms.register(&jane_doe()).expect("registration succeeds");
    let token = registered
        .hospital_id
        .as_str()
        .strip_prefix(HOSPITAL_ID_PREFIX)
        .expect("HSP- prefix");
    assert_eq!(token.len(), 8);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));

    let found = forms.lookup(&by_phone("5550001111")).expect("found by phone");
    assert_eq!(found, registered);

    let edited = patient_form("Jane Doe", 34, "Female", "5559998888", "1 Main St");
    let outcome = forms
        .update(&update_form("5550001111", edited))
        .expect("update succeeds");
    assert!(outcome.rekeyed);

    assert_eq!(
        forms.lookup(&by_phone("5550001111")),
        Err(FormError::NotFound)
    );
    let moved = forms.lookup(&by_phone("5559998888")).expect("found under new phone");
    assert_eq!(moved.hospital_id, registered.hospital_id);
    assert_eq!(moved.phone.as_str(), "5559998888");

    let by_hospital_id = forms
        .lookup(&by_id(registered.hospital_id.as_str()))
        .expect("found by id");
    assert_eq!(by_hospital_id, moved);
}

#[test]
fn sessions_with_separate_stores_do_not_share_records() {
    let mut first = MemoryStore::new();
    let mut second = MemoryStore::new();

    FormController::new(&mut first)
        .register(&jane_doe())
        .expect("register");

    let other = FormController::new(&mut second);
    assert_eq!(other.lookup(&by_phone("5550001111")), Err(FormError::NotFound));
    assert_eq!(other.stats().total_count, 0);
}

#[test]
fn summary_after_mixed_activity() {
    let mut store = MemoryStore::new();
    let mut forms = FormController::new(&mut store);

    forms
        .register(&patient_form("Ann", 1, "Female", "5550000001", "A St"))
        .unwrap();
    forms
        .register(&patient_form("Ben", 150, "Male", "5550000002", "B St"))
        .unwrap();
    assert!(forms
        .register(&patient_form("Cy", 0, "Other", "5550000003", "C St"))
        .is_err());
    assert!(forms
        .register(&patient_form("Dup", 40, "Other", "555-000-0001", "D St"))
        .is_err());
    forms
        .update(&update_form(
            "5550000001",
            patient_form("Ann", 2, "Female", "5550000009", "A St"),
        ))
        .unwrap();

    let stats = forms.stats();
    assert_eq!(stats.total_count, 2);
    let summary: Vec<(&str, &str)> = stats
        .most_recent_records
        .iter()
        .map(|r| (r.name.as_str(), r.phone.as_str()))
        .collect();
    assert_eq!(summary, vec![("Ann", "5550000009"), ("Ben", "5550000002")]);
}
