use medireg_forms::{FormController, FormError};
use medireg_model::{normalize_phone, Phone};
use medireg_store::MemoryStore;
use proptest::prelude::*;
use tests::{by_id, by_phone, patient_form};

fn separated_phone() -> impl Strategy<Value = (String, String)> {
    ("[0-9]{3}", "[0-9]{3}", "[0-9]{4}", "[ -]{0,2}", "[ -]{0,2}").prop_map(|(a, b, c, s1, s2)| {
        (format!("{a}{s1}{b}{s2}{c}"), format!("{a}{b}{c}"))
    })
}

proptest! {
    #[test]
    fn normalization_is_idempotent(raw in "\\PC{0,24}") {
        let once = normalize_phone(&raw);
        prop_assert_eq!(normalize_phone(&once), once);
    }

    #[test]
    fn separators_do_not_change_the_key((raw, digits) in separated_phone()) {
        let phone = Phone::parse(&raw).unwrap();
        prop_assert_eq!(phone.as_str(), digits.as_str());
    }

    #[test]
    fn distinct_registrations_are_all_findable(
        phones in proptest::collection::hash_set("[0-9]{10}", 1..12),
    ) {
        let mut store = MemoryStore::new();
        let mut forms = FormController::new(&mut store);

        for (n, phone) in phones.iter().enumerate() {
            let record = forms
                .register(&patient_form("Pat", 30, "Other", phone, "1 Main St"))
                .unwrap();
            prop_assert_eq!(forms.stats().total_count, n + 1);
            prop_assert_eq!(forms.lookup(&by_phone(phone)).unwrap(), record.clone());
            prop_assert_eq!(forms.lookup(&by_id(record.hospital_id.as_str())).unwrap(), record);
        }
    }

    #[test]
    fn re_registering_any_spelling_is_duplicate((raw, digits) in separated_phone()) {
        let mut store = MemoryStore::new();
        let mut forms = FormController::new(&mut store);
        forms
            .register(&patient_form("Pat", 30, "Other", &digits, "1 Main St"))
            .unwrap();

        let again = forms.register(&patient_form("Sam", 31, "Male", &raw, "2 Main St"));
        prop_assert!(matches!(again, Err(FormError::DuplicateKey(_))));
        prop_assert_eq!(forms.stats().total_count, 1);
    }

    #[test]
    fn ages_outside_range_are_rejected(age in prop_oneof![-1000i64..=0, 151i64..=1000]) {
        let mut store = MemoryStore::new();
        let mut forms = FormController::new(&mut store);
        let result = forms.register(&patient_form("Pat", age, "Other", "5550001111", "1 Main St"));
        prop_assert!(matches!(result, Err(FormError::Validation(_))));
        prop_assert_eq!(forms.stats().total_count, 0);
    }
}
