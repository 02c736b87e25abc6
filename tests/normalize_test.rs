//! Integration tests for violation list normalization.

use std::sync::Mutex;

use serde_json::{json, Map, Value};
use violation_normalizer::{
    AdvancedNameConverter, BasicNameConverter, Constraint, ConstraintViolationList,
    ConstraintViolationListNormalizer, NameConverter, NameConverterError, PayloadFields,
    Violation, FORMAT,
};

const CODE: &str = "f24bdbad0becef97a6887238aa58221c";

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {}", other),
    }
}

fn violation_list() -> ConstraintViolationList {
    let constraint = Constraint::new("NotNull")
        .with_payload(object(json!({ "severity": "warning", "anotherField2": "aValue" })));

    ConstraintViolationList::new(vec![
        Violation::new("a", "d")
            .with_message_template("b")
            .with_invalid_value(json!("e"))
            .with_code(CODE)
            .with_constraint(constraint),
        Violation::new("1", "4")
            .with_message_template("2")
            .with_invalid_value(json!("5")),
    ])
}

fn fields(names: &[&str]) -> PayloadFields {
    PayloadFields::from_option(Some(names.iter().map(|s| s.to_string()).collect()))
}

fn prefix_basic() -> NameConverter {
    NameConverter::basic(|name: &str| format!("_{}", name))
}

struct PrefixAdvanced;

impl AdvancedNameConverter for PrefixAdvanced {
    fn normalize(
        &self,
        property_name: &str,
        class: Option<&str>,
        format: Option<&str>,
    ) -> Result<String, NameConverterError> {
        assert_eq!(class, None);
        assert_eq!(format, Some(FORMAT));
        Ok(format!("_{}", property_name))
    }
}

fn normalize_to_string(normalizer: &ConstraintViolationListNormalizer) -> String {
    let records = normalizer.normalize(&violation_list()).unwrap();
    serde_json::to_string(&records).unwrap()
}

// === Support Tests ===

mod support {
    use super::*;
    use std::any::TypeId;

    #[test]
    fn supports_violation_list_in_format() {
        let normalizer = ConstraintViolationListNormalizer::new(PayloadFields::Omit)
            .with_name_converter(prefix_basic());

        assert!(normalizer.supports(&ConstraintViolationList::default(), Some(FORMAT)));
        assert!(!normalizer.supports(&ConstraintViolationList::default(), Some("xml")));
        assert!(!normalizer.supports(&Violation::new("a", "b"), Some(FORMAT)));
    }

    #[test]
    fn supported_types() {
        let normalizer = ConstraintViolationListNormalizer::default();

        assert!(normalizer.supported_types(Some("json")).is_empty());
        let types = normalizer.supported_types(Some(FORMAT));
        assert_eq!(types.len(), 1);
        assert!(types[&TypeId::of::<ConstraintViolationList>()]);
    }
}

// === Payload Field Filtering ===

mod payload_fields {
    use super::*;

    #[test]
    fn allowed_fields_keep_intersection() {
        let normalizer =
            ConstraintViolationListNormalizer::new(fields(&["severity", "anotherField1"]));

        assert_eq!(
            normalize_to_string(&normalizer),
            json!([
                { "propertyPath": "d", "message": "a", "code": CODE, "payload": { "severity": "warning" } },
                { "propertyPath": "4", "message": "1", "code": null }
            ])
            .to_string()
        );
    }

    #[test]
    fn all_fields_keep_full_payload_in_order() {
        let normalizer = ConstraintViolationListNormalizer::new(PayloadFields::All);

        assert_eq!(
            normalize_to_string(&normalizer),
            concat!(
                r#"[{"propertyPath":"d","message":"a","code":"f24bdbad0becef97a6887238aa58221c","#,
                r#""payload":{"severity":"warning","anotherField2":"aValue"}},"#,
                r#"{"propertyPath":"4","message":"1","code":null}]"#
            )
        );
    }

    #[test]
    fn no_fields_omit_payload() {
        let normalizer = ConstraintViolationListNormalizer::new(PayloadFields::from_option(Some(vec![])));
        let records = normalizer.normalize(&violation_list()).unwrap();

        assert!(records.iter().all(|r| r.payload.is_none()));
        assert!(!normalize_to_string(&normalizer).contains("payload"));
    }

    #[test]
    fn empty_intersection_omits_payload() {
        let normalizer = ConstraintViolationListNormalizer::new(fields(&["unknown"]));
        let records = normalizer.normalize(&violation_list()).unwrap();
        assert!(records[0].payload.is_none());
    }

    #[test]
    fn constraint_without_payload() {
        let list = ConstraintViolationList::new(vec![
            Violation::new("a", "d").with_constraint(Constraint::new("NotBlank"))
        ]);
        let records = ConstraintViolationListNormalizer::default()
            .normalize(&list)
            .unwrap();
        assert!(records[0].payload.is_none());
    }

    #[test]
    fn input_is_not_mutated() {
        let list = violation_list();
        let before = list.clone();
        ConstraintViolationListNormalizer::new(fields(&["severity"]))
            .normalize(&list)
            .unwrap();
        assert_eq!(list, before);
    }
}

// === Name Converters ===

mod name_converters {
    use super::*;

    fn prefixed(payload: Value) -> String {
        let mut first = json!({ "propertyPath": "_d", "message": "a", "code": CODE });
        if !payload.is_null() {
            first["payload"] = payload;
        }
        json!([first, { "propertyPath": "_4", "message": "1", "code": null }]).to_string()
    }

    #[test]
    fn basic_converter_with_each_field_mode() {
        let cases = [
            (fields(&["severity", "anotherField1"]), json!({ "severity": "warning" })),
            (
                PayloadFields::All,
                json!({ "severity": "warning", "anotherField2": "aValue" }),
            ),
            (PayloadFields::Omit, Value::Null),
        ];

        for (payload_fields, payload) in cases {
            let normalizer = ConstraintViolationListNormalizer::new(payload_fields)
                .with_name_converter(prefix_basic());
            assert_eq!(normalize_to_string(&normalizer), prefixed(payload));
        }
    }

    #[test]
    fn advanced_converter_with_each_field_mode() {
        let cases = [
            (fields(&["severity", "anotherField1"]), json!({ "severity": "warning" })),
            (
                PayloadFields::All,
                json!({ "severity": "warning", "anotherField2": "aValue" }),
            ),
            (PayloadFields::Omit, Value::Null),
        ];

        for (payload_fields, payload) in cases {
            let normalizer = ConstraintViolationListNormalizer::new(payload_fields)
                .with_name_converter(NameConverter::advanced(PrefixAdvanced));
            assert_eq!(normalize_to_string(&normalizer), prefixed(payload));
        }
    }

    #[test]
    fn no_converter_passes_paths_through() {
        let normalizer = ConstraintViolationListNormalizer::new(PayloadFields::Omit);
        let records = normalizer.normalize(&violation_list()).unwrap();
        let paths: Vec<&str> = records.iter().map(|r| r.property_path.as_str()).collect();
        assert_eq!(paths, ["d", "4"]);
    }

    #[test]
    fn empty_path_still_converted() {
        struct Recording(Mutex<Vec<String>>);

        impl BasicNameConverter for Recording {
            fn normalize(&self, property_name: &str) -> Result<String, NameConverterError> {
                self.0.lock().unwrap().push(property_name.to_string());
                Ok("converted".to_string())
            }
        }

        let recorder = std::sync::Arc::new(Recording(Mutex::new(Vec::new())));
        let normalizer = ConstraintViolationListNormalizer::new(PayloadFields::All)
            .with_name_converter(NameConverter::Basic(recorder.clone()));
        let list = ConstraintViolationList::new(vec![Violation::new("global", "")]);

        let records = normalizer.normalize(&list).unwrap();
        assert_eq!(records[0].property_path, "converted");
        assert_eq!(*recorder.0.lock().unwrap(), vec![String::new()]);
    }

    #[test]
    fn empty_path_still_converted_by_advanced() {
        type Call = (String, Option<String>, Option<String>);
        struct Recording(Mutex<Vec<Call>>);

        impl AdvancedNameConverter for Recording {
            fn normalize(
                &self,
                property_name: &str,
                class: Option<&str>,
                format: Option<&str>,
            ) -> Result<String, NameConverterError> {
                self.0.lock().unwrap().push((
                    property_name.to_string(),
                    class.map(String::from),
                    format.map(String::from),
                ));
                Ok("converted".to_string())
            }
        }

        let recorder = std::sync::Arc::new(Recording(Mutex::new(Vec::new())));
        let normalizer = ConstraintViolationListNormalizer::new(PayloadFields::All)
            .with_name_converter(NameConverter::Advanced(recorder.clone()));
        let list = ConstraintViolationList::new(vec![Violation::new("global", "")]);

        let records = normalizer.normalize(&list).unwrap();
        assert_eq!(records[0].property_path, "converted");
        assert_eq!(
            *recorder.0.lock().unwrap(),
            vec![(String::new(), None, Some(FORMAT.to_string()))]
        );
    }

    #[test]
    fn converter_error_propagates_unchanged() {
        struct Failing;

        impl BasicNameConverter for Failing {
            fn normalize(&self, property_name: &str) -> Result<String, NameConverterError> {
                Err(NameConverterError::Unmappable {
                    name: property_name.to_string(),
                    reason: "unknown attribute".to_string(),
                })
            }
        }

        let normalizer =
            ConstraintViolationListNormalizer::default().with_name_converter(NameConverter::basic(Failing));
        let err = normalizer.normalize(&violation_list()).unwrap_err();
        assert_eq!(
            err,
            NameConverterError::Unmappable {
                name: "d".to_string(),
                reason: "unknown attribute".to_string(),
            }
        );
    }
}

// === Problem-Details Report ===

mod report {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    // Appends a call counter so every conversion yields a distinct path.
    struct Counting(AtomicUsize);

    impl BasicNameConverter for Counting {
        fn normalize(&self, property_name: &str) -> Result<String, NameConverterError> {
            let n = self.0.fetch_add(1, Ordering::SeqCst);
            Ok(format!("{}#{}", property_name, n))
        }
    }

    #[test]
    fn converts_each_path_once() {
        let counter = Arc::new(Counting(AtomicUsize::new(0)));
        let normalizer = ConstraintViolationListNormalizer::new(PayloadFields::All)
            .with_name_converter(NameConverter::Basic(counter.clone()));
        let list = violation_list();

        let report = normalizer.normalize_report(&list).unwrap();

        assert_eq!(counter.0.load(Ordering::SeqCst), list.len());
        assert_eq!(report.detail, "d#0: a\n4#1: 1");
        let paths: Vec<&str> = report
            .violations
            .iter()
            .map(|r| r.property_path.as_str())
            .collect();
        assert_eq!(paths, ["d#0", "4#1"]);
    }

    #[test]
    fn detail_lines_match_violation_paths() {
        let normalizer = ConstraintViolationListNormalizer::new(PayloadFields::Omit)
            .with_name_converter(NameConverter::basic(Counting(AtomicUsize::new(0))));
        let mut list = violation_list();
        list.push(Violation::new("x", "nested.field"));

        let report = normalizer.normalize_report(&list).unwrap();
        let lines: Vec<&str> = report.detail.lines().collect();

        assert_eq!(lines.len(), report.violations.len());
        for (line, record) in lines.iter().zip(&report.violations) {
            assert_eq!(*line, format!("{}: {}", record.property_path, record.message));
        }
    }
}

// === Ordering ===

mod ordering {
    use super::*;

    #[test]
    fn output_matches_input_order_and_length() {
        let list: ConstraintViolationList = (0..50)
            .map(|i| Violation::new(format!("message {}", i), format!("field{}", i)))
            .collect();

        let records = ConstraintViolationListNormalizer::default()
            .normalize(&list)
            .unwrap();

        assert_eq!(records.len(), list.len());
        for (record, violation) in records.iter().zip(list.iter()) {
            assert_eq!(record.property_path, violation.property_path);
            assert_eq!(record.message, violation.message);
        }
    }

    #[test]
    fn shared_across_threads() {
        let normalizer = std::sync::Arc::new(
            ConstraintViolationListNormalizer::new(fields(&["severity"]))
                .with_name_converter(prefix_basic()),
        );
        let expected = normalize_to_string(&normalizer);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let normalizer = normalizer.clone();
                std::thread::spawn(move || normalize_to_string(&normalizer))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }
}
