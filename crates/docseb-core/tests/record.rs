use docseb_core::error::CoreError;
use docseb_core::models::record::{parse_records, MISSING};
use serde_json::json;

fn sample() -> String {
    json!({
        "ok": true,
        "records": [{
            "id": "rec-1",
            "patient": {
                "patient_id": "p-1",
                "name": { "given": ["Ana", "María"], "family": "López" },
                "telecom": [
                    { "system": "email", "value": "ana@example.com" },
                    { "system": "phone", "value": "+52 55 1234 5678" }
                ],
                "primary_care_provider": { "name": "Dr. Ruiz" }
            },
            "diagnoses": [{
                "diagnosis_id": "dx-1",
                "code": { "code": "M17.1", "display": "Gonartrosis primaria" },
                "recorded_date": "2022-11-03",
                "clinical_status": "active"
            }],
            "prior_encounters": [
                { "period": { "start": "2023-02-01" }, "reason": { "reason_text": "Control" } },
                { "period": { "start": "" , "end": "2024-05-10T09:30:00Z" }, "reason": { "reason_text": "  ", "reason_codes": [{ "display": "" }, { "display": "Dolor de rodilla" }] } },
                { "period": { "start": "sin fecha" }, "reason": { "reason_text": "Antigua" } }
            ]
        }, {
            "id": 2
        }]
    })
    .to_string()
}

#[test]
fn parses_records_and_display_fields() {
    let records = parse_records(&sample()).unwrap();
    assert_eq!(records.len(), 2);

    let ana = &records[0];
    assert_eq!(ana.patient_display_name(), "Ana María López");
    assert_eq!(ana.primary_care_provider(), "Dr. Ruiz");
    assert_eq!(ana.primary_diagnosis(), "Gonartrosis primaria");
    assert_eq!(ana.phone(), "+52 55 1234 5678");
}

#[test]
fn sparse_record_falls_back_to_placeholders() {
    let records = parse_records(&sample()).unwrap();
    let sparse = &records[1];
    assert_eq!(sparse.id, json!(2));
    assert_eq!(sparse.patient_display_name(), MISSING);
    assert_eq!(sparse.primary_care_provider(), MISSING);
    assert_eq!(sparse.primary_diagnosis(), MISSING);
    assert_eq!(sparse.phone(), MISSING);
    assert_eq!(sparse.latest_encounter_reason(), MISSING);
}

#[test]
fn latest_encounter_reason_prefers_newest_dated_encounter() {
    let records = parse_records(&sample()).unwrap();
    assert_eq!(records[0].latest_encounter_reason(), "Dolor de rodilla");
}

#[test]
fn undated_encounters_sort_last() {
    let body = json!({
        "ok": true,
        "records": [{
            "prior_encounters": [
                { "reason": { "reason_text": "Sin periodo" } },
                { "period": { "start": "2020-01-01" }, "reason": { "reason_text": "Fechada" } }
            ]
        }]
    })
    .to_string();
    let records = parse_records(&body).unwrap();
    assert_eq!(records[0].latest_encounter_reason(), "Fechada");
}

#[test]
fn search_matches_patient_name_case_insensitively() {
    let records = parse_records(&sample()).unwrap();
    assert!(records[0].matches_search("maría ló"));
    assert!(records[0].matches_search("  "));
    assert!(!records[0].matches_search("pérez"));
    assert!(!records[1].matches_search("ana"));
}

#[test]
fn reply_without_ok_is_rejected() {
    let body = json!({ "ok": false, "records": [] }).to_string();
    assert!(matches!(parse_records(&body), Err(CoreError::NotOk)));
    assert!(matches!(parse_records("{}"), Err(CoreError::NotOk)));
}

#[test]
fn missing_record_list_is_empty() {
    let records = parse_records(r#"{"ok": true}"#).unwrap();
    assert!(records.is_empty());
}

#[test]
fn malformed_bodies_are_tagged() {
    assert!(matches!(parse_records("[]"), Err(CoreError::Malformed(_))));
    assert!(matches!(
        parse_records(r#"{"ok": true, "records": [{"diagnoses": "none"}]}"#),
        Err(CoreError::Malformed(_))
    ));
}

#[test]
fn non_array_record_list_is_empty() {
    let records = parse_records(r#"{"ok": true, "records": {"a": 1}}"#).unwrap();
    assert!(records.is_empty());
    let records = parse_records(r#"{"ok": true, "records": "none"}"#).unwrap();
    assert!(records.is_empty());
}

#[test]
fn encounters_are_read_from_prior_encounters() {
    let body = r#"{"ok":true,"records":[{"id":1,"prior_encounters":[{"period":{"start":"2024-01-01"},"reason":{"reason_text":"Dolor"}}]}]}"#;
    let records = parse_records(body).unwrap();
    assert_eq!(records[0].encounters.len(), 1);
    assert_eq!(records[0].latest_encounter_reason(), "Dolor");
}

#[test]
fn diagnosis_carries_date_and_status() {
    let records = parse_records(&sample()).unwrap();
    let dx = &records[0].diagnoses[0];
    assert_eq!(dx.diagnosis_id.as_deref(), Some("dx-1"));
    assert_eq!(dx.recorded_date.as_deref(), Some("2022-11-03"));
    assert_eq!(dx.clinical_status.as_deref(), Some("active"));
}
