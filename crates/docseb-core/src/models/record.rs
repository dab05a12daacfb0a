use jiff::civil::{Date, DateTime};
use jiff::tz::TimeZone;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Placeholder shown for missing record fields.
pub const MISSING: &str = "—";

/// Body returned by the medical-records endpoint.
#[derive(Debug, Clone, Deserialize)]
struct RecordsResponse {
    #[serde(default)]
    ok: bool,
    #[serde(default)]
    records: Option<serde_json::Value>,
}

/// Parse the records endpoint body. A reply without `ok: true` is an error
/// even when it carries records; a `records` value that is not an array is
/// read as no records.
pub fn parse_records(body: &str) -> Result<Vec<MedicalRecord>, CoreError> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    if !value.is_object() {
        return Err(CoreError::Malformed("records reply is not a JSON object".to_string()));
    }
    let response: RecordsResponse = serde_json::from_value(value)
        .map_err(|e| CoreError::Malformed(format!("records reply: {e}")))?;
    if !response.ok {
        return Err(CoreError::NotOk);
    }
    let Some(serde_json::Value::Array(items)) = response.records else {
        return Ok(Vec::new());
    };
    items
        .into_iter()
        .map(serde_json::from_value)
        .collect::<Result<Vec<MedicalRecord>, _>>()
        .map_err(|e| CoreError::Malformed(format!("record: {e}")))
}

/// One patient's medical record, FHIR-flavoured.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MedicalRecord {
    pub id: serde_json::Value,
    pub patient: Option<Patient>,
    pub diagnoses: Vec<Diagnosis>,
    pub medications: Option<Medications>,
    pub antecedents: Option<Antecedents>,
    #[serde(rename = "prior_encounters")]
    pub encounters: Vec<Encounter>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Patient {
    pub patient_id: Option<String>,
    pub name: Option<HumanName>,
    pub birth_date: Option<String>,
    pub gender: Option<String>,
    pub telecom: Vec<ContactPoint>,
    pub emergency_contact: Vec<EmergencyContact>,
    pub primary_care_provider: Option<Provider>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HumanName {
    pub given: Vec<String>,
    pub family: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactPoint {
    pub system: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EmergencyContact {
    pub name: Option<String>,
    pub relationship: Option<String>,
    pub telecom: Vec<ContactPoint>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Provider {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Coding {
    pub code: Option<String>,
    pub display: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Diagnosis {
    pub diagnosis_id: Option<String>,
    pub code: Option<Coding>,
    pub recorded_date: Option<String>,
    pub clinical_status: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Medications {
    pub active: Vec<MedicationEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MedicationEntry {
    pub medication_request_id: Option<String>,
    pub medication: Option<Coding>,
    pub dosage_instructions: Vec<DosageInstruction>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DosageInstruction {
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Antecedents {
    pub allergies: Vec<Allergy>,
    pub surgical_history: Vec<Surgery>,
    pub family_history: Vec<FamilyCondition>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Allergy {
    pub substance: Option<Coding>,
    pub reaction: Vec<AllergyReaction>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AllergyReaction {
    pub manifestation: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Surgery {
    pub procedure: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FamilyCondition {
    pub relative: Option<String>,
    pub condition: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Encounter {
    pub period: Option<Period>,
    pub reason: Option<EncounterReason>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Period {
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterReason {
    pub reason_text: Option<String>,
    pub reason_codes: Vec<Coding>,
}

impl Encounter {
    /// Start of the encounter, or its end when no start is recorded.
    pub fn timestamp(&self) -> Option<Timestamp> {
        let period = self.period.as_ref()?;
        let raw = [period.start.as_deref(), period.end.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.trim().is_empty())?;
        parse_instant(raw.trim())
    }

    /// Free-text reason, falling back to the first coded reason.
    pub fn reason(&self) -> Option<&str> {
        let reason = self.reason.as_ref()?;
        non_blank(reason.reason_text.as_deref()).or_else(|| {
            reason
                .reason_codes
                .iter()
                .find_map(|c| non_blank(c.display.as_deref()))
        })
    }
}

fn non_blank(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}

/// Accepts RFC 3339 instants, civil datetimes, and plain dates (read as UTC).
fn parse_instant(raw: &str) -> Option<Timestamp> {
    if let Ok(ts) = raw.parse::<Timestamp>() {
        return Some(ts);
    }
    if let Ok(dt) = raw.parse::<DateTime>() {
        return dt.to_zoned(TimeZone::UTC).ok().map(|z| z.timestamp());
    }
    raw.parse::<Date>()
        .ok()
        .and_then(|d| d.to_zoned(TimeZone::UTC).ok())
        .map(|z| z.timestamp())
}

impl MedicalRecord {
    /// "Given names Family", or the placeholder when no name is recorded.
    pub fn patient_display_name(&self) -> String {
        self.patient
            .as_ref()
            .and_then(|p| p.name.as_ref())
            .map(|n| format!("{} {}", n.given.join(" "), n.family))
            .unwrap_or_else(|| MISSING.to_string())
    }

    pub fn primary_care_provider(&self) -> &str {
        self.patient
            .as_ref()
            .and_then(|p| p.primary_care_provider.as_ref())
            .and_then(|p| non_blank(p.name.as_deref()))
            .unwrap_or(MISSING)
    }

    pub fn primary_diagnosis(&self) -> &str {
        self.diagnoses
            .first()
            .and_then(|d| d.code.as_ref())
            .and_then(|c| non_blank(c.display.as_deref()))
            .unwrap_or(MISSING)
    }

    pub fn phone(&self) -> &str {
        self.patient
            .as_ref()
            .and_then(|p| p.telecom.iter().find(|t| t.system.as_deref() == Some("phone")))
            .and_then(|t| non_blank(t.value.as_deref()))
            .unwrap_or(MISSING)
    }

    /// Reason of the most recent encounter that records one.
    ///
    /// Encounters without a parseable date sort as the oldest; ties keep
    /// their original order.
    pub fn latest_encounter_reason(&self) -> &str {
        let mut encounters: Vec<(Option<Timestamp>, &Encounter)> =
            self.encounters.iter().map(|e| (e.timestamp(), e)).collect();
        encounters.sort_by(|a, b| b.0.cmp(&a.0));
        encounters
            .into_iter()
            .find_map(|(_, e)| e.reason())
            .unwrap_or(MISSING)
    }

    /// Case-insensitive match of `term` against the patient name. A blank
    /// term matches everything; a record without a name matches nothing else.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        let Some(name) = self.patient.as_ref().and_then(|p| p.name.as_ref()) else {
            return false;
        };
        format!("{} {}", name.given.join(" "), name.family)
            .to_lowercase()
            .contains(&term)
    }
}
