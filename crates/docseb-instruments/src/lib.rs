//! docseb-instruments
//!
//! Knee questionnaire catalogs and scoring. Pure data and arithmetic: no I/O.
//! Defines the questions, sections, and completion rules for each
//! supported instrument, and the calculators that turn an answer map into
//! a score.

pub mod error;
pub mod instruments;
pub mod scoring;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use error::InstrumentError;
use instruments::ikdc::IkdcScore;
use instruments::koos::KoosScores;
use instruments::lysholm::LysholmReport;
use instruments::womac::WomacScores;
use scoring::{
    numeric, AnswerMap, Question, QuestionType, Section, ValidationError, ValidationKind,
};

/// Result of scoring one instrument, tagged by instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "instrument", rename_all = "snake_case")]
#[ts(export)]
pub enum InstrumentScore {
    Koos(KoosScores),
    Womac(WomacScores),
    Ikdc(IkdcScore),
    LysholmTegner(LysholmReport),
}

/// Trait implemented by each questionnaire.
pub trait Instrument: Send + Sync {
    /// Unique identifier for this instrument (e.g., "koos", "ikdc").
    fn id(&self) -> &str;

    /// Human-readable name (e.g., "KOOS", "Lysholm-Tegner").
    fn name(&self) -> &str;

    /// Subscale headings, in display order.
    fn sections(&self) -> &[Section];

    /// The full question catalog, including unscored items.
    fn questions(&self) -> &[Question];

    /// Score an answer map. Never fails: incomplete forms are flagged in
    /// the result instead.
    fn score(&self, answers: &AnswerMap) -> InstrumentScore;

    fn question(&self, id: &str) -> Option<&Question> {
        self.questions().iter().find(|q| q.id == id)
    }

    /// Report answers that do not fit this instrument's catalog.
    ///
    /// `null` answers are treated as cleared and never reported.
    fn validate_answers(&self, answers: &AnswerMap) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for (id, raw) in answers.raw() {
            if raw.is_null() {
                continue;
            }

            let Some(question) = self.question(id) else {
                errors.push(ValidationError {
                    question_id: id.to_string(),
                    value: raw.clone(),
                    kind: ValidationKind::UnknownQuestion,
                    message: format!("{}: no question with id '{id}'", self.name()),
                });
                continue;
            };

            match numeric(raw) {
                None => errors.push(ValidationError {
                    question_id: id.to_string(),
                    value: raw.clone(),
                    kind: ValidationKind::NotNumeric,
                    message: format!("{}: answer {raw} for '{id}' is not a number", self.name()),
                }),
                Some(value) if !question.accepts(value) => {
                    let reason = match question.kind {
                        QuestionType::Radio => "is not one of the option values".to_string(),
                        QuestionType::Scale10 => format!("is outside [0, {}]", question.max_value()),
                    };
                    errors.push(ValidationError {
                        question_id: id.to_string(),
                        value: raw.clone(),
                        kind: ValidationKind::OutOfDomain,
                        message: format!("{}: answer {value} for '{id}' {reason}", self.name()),
                    });
                }
                Some(_) => {}
            }
        }
        errors
    }

    /// Fail on the first answer that does not fit the catalog.
    fn ensure_valid(&self, answers: &AnswerMap) -> Result<(), InstrumentError> {
        match self.validate_answers(answers).into_iter().next() {
            Some(error) => Err(error.into()),
            None => Ok(()),
        }
    }
}

/// Return all registered instruments.
pub fn all_instruments() -> Vec<Box<dyn Instrument>> {
    vec![
        Box::new(instruments::koos::Koos),
        Box::new(instruments::womac::Womac),
        Box::new(instruments::ikdc::Ikdc),
        Box::new(instruments::lysholm::LysholmTegner),
    ]
}

/// Look up an instrument by ID.
pub fn get_instrument(id: &str) -> Option<Box<dyn Instrument>> {
    all_instruments().into_iter().find(|i| i.id() == id)
}

/// Look up an instrument by ID, failing when it is not registered.
pub fn require_instrument(id: &str) -> Result<Box<dyn Instrument>, InstrumentError> {
    get_instrument(id).ok_or_else(|| InstrumentError::UnknownInstrument(id.to_string()))
}
