use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// How a question collects its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum QuestionType {
    /// One choice from an ordered option list.
    Radio,
    /// Numeric rating from 0 up to the question's `max` (10 when unset).
    Scale10,
}

/// One selectable answer of a radio question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnswerOption {
    pub label: String,
    pub value: i32,
}

impl AnswerOption {
    pub fn new(label: &str, value: i32) -> Self {
        Self {
            label: label.to_string(),
            value,
        }
    }
}

/// Static catalog entry for a single questionnaire item.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Question {
    pub id: String,
    /// Subscale key this item is scored under.
    pub section: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    #[serde(default)]
    pub options: Vec<AnswerOption>,
    #[serde(default)]
    pub max: Option<i32>,
    #[serde(default)]
    pub exclude_from_score: bool,
}

impl Question {
    pub fn radio(id: &str, section: &str, text: &str, options: &[AnswerOption]) -> Self {
        Self {
            id: id.to_string(),
            section: section.to_string(),
            text: text.to_string(),
            kind: QuestionType::Radio,
            options: options.to_vec(),
            max: None,
            exclude_from_score: false,
        }
    }

    pub fn scale10(id: &str, section: &str, text: &str) -> Self {
        Self {
            id: id.to_string(),
            section: section.to_string(),
            text: text.to_string(),
            kind: QuestionType::Scale10,
            options: Vec::new(),
            max: Some(DEFAULT_SCALE_MAX),
            exclude_from_score: false,
        }
    }

    /// Mark this item as informational only.
    pub fn excluded(mut self) -> Self {
        self.exclude_from_score = true;
        self
    }

    /// Highest value this question can contribute to a sum.
    ///
    /// A radio question without options contributes nothing.
    pub fn max_value(&self) -> f64 {
        match self.kind {
            QuestionType::Radio => self
                .options
                .iter()
                .map(|o| o.value)
                .max()
                .map(f64::from)
                .unwrap_or(0.0),
            QuestionType::Scale10 => f64::from(self.max.unwrap_or(DEFAULT_SCALE_MAX)),
        }
    }

    /// Whether `value` lies in this question's answer domain.
    pub fn accepts(&self, value: f64) -> bool {
        match self.kind {
            QuestionType::Radio => self.options.iter().any(|o| f64::from(o.value) == value),
            QuestionType::Scale10 => {
                value >= 0.0 && value <= f64::from(self.max.unwrap_or(DEFAULT_SCALE_MAX))
            }
        }
    }
}

pub const DEFAULT_SCALE_MAX: i32 = 10;

/// Heading metadata for a subscale.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Section {
    pub key: String,
    pub title: String,
    pub instruction: Option<String>,
    pub item_count: u32,
}

impl Section {
    pub fn new(key: &str, title: &str, item_count: u32) -> Self {
        Self {
            key: key.to_string(),
            title: title.to_string(),
            instruction: None,
            item_count,
        }
    }

    pub fn with_instruction(mut self, instruction: &str) -> Self {
        self.instruction = Some(instruction.to_string());
        self
    }
}

/// Sparse map from question id to the submitted answer.
///
/// Values are kept as raw JSON. Only finite numbers and numeric strings
/// count as answered; anything else reads the same as an absent key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnswerMap(BTreeMap<String, serde_json::Value>);

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, id: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.0.insert(id.into(), value.into());
    }

    pub fn remove(&mut self, id: &str) -> Option<serde_json::Value> {
        self.0.remove(id)
    }

    /// Numeric value of an answer, if it has one.
    pub fn value(&self, id: &str) -> Option<f64> {
        self.0.get(id).and_then(numeric)
    }

    pub fn raw(&self) -> impl Iterator<Item = (&str, &serde_json::Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<serde_json::Value>> FromIterator<(K, V)> for AnswerMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

pub(crate) fn numeric(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// Outcome of one gated subscale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubscaleResult {
    pub valid: bool,
    /// `None` unless the completion threshold was met.
    pub score: Option<f64>,
    pub answered: u32,
}

/// Values of the scorable questions that were answered, in catalog order.
///
/// A question id is counted once even if the catalog repeats it.
pub fn answered_values<'a>(
    answers: &AnswerMap,
    questions: impl IntoIterator<Item = &'a Question>,
) -> Vec<f64> {
    let mut seen = HashSet::new();
    questions
        .into_iter()
        .filter(|q| !q.exclude_from_score)
        .filter(|&q| seen.insert(q.id.as_str()))
        .filter_map(|q| answers.value(&q.id))
        .collect()
}

/// Answered values belonging to one section.
pub fn section_values(answers: &AnswerMap, questions: &[Question], section: &str) -> Vec<f64> {
    answered_values(answers, questions.iter().filter(|q| q.section == section))
}

/// Minimum answered items for a section of `item_count` items.
pub fn required_answers(item_count: u32) -> u32 {
    item_count.div_ceil(2)
}

/// Half-completion gate shared by the per-section instruments.
///
/// Zero answers never pass, whatever the item count.
pub fn meets_threshold(answered: u32, item_count: u32) -> bool {
    answered >= required_answers(item_count) && answered > 0
}

/// Apply the half-completion gate, scoring the values only when it passes.
pub fn gated(values: &[f64], item_count: u32, score: impl FnOnce(&[f64]) -> f64) -> SubscaleResult {
    let answered = values.len() as u32;
    if !meets_threshold(answered, item_count) {
        return SubscaleResult {
            valid: false,
            score: None,
            answered,
        };
    }
    SubscaleResult {
        valid: true,
        score: Some(score(values)),
        answered,
    }
}

/// Round to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Why a submitted answer does not fit an instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ValidationKind {
    UnknownQuestion,
    NotNumeric,
    OutOfDomain,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, Error)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
#[error("{message}")]
pub struct ValidationError {
    pub question_id: String,
    pub value: serde_json::Value,
    pub kind: ValidationKind,
    pub message: String,
}
