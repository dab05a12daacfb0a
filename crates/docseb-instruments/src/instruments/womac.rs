use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::scoring::{answered_values, gated, section_values, AnswerMap, AnswerOption, Question, Section, SubscaleResult};
use crate::{Instrument, InstrumentScore};

/// Section keys with their fixed item counts.
pub const ITEM_COUNTS: [(&str, u32); 3] = [("pain", 5), ("stiffness", 2), ("function", 17)];

pub const TOTAL_ITEMS: u32 = 24;

/// Raw WOMAC sums. Higher means more pain, stiffness or difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WomacScores {
    pub pain: SubscaleResult,
    pub stiffness: SubscaleResult,
    pub function: SubscaleResult,
    pub total: SubscaleResult,
}

/// Sum answered WOMAC items per section, gated on half completion.
///
/// Sums are not rescaled: a valid section with skipped items reports a
/// lower total than the same answers would on a complete form.
pub fn compute_womac_scores(answers: &AnswerMap, questions: &[Question]) -> WomacScores {
    let raw_sum = |values: &[f64]| values.iter().sum::<f64>();
    let [pain, stiffness, function] = ITEM_COUNTS
        .map(|(key, count)| gated(&section_values(answers, questions, key), count, raw_sum));
    let total = gated(&answered_values(answers, questions), TOTAL_ITEMS, raw_sum);

    WomacScores {
        pain,
        stiffness,
        function,
        total,
    }
}

/// WOMAC: Western Ontario and McMaster Universities Osteoarthritis Index.
/// 24 items rated 0–4 over the last 2 days.
pub struct Womac;

static OPTIONS: LazyLock<Vec<AnswerOption>> = LazyLock::new(|| {
    vec![
        AnswerOption::new("Ninguno/a", 0),
        AnswerOption::new("Poco/a", 1),
        AnswerOption::new("Bastante", 2),
        AnswerOption::new("Mucho/a", 3),
        AnswerOption::new("Muchísimo/a", 4),
    ]
});

static SECTIONS: LazyLock<Vec<Section>> = LazyLock::new(|| {
    vec![
        Section::new("pain", "Apartado A: Dolor", 5).with_instruction(
            "Indique cuánto DOLOR ha notado en los últimos 2 días en cada situación.",
        ),
        Section::new("stiffness", "Apartado B: Rigidez", 2).with_instruction(
            "Indique cuánta RIGIDEZ (no dolor) ha notado en los últimos 2 días.",
        ),
        Section::new("function", "Apartado C: Capacidad Funcional", 17).with_instruction(
            "Indique cuánta dificultad ha notado en los últimos 2 días al realizar:",
        ),
    ]
});

static QUESTIONS: LazyLock<Vec<Question>> = LazyLock::new(|| {
    let pain = [
        "Andar por un terreno llano.",
        "Subir o bajar escaleras.",
        "Por la noche en la cama.",
        "Estar sentado o tumbado.",
        "Estar de pie.",
    ];
    let stiffness = [
        "Después de despertarse por la mañana.",
        "Tras estar sentado, tumbado o descansando.",
    ];
    let function = [
        "Bajar las escaleras.",
        "Subir las escaleras.",
        "Levantarse después de estar sentado.",
        "Estar de pie.",
        "Agacharse para coger algo del suelo.",
        "Andar por un terreno llano.",
        "Entrar y salir de un coche.",
        "Ir de compras.",
        "Ponerse las medias o calcetines.",
        "Levantarse de la cama.",
        "Quitarse las medias o calcetines.",
        "Estar tumbado en la cama.",
        "Entrar y salir de la ducha/bañera.",
        "Estar sentado.",
        "Sentarse y levantarse del retrete.",
        "Hacer tareas domésticas pesadas.",
        "Hacer tareas domésticas ligeras.",
    ];

    let section = |key: &str, texts: &[&str]| -> Vec<Question> {
        texts
            .iter()
            .enumerate()
            .map(|(i, text)| Question::radio(&format!("{key}_{}", i + 1), key, text, &OPTIONS))
            .collect()
    };

    let mut questions = section("pain", &pain[..]);
    questions.extend(section("stiffness", &stiffness[..]));
    questions.extend(section("function", &function[..]));
    questions
});

/// The WOMAC question catalog.
pub fn questions() -> &'static [Question] {
    &QUESTIONS
}

impl Instrument for Womac {
    fn id(&self) -> &str {
        "womac"
    }

    fn name(&self) -> &str {
        "WOMAC"
    }

    fn sections(&self) -> &[Section] {
        &SECTIONS
    }

    fn questions(&self) -> &[Question] {
        &QUESTIONS
    }

    fn score(&self, answers: &AnswerMap) -> InstrumentScore {
        InstrumentScore::Womac(compute_womac_scores(answers, self.questions()))
    }
}
