use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::scoring::{gated, round1, section_values, AnswerMap, AnswerOption, Question, Section, SubscaleResult};
use crate::{Instrument, InstrumentScore};

/// Highest value on the KOOS five-point Likert scale.
pub const LIKERT_MAX: f64 = 4.0;

/// Subscale keys with their fixed item counts, in reporting order.
pub const SUBSCALES: [(&str, u32); 5] = [
    ("symptoms", 7),
    ("pain", 9),
    ("adl", 17),
    ("sport", 5),
    ("qol", 4),
];

/// Normalized KOOS result, one entry per subscale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct KoosScores {
    pub symptoms: SubscaleResult,
    pub pain: SubscaleResult,
    pub adl: SubscaleResult,
    pub sport: SubscaleResult,
    pub qol: SubscaleResult,
}

impl KoosScores {
    /// Subscales in their fixed reporting order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &SubscaleResult)> {
        [
            ("symptoms", &self.symptoms),
            ("pain", &self.pain),
            ("adl", &self.adl),
            ("sport", &self.sport),
            ("qol", &self.qol),
        ]
        .into_iter()
    }
}

/// Score each KOOS subscale on 0–100, where 100 means no problems.
///
/// Normalization divides by the items actually answered, so partial
/// completion only affects validity, not the scale of the score.
pub fn compute_koos_scores(answers: &AnswerMap, questions: &[Question]) -> KoosScores {
    let calc = |section: &str, item_count: u32| {
        gated(&section_values(answers, questions, section), item_count, |values| {
            let sum: f64 = values.iter().sum();
            let denom = LIKERT_MAX * values.len() as f64;
            round1(100.0 - (sum * 100.0) / denom)
        })
    };

    let [symptoms, pain, adl, sport, qol] = SUBSCALES.map(|(key, count)| calc(key, count));
    KoosScores {
        symptoms,
        pain,
        adl,
        sport,
        qol,
    }
}

/// KOOS: Knee injury and Osteoarthritis Outcome Score.
/// 42 items rated 0–4 across five independent subscales.
pub struct Koos;

static OPTIONS: LazyLock<Vec<AnswerOption>> = LazyLock::new(|| {
    vec![
        AnswerOption::new("Nunca / Ninguno / En absoluto", 0),
        AnswerOption::new("Rara vez / Leve / Ligeramente / Mensual", 1),
        AnswerOption::new("A veces / Moderado / Semanal", 2),
        AnswerOption::new("A menudo / Severo / Diario", 3),
        AnswerOption::new("Siempre / Extremo / Constante / Totalmente", 4),
    ]
});

static SECTIONS: LazyLock<Vec<Section>> = LazyLock::new(|| {
    let titles = [
        "Síntomas",
        "Dolor",
        "Función — Vida diaria",
        "Función — Deportes/Recreación",
        "Calidad de vida",
    ];
    SUBSCALES
        .iter()
        .zip(titles)
        .map(|((key, count), title)| Section::new(key, title, *count))
        .collect()
});

static QUESTIONS: LazyLock<Vec<Question>> = LazyLock::new(|| {
    let items = [
        ("S1", "symptoms", "¿Tiene hinchazón en la rodilla?"),
        ("S2", "symptoms", "¿Crujido/chasquido o ruido al mover la rodilla?"),
        ("S3", "symptoms", "¿Se bloquea o se 'engancha' la rodilla al moverse?"),
        ("S4", "symptoms", "¿Puede enderezar completamente la rodilla?"),
        ("S5", "symptoms", "¿Puede doblar completamente la rodilla?"),
        ("S6", "symptoms", "Rigidez después de despertarse por la mañana."),
        ("S7", "symptoms", "Rigidez tras estar sentado/tumbado/descansando."),
        ("P1", "pain", "¿Con qué frecuencia experimenta dolor de rodilla?"),
        ("P2", "pain", "Dolor al girar o pivotar sobre su rodilla."),
        ("P3", "pain", "Dolor al enderezar completamente la rodilla."),
        ("P4", "pain", "Dolor al doblar completamente la rodilla."),
        ("P5", "pain", "Dolor al caminar sobre superficie plana."),
        ("P6", "pain", "Dolor al subir o bajar escaleras."),
        ("P7", "pain", "Dolor por la noche en la cama."),
        ("P8", "pain", "Dolor al estar sentado o acostado."),
        ("P9", "pain", "Dolor al estar de pie."),
        ("A1", "adl", "Bajar escaleras."),
        ("A2", "adl", "Subir escaleras."),
        ("A3", "adl", "Levantarse de una silla."),
        ("A4", "adl", "Estar de pie."),
        ("A5", "adl", "Agacharse hasta el suelo."),
        ("A6", "adl", "Caminar sobre superficie plana."),
        ("A7", "adl", "Entrar o salir de un coche."),
        ("A8", "adl", "Ir de compras."),
        ("A9", "adl", "Ponerse calcetines/medias."),
        ("A10", "adl", "Levantarse de la cama."),
        ("A11", "adl", "Quitarse calcetines/medias."),
        ("A12", "adl", "Estar acostado en la cama."),
        ("A13", "adl", "Entrar o salir de la ducha/bañera."),
        ("A14", "adl", "Estar sentado."),
        ("A15", "adl", "Sentarse/levantarse del inodoro."),
        ("A16", "adl", "Tareas domésticas pesadas."),
        ("A17", "adl", "Tareas domésticas ligeras."),
        ("SP1", "sport", "Ponerse en cuclillas."),
        ("SP2", "sport", "Correr."),
        ("SP3", "sport", "Saltar."),
        ("SP4", "sport", "Girar/pivotar sobre la rodilla lesionada."),
        ("SP5", "sport", "Arrodillarse."),
        ("Q1", "qol", "Frecuencia con la que es consciente del problema de rodilla."),
        ("Q2", "qol", "¿Ha modificado su estilo de vida por la rodilla?"),
        ("Q3", "qol", "Preocupación por falta de confianza en su rodilla."),
        ("Q4", "qol", "Dificultad general con su rodilla."),
    ];

    items
        .iter()
        .map(|(id, section, text)| Question::radio(id, section, text, &OPTIONS))
        .collect()
});

/// The KOOS question catalog.
pub fn questions() -> &'static [Question] {
    &QUESTIONS
}

impl Instrument for Koos {
    fn id(&self) -> &str {
        "koos"
    }

    fn name(&self) -> &str {
        "KOOS"
    }

    fn sections(&self) -> &[Section] {
        &SECTIONS
    }

    fn questions(&self) -> &[Question] {
        &QUESTIONS
    }

    fn score(&self, answers: &AnswerMap) -> InstrumentScore {
        InstrumentScore::Koos(compute_koos_scores(answers, self.questions()))
    }
}
