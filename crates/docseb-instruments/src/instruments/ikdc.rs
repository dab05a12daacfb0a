use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::scoring::{AnswerMap, AnswerOption, Question, Section};
use crate::{Instrument, InstrumentScore};

/// Scorable items that must be answered before the total is trusted.
/// Fixed for the 18-item form rather than derived from a ratio.
pub const MIN_ANSWERED: usize = 16;

/// IKDC overall result.
///
/// An incomplete form reports `score: 0` and `max_possible: 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct IkdcScore {
    pub valid: bool,
    pub score: f64,
    pub max_possible: f64,
    pub answered: u32,
}

/// Percentage of the maximum obtainable sum, rounded to an integer.
///
/// The maximum always spans every scorable question, answered or not.
pub fn compute_ikdc_score(answers: &AnswerMap, questions: &[Question]) -> IkdcScore {
    let scorable: Vec<&Question> = questions.iter().filter(|q| !q.exclude_from_score).collect();
    let answered: Vec<f64> = scorable.iter().filter_map(|q| answers.value(&q.id)).collect();

    if answered.len() < MIN_ANSWERED {
        return IkdcScore {
            valid: false,
            score: 0.0,
            max_possible: 0.0,
            answered: answered.len() as u32,
        };
    }

    let sum: f64 = answered.iter().sum();
    let max_possible: f64 = scorable.iter().map(|q| q.max_value()).sum();
    let score = if max_possible > 0.0 {
        (sum / max_possible * 100.0).round()
    } else {
        0.0
    };

    IkdcScore {
        valid: true,
        score,
        max_possible,
        answered: answered.len() as u32,
    }
}

/// IKDC: International Knee Documentation Committee subjective knee form.
/// 19 items, 18 scored; pre-injury function is informational only.
pub struct Ikdc;

fn activity_options() -> Vec<AnswerOption> {
    vec![
        AnswerOption::new("Incapaz de realizar ninguna de las actividades anteriores", 0),
        AnswerOption::new("Actividades ligeras, como caminar, tareas domésticas o jardinería", 1),
        AnswerOption::new("Actividades moderadas, como trabajo físico moderado, correr o trotar", 2),
        AnswerOption::new("Actividades intensas, como trabajo físico pesado, esquí o tenis", 3),
        AnswerOption::new("Actividades muy intensas, como saltar o girar, en baloncesto o fútbol", 4),
    ]
}

fn difficulty_options() -> Vec<AnswerOption> {
    vec![
        AnswerOption::new("Incapaz de hacerlo", 0),
        AnswerOption::new("Extremadamente difícil", 1),
        AnswerOption::new("Moderadamente difícil", 2),
        AnswerOption::new("Mínimamente difícil", 3),
        AnswerOption::new("Nada difícil", 4),
    ]
}

static SECTIONS: LazyLock<Vec<Section>> = LazyLock::new(|| {
    vec![
        Section::new("symptoms", "Síntomas", 7),
        Section::new("activity", "Actividades deportivas", 10),
        Section::new("function", "Función", 2).with_instruction(
            "Califique la función de su rodilla en una escala de 0 a 10, \
             donde 10 es función normal y excelente y 0 es incapacidad total.",
        ),
    ]
});

static QUESTIONS: LazyLock<Vec<Question>> = LazyLock::new(|| {
    let activity = activity_options();
    let difficulty = difficulty_options();
    let stiffness = vec![
        AnswerOption::new("Nada", 4),
        AnswerOption::new("Leve", 3),
        AnswerOption::new("Moderada", 2),
        AnswerOption::new("Mucha", 1),
        AnswerOption::new("Extrema", 0),
    ];
    let locking = vec![AnswerOption::new("Sí", 0), AnswerOption::new("No", 1)];

    let mut questions = vec![
        Question::radio(
            "ikdc_1",
            "symptoms",
            "¿Cuál es el nivel de actividad más alto que puede realizar sin dolor importante en la rodilla?",
            &activity,
        ),
        Question::scale10(
            "ikdc_2",
            "symptoms",
            "Durante las últimas 4 semanas, ¿con qué frecuencia ha tenido dolor? (10 = nunca)",
        ),
        Question::scale10(
            "ikdc_3",
            "symptoms",
            "Si tiene dolor, ¿qué tan intenso es? (10 = sin dolor)",
        ),
        Question::radio(
            "ikdc_4",
            "symptoms",
            "Durante las últimas 4 semanas, ¿qué tan rígida o hinchada estuvo su rodilla?",
            &stiffness,
        ),
        Question::radio(
            "ikdc_5",
            "symptoms",
            "¿Cuál es el nivel de actividad más alto que puede realizar sin que se hinche la rodilla?",
            &activity,
        ),
        Question::radio(
            "ikdc_6",
            "symptoms",
            "Durante las últimas 4 semanas, ¿se le ha bloqueado o trabado la rodilla?",
            &locking,
        ),
        Question::radio(
            "ikdc_7",
            "symptoms",
            "¿Cuál es el nivel de actividad más alto que puede realizar sin que la rodilla ceda?",
            &activity,
        ),
        Question::radio(
            "ikdc_8",
            "activity",
            "¿Cuál es el nivel de actividad más alto que puede realizar de forma habitual?",
            &activity,
        ),
    ];

    let tasks = [
        ("ikdc_9a", "Subir escaleras."),
        ("ikdc_9b", "Bajar escaleras."),
        ("ikdc_9c", "Arrodillarse sobre la parte delantera de la rodilla."),
        ("ikdc_9d", "Ponerse en cuclillas."),
        ("ikdc_9e", "Sentarse con la rodilla doblada."),
        ("ikdc_9f", "Levantarse de una silla."),
        ("ikdc_9g", "Correr en línea recta."),
        ("ikdc_9h", "Saltar y caer sobre la pierna afectada."),
        ("ikdc_9i", "Detenerse y arrancar rápidamente."),
    ];
    questions.extend(
        tasks
            .iter()
            .map(|(id, text)| Question::radio(id, "activity", text, &difficulty)),
    );

    questions.push(
        Question::scale10("ikdc_10a", "function", "Función antes de la lesión de rodilla.").excluded(),
    );
    questions.push(Question::scale10("ikdc_10b", "function", "Función actual de su rodilla."));
    questions
});

/// The IKDC question catalog.
pub fn questions() -> &'static [Question] {
    &QUESTIONS
}

impl Instrument for Ikdc {
    fn id(&self) -> &str {
        "ikdc"
    }

    fn name(&self) -> &str {
        "IKDC"
    }

    fn sections(&self) -> &[Section] {
        &SECTIONS
    }

    fn questions(&self) -> &[Question] {
        &QUESTIONS
    }

    fn score(&self, answers: &AnswerMap) -> InstrumentScore {
        InstrumentScore::Ikdc(compute_ikdc_score(answers, self.questions()))
    }
}
