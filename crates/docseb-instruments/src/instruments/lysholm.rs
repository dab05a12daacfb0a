use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::scoring::{answered_values, AnswerMap, AnswerOption, Question, Section};
use crate::{Instrument, InstrumentScore};

/// Nominal maximum of the Lysholm sum.
pub const LYSHOLM_MAX: u32 = 100;

/// Section key of the Tegner activity question.
pub const TEGNER_SECTION: &str = "tegner";

/// Id of the Tegner activity question.
pub const TEGNER_QUESTION_ID: &str = "tegner_level";

/// Raw Lysholm sum. There is no completion gate, so a partial form
/// understates the score; `answered_count` lets callers flag that.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LysholmScore {
    pub score: f64,
    pub max: u32,
    pub answered_count: u32,
}

pub fn compute_lysholm_score(answers: &AnswerMap, questions: &[Question]) -> LysholmScore {
    let values = answered_values(answers, questions);
    LysholmScore {
        score: values.iter().sum(),
        max: LYSHOLM_MAX,
        answered_count: values.len() as u32,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum LysholmBand {
    Good,
    Fair,
    Poor,
}

impl LysholmBand {
    pub fn label(self) -> &'static str {
        match self {
            LysholmBand::Good => "Muy bueno / Bueno",
            LysholmBand::Fair => "Regular",
            LysholmBand::Poor => "Malo",
        }
    }

    /// Hex color used to render the band.
    pub fn color(self) -> &'static str {
        match self {
            LysholmBand::Good => "#16a34a",
            LysholmBand::Fair => "#ca8a04",
            LysholmBand::Poor => "#dc2626",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LysholmInterpretation {
    pub band: LysholmBand,
    pub label: String,
    pub color: String,
}

/// Band a Lysholm score: `[84, ∞)` good, `[65, 84)` fair, below 65 poor.
pub fn interpret_lysholm(score: f64) -> LysholmInterpretation {
    let band = if score >= 84.0 {
        LysholmBand::Good
    } else if score >= 65.0 {
        LysholmBand::Fair
    } else {
        LysholmBand::Poor
    };
    LysholmInterpretation {
        band,
        label: band.label().to_string(),
        color: band.color().to_string(),
    }
}

/// Label of the Tegner option whose value is exactly `value`, or `""`.
pub fn find_tegner_label(value: f64, tegner_question: &Question) -> String {
    tegner_question
        .options
        .iter()
        .find(|o| f64::from(o.value) == value)
        .map(|o| o.label.clone())
        .unwrap_or_default()
}

/// Combined Lysholm-Tegner report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LysholmReport {
    pub lysholm: LysholmScore,
    pub interpretation: LysholmInterpretation,
    pub tegner_level: Option<f64>,
    pub tegner_label: String,
}

/// Lysholm knee scoring scale with the Tegner activity level.
/// Eight weighted items summing to 100, plus one ordinal activity question.
pub struct LysholmTegner;

static SECTIONS: LazyLock<Vec<Section>> = LazyLock::new(|| {
    vec![
        Section::new("lysholm", "Escala de Lysholm", 8),
        Section::new(TEGNER_SECTION, "Nivel de actividad de Tegner", 1).with_instruction(
            "Seleccione el nivel de actividad más alto que puede realizar actualmente.",
        ),
    ]
});

static LYSHOLM_QUESTIONS: LazyLock<Vec<Question>> = LazyLock::new(|| {
    let item = |id: &str, text: &str, options: &[(&str, i32)]| {
        let options: Vec<AnswerOption> = options
            .iter()
            .map(|(label, value)| AnswerOption::new(label, *value))
            .collect();
        Question::radio(id, "lysholm", text, &options)
    };

    vec![
        item(
            "limp",
            "Cojera",
            &[("Ninguna", 5), ("Leve o periódica", 3), ("Intensa y constante", 0)],
        ),
        item(
            "support",
            "Uso de apoyo",
            &[
                ("Ninguno", 5),
                ("Bastón o muletas", 2),
                ("Imposible cargar peso", 0),
            ],
        ),
        item(
            "locking",
            "Bloqueo",
            &[
                ("Sin bloqueo ni sensación de enganche", 15),
                ("Sensación de enganche sin bloqueo", 10),
                ("Bloqueo ocasional", 6),
                ("Bloqueo frecuente", 2),
                ("Rodilla bloqueada en la exploración", 0),
            ],
        ),
        item(
            "instability",
            "Inestabilidad",
            &[
                ("Nunca cede", 25),
                ("Rara vez, durante deporte o esfuerzo intenso", 20),
                ("Frecuentemente durante deporte o esfuerzo intenso", 15),
                ("Ocasionalmente en actividades diarias", 10),
                ("A menudo en actividades diarias", 5),
                ("En cada paso", 0),
            ],
        ),
        item(
            "pain",
            "Dolor",
            &[
                ("Ninguno", 25),
                ("Leve e inconstante durante esfuerzo intenso", 20),
                ("Marcado durante esfuerzo intenso", 15),
                ("Marcado al caminar más de 2 km o después", 10),
                ("Marcado al caminar menos de 2 km o después", 5),
                ("Constante", 0),
            ],
        ),
        item(
            "swelling",
            "Hinchazón",
            &[
                ("Ninguna", 10),
                ("Con esfuerzo intenso", 6),
                ("Con esfuerzo habitual", 2),
                ("Constante", 0),
            ],
        ),
        item(
            "stairs",
            "Subir escaleras",
            &[
                ("Sin problemas", 10),
                ("Levemente limitado", 6),
                ("Un escalón a la vez", 2),
                ("Imposible", 0),
            ],
        ),
        item(
            "squatting",
            "Ponerse en cuclillas",
            &[
                ("Sin problemas", 5),
                ("Levemente limitado", 4),
                ("No más allá de 90°", 2),
                ("Imposible", 0),
            ],
        ),
    ]
});

static TEGNER_QUESTION: LazyLock<Question> = LazyLock::new(|| {
    let levels = [
        "Baja por enfermedad o pensión por problemas de rodilla",
        "Trabajo sedentario; caminar en terreno llano",
        "Trabajo ligero; caminar en terreno irregular",
        "Trabajo ligero; natación, senderismo en bosque",
        "Trabajo moderado; ciclismo, esquí de fondo, trotar en terreno llano",
        "Trabajo pesado; ciclismo competitivo, trotar en terreno irregular",
        "Deporte recreativo: tenis, bádminton, balonmano, esquí alpino",
        "Deporte competitivo: tenis, atletismo, motocross; recreativo: fútbol, hockey",
        "Deporte competitivo: ráquetbol, bádminton, atletismo (saltos), esquí alpino",
        "Deporte competitivo: fútbol de divisiones inferiores, hockey sobre hielo, lucha",
        "Deporte competitivo: fútbol nacional o internacional",
    ];
    let options: Vec<AnswerOption> = levels
        .iter()
        .enumerate()
        .map(|(level, description)| AnswerOption::new(&format!("Nivel {level}: {description}"), level as i32))
        .collect();

    Question::radio(
        TEGNER_QUESTION_ID,
        TEGNER_SECTION,
        "Nivel de actividad actual (Tegner)",
        &options,
    )
    .excluded()
});

static QUESTIONS: LazyLock<Vec<Question>> = LazyLock::new(|| {
    let mut questions = LYSHOLM_QUESTIONS.clone();
    questions.push(TEGNER_QUESTION.clone());
    questions
});

/// The eight scored Lysholm items.
pub fn lysholm_questions() -> &'static [Question] {
    &LYSHOLM_QUESTIONS
}

/// The Tegner activity-level question (levels 0–10).
pub fn tegner_question() -> &'static Question {
    &TEGNER_QUESTION
}

impl Instrument for LysholmTegner {
    fn id(&self) -> &str {
        "lysholm_tegner"
    }

    fn name(&self) -> &str {
        "Lysholm-Tegner"
    }

    fn sections(&self) -> &[Section] {
        &SECTIONS
    }

    fn questions(&self) -> &[Question] {
        &QUESTIONS
    }

    fn score(&self, answers: &AnswerMap) -> InstrumentScore {
        let lysholm = compute_lysholm_score(answers, lysholm_questions());
        let tegner_level = answers.value(TEGNER_QUESTION_ID);
        let tegner_label = tegner_level
            .map(|level| find_tegner_label(level, tegner_question()))
            .unwrap_or_default();

        InstrumentScore::LysholmTegner(LysholmReport {
            lysholm,
            interpretation: interpret_lysholm(lysholm.score),
            tegner_level,
            tegner_label,
        })
    }
}
