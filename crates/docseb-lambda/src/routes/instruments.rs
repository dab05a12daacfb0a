use axum::extract::{Path, Query};
use axum::Json;
use serde::{Deserialize, Serialize};

use docseb_instruments::instruments::lysholm::{interpret_lysholm, LysholmInterpretation};
use docseb_instruments::scoring::{AnswerMap, Question, Section, ValidationError};
use docseb_instruments::{all_instruments, require_instrument, InstrumentScore};

use crate::error::ApiError;

#[derive(Serialize)]
pub struct InstrumentSummary {
    id: String,
    name: String,
}

#[derive(Serialize)]
pub struct InstrumentDetail {
    id: String,
    name: String,
    sections: Vec<Section>,
    questions: Vec<Question>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ScoreParams {
    /// Reject answers that do not fit the catalog instead of reporting them.
    #[serde(default)]
    strict: bool,
}

#[derive(Serialize)]
pub struct ScoreResponse {
    result: InstrumentScore,
    warnings: Vec<ValidationError>,
}

#[derive(Debug, Deserialize)]
pub struct InterpretParams {
    score: f64,
}

pub async fn list_instruments() -> Json<Vec<InstrumentSummary>> {
    let instruments: Vec<InstrumentSummary> = all_instruments()
        .iter()
        .map(|i| InstrumentSummary {
            id: i.id().to_string(),
            name: i.name().to_string(),
        })
        .collect();
    Json(instruments)
}

pub async fn get_instrument_detail(
    Path(id): Path<String>,
) -> Result<Json<InstrumentDetail>, ApiError> {
    let instrument = require_instrument(&id)?;

    Ok(Json(InstrumentDetail {
        id: instrument.id().to_string(),
        name: instrument.name().to_string(),
        sections: instrument.sections().to_vec(),
        questions: instrument.questions().to_vec(),
    }))
}

pub async fn score_instrument(
    Path(id): Path<String>,
    Query(params): Query<ScoreParams>,
    Json(answers): Json<AnswerMap>,
) -> Result<Json<ScoreResponse>, ApiError> {
    let instrument = require_instrument(&id)?;
    if params.strict {
        instrument.ensure_valid(&answers)?;
    }

    let warnings = instrument.validate_answers(&answers);
    let result = instrument.score(&answers);
    tracing::info!(
        instrument = %id,
        answers = answers.len(),
        warnings = warnings.len(),
        "instrument_scored"
    );

    Ok(Json(ScoreResponse { result, warnings }))
}

pub async fn interpret_lysholm_score(
    Query(params): Query<InterpretParams>,
) -> Json<LysholmInterpretation> {
    Json(interpret_lysholm(params.score))
}
