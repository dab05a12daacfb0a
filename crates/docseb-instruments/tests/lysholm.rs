use docseb_instruments::instruments::lysholm::{
    compute_lysholm_score, find_tegner_label, interpret_lysholm, lysholm_questions,
    tegner_question, LysholmBand, LysholmTegner, LYSHOLM_MAX,
};
use docseb_instruments::scoring::{AnswerMap, AnswerOption, Question};
use docseb_instruments::{Instrument, InstrumentScore};

#[test]
fn sum_counts_only_answered_items() {
    let options = [AnswerOption::new("x", 25)];
    let catalog: Vec<Question> = ["a", "b", "c", "d"]
        .iter()
        .map(|id| Question::radio(id, "lysholm", id, &options))
        .collect();
    let answers: AnswerMap = [("a", 10), ("b", 20), ("c", 5)].into_iter().collect();

    let result = compute_lysholm_score(&answers, &catalog);
    assert_eq!(result.score, 35.0);
    assert_eq!(result.max, 100);
    assert_eq!(result.answered_count, 3);
}

#[test]
fn empty_form_scores_zero_without_a_gate() {
    let result = compute_lysholm_score(&AnswerMap::new(), lysholm_questions());
    assert_eq!(result.score, 0.0);
    assert_eq!(result.answered_count, 0);
}

#[test]
fn catalog_items_weigh_up_to_hundred() {
    assert_eq!(lysholm_questions().len(), 8);
    let max: f64 = lysholm_questions().iter().map(|q| q.max_value()).sum();
    assert_eq!(max, f64::from(LYSHOLM_MAX));
}

#[test]
fn interpretation_bands_are_half_open() {
    assert_eq!(interpret_lysholm(100.0).band, LysholmBand::Good);
    assert_eq!(interpret_lysholm(84.0).label, "Muy bueno / Bueno");
    assert_eq!(interpret_lysholm(83.9).label, "Regular");
    assert_eq!(interpret_lysholm(65.0).label, "Regular");
    assert_eq!(interpret_lysholm(64.9).label, "Malo");
    assert_eq!(interpret_lysholm(0.0).band, LysholmBand::Poor);
}

#[test]
fn interpretation_carries_band_colors() {
    assert_eq!(interpret_lysholm(90.0).color, "#16a34a");
    assert_eq!(interpret_lysholm(70.0).color, "#ca8a04");
    assert_eq!(interpret_lysholm(10.0).color, "#dc2626");
}

#[test]
fn tegner_label_matches_exact_level() {
    let label = find_tegner_label(7.0, tegner_question());
    assert!(label.starts_with("Nivel 7:"), "{label}");
    assert!(find_tegner_label(0.0, tegner_question()).starts_with("Nivel 0:"));
}

#[test]
fn tegner_label_without_match_is_empty() {
    assert_eq!(find_tegner_label(11.0, tegner_question()), "");
    assert_eq!(find_tegner_label(3.5, tegner_question()), "");
    assert_eq!(find_tegner_label(-1.0, tegner_question()), "");
}

#[test]
fn instrument_report_keeps_tegner_out_of_the_sum() {
    let answers: AnswerMap = [
        ("limp", 5),
        ("support", 5),
        ("locking", 15),
        ("instability", 25),
        ("pain", 20),
        ("swelling", 10),
        ("stairs", 6),
        ("tegner_level", 6),
    ]
    .into_iter()
    .collect();

    let InstrumentScore::LysholmTegner(report) = LysholmTegner.score(&answers) else {
        panic!("expected a Lysholm-Tegner report");
    };
    assert_eq!(report.lysholm.score, 86.0);
    assert_eq!(report.lysholm.answered_count, 7);
    assert_eq!(report.interpretation.band, LysholmBand::Good);
    assert_eq!(report.tegner_level, Some(6.0));
    assert!(report.tegner_label.starts_with("Nivel 6:"));
}

#[test]
fn report_without_tegner_answer_has_empty_label() {
    let answers: AnswerMap = [("pain", 0)].into_iter().collect();
    let InstrumentScore::LysholmTegner(report) = LysholmTegner.score(&answers) else {
        panic!("expected a Lysholm-Tegner report");
    };
    assert_eq!(report.tegner_level, None);
    assert_eq!(report.tegner_label, "");
    assert_eq!(report.interpretation.label, "Malo");
}

#[test]
fn scoring_is_idempotent() {
    let answers: AnswerMap = [("limp", 3), ("pain", 15), ("stairs", 6), ("tegner_level", 4)]
        .into_iter()
        .collect();

    let first = compute_lysholm_score(&answers, lysholm_questions());
    let second = compute_lysholm_score(&answers, lysholm_questions());
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );

    let first = LysholmTegner.score(&answers);
    let second = LysholmTegner.score(&answers);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
