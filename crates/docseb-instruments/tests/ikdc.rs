use docseb_instruments::instruments::ikdc::{compute_ikdc_score, questions, IkdcScore};
use docseb_instruments::scoring::{AnswerMap, AnswerOption, Question, QuestionType};

/// Answer the first `count` scorable questions with their maximum value.
fn answer_scorable(count: usize) -> AnswerMap {
    questions()
        .iter()
        .filter(|q| !q.exclude_from_score)
        .take(count)
        .map(|q| (q.id.clone(), q.max_value()))
        .collect()
}

#[test]
fn catalog_has_eighteen_scorable_items() {
    assert_eq!(questions().len(), 19);
    let scorable: Vec<&Question> = questions().iter().filter(|q| !q.exclude_from_score).collect();
    assert_eq!(scorable.len(), 18);
    let max: f64 = scorable.iter().map(|q| q.max_value()).sum();
    assert_eq!(max, 87.0);
}

#[test]
fn fifteen_answers_are_not_enough() {
    let result = compute_ikdc_score(&answer_scorable(15), questions());
    assert_eq!(
        result,
        IkdcScore {
            valid: false,
            score: 0.0,
            max_possible: 0.0,
            answered: 15,
        }
    );
}

#[test]
fn sixteen_answers_score_against_every_scorable_item() {
    let result = compute_ikdc_score(&answer_scorable(16), questions());
    assert!(result.valid);
    assert_eq!(result.answered, 16);
    assert_eq!(result.max_possible, 87.0);
    // 73 of 87
    assert_eq!(result.score, 84.0);
}

#[test]
fn complete_best_form_scores_hundred() {
    let result = compute_ikdc_score(&answer_scorable(18), questions());
    assert_eq!(result.score, 100.0);
    assert_eq!(result.answered, 18);
}

#[test]
fn excluded_question_never_counts() {
    let mut answers = answer_scorable(15);
    answers.set("ikdc_10a", 10);
    let result = compute_ikdc_score(&answers, questions());
    assert!(!result.valid);
    assert_eq!(result.answered, 15);

    let mut answers = answer_scorable(18);
    answers.set("ikdc_10a", 0);
    let with_excluded = compute_ikdc_score(&answers, questions());
    assert_eq!(with_excluded.max_possible, 87.0);
    assert_eq!(with_excluded.score, 100.0);
}

#[test]
fn max_possible_uses_option_max_and_scale_default() {
    let options = [AnswerOption::new("no", 0), AnswerOption::new("sí", 3)];
    let mut catalog: Vec<Question> = (0..16)
        .map(|i| Question::radio(&format!("r{i}"), "s", "radio", &options))
        .collect();
    let mut unbounded = Question::scale10("open", "s", "scale");
    unbounded.max = None;
    catalog.push(unbounded);
    catalog.push(Question::scale10("ignored", "s", "excluded").excluded());
    assert_eq!(catalog[16].kind, QuestionType::Scale10);

    let answers: AnswerMap = (0..16).map(|i| (format!("r{i}"), 3)).collect();
    let result = compute_ikdc_score(&answers, &catalog);
    assert!(result.valid);
    assert_eq!(result.max_possible, 16.0 * 3.0 + 10.0);
    // 48 of 58
    assert_eq!(result.score, 83.0);
}

#[test]
fn scoring_is_idempotent() {
    let answers = answer_scorable(17);
    assert_eq!(
        compute_ikdc_score(&answers, questions()),
        compute_ikdc_score(&answers, questions())
    );
}
