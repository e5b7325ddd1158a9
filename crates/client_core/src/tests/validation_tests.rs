use super::*;

fn form(name: &str, superpower: &str, score: &str) -> SuperheroForm {
    SuperheroForm::new(name, superpower, score)
}

#[test]
fn accepts_valid_record_and_trims_text() {
    let hero = validate(&form("  Orion ", "Flight", "7")).expect("valid");
    assert_eq!(hero.name, "Orion");
    assert_eq!(hero.superpower, "Flight");
    assert_eq!(hero.humility_score.get(), 7);
}

#[test]
fn empty_name_is_rejected_with_name_message() {
    let errors = validate(&form("", "X", "5")).expect_err("must reject");
    assert_eq!(errors.get(FormField::Name), Some(NAME_REQUIRED));
    assert_eq!(errors.len(), 1);
}

#[test]
fn whitespace_only_superpower_is_rejected() {
    let errors = validate(&form("Orion", "   ", "5")).expect_err("must reject");
    assert_eq!(errors.get(FormField::Superpower), Some(SUPERPOWER_REQUIRED));
    assert!(errors.get(FormField::Name).is_none());
}

#[test]
fn every_integer_in_range_is_accepted() {
    for score in 1..=10 {
        let hero = validate(&form("A", "B", &score.to_string())).expect("in range");
        assert_eq!(i64::from(hero.humility_score), score);
    }
}

#[test]
fn out_of_range_scores_are_rejected() {
    let cases = [
        ("0", "Must be at least 1"),
        ("-3", "Must be at least 1"),
        ("0.5", "Must be at least 1"),
        ("11", "Cannot be more than 10"),
        ("10.5", "Cannot be more than 10"),
        ("1000000", "Cannot be more than 10"),
    ];
    for (raw, expected) in cases {
        let errors = validate(&form("A", "B", raw)).expect_err(raw);
        assert_eq!(errors.get(FormField::HumilityScore), Some(expected), "{raw}");
    }
}

#[test]
fn non_numeric_scores_are_rejected() {
    for raw in ["seven", "7a", "NaN", "inf", "--1"] {
        let errors = validate(&form("A", "B", raw)).expect_err(raw);
        assert_eq!(
            errors.get(FormField::HumilityScore),
            Some(MUST_BE_A_NUMBER),
            "{raw}"
        );
    }
}

#[test]
fn missing_and_fractional_scores_have_distinct_messages() {
    let errors = validate(&form("A", "B", "  ")).expect_err("blank");
    assert_eq!(
        errors.get(FormField::HumilityScore),
        Some(HUMILITY_SCORE_REQUIRED)
    );

    let errors = validate(&form("A", "B", "4.5")).expect_err("fractional");
    assert_eq!(
        errors.get(FormField::HumilityScore),
        Some(MUST_BE_WHOLE_NUMBER)
    );

    let hero = validate(&form("A", "B", " 4.0 ")).expect("whole float");
    assert_eq!(hero.humility_score.get(), 4);
}

#[test]
fn reports_every_failing_field_at_once() {
    let errors = validate(&SuperheroForm::default()).expect_err("empty form");
    let fields: Vec<_> = errors.iter().map(|(field, _)| field).collect();
    assert_eq!(
        fields,
        [FormField::Name, FormField::Superpower, FormField::HumilityScore]
    );
}

#[test]
fn single_field_revalidation_clears_once_input_is_fixed() {
    let mut input = form("", "Flight", "7");
    assert_eq!(
        validate_field(&input, FormField::Name).as_deref(),
        Some(NAME_REQUIRED)
    );
    input.name = "Orion".to_string();
    assert_eq!(validate_field(&input, FormField::Name), None);
    assert_eq!(validate_field(&input, FormField::HumilityScore), None);
}
