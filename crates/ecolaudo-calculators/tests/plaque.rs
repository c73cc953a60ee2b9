use ecolaudo_calculators::plaque::{
    calculate_plaque_risk, GrayWeale, PlaqueRiskInput, PlaqueRiskLevel, MAX_SCORE,
};

fn echo(text: &str) -> PlaqueRiskInput {
    PlaqueRiskInput {
        echogenicity: Some(text.to_string()),
        ..PlaqueRiskInput::default()
    }
}

#[test]
fn compound_phrase_matches_keyword_by_containment() {
    // "hipoecogênica (lipídica)" contains the "hipoecogênica" keyword.
    let result = calculate_plaque_risk(&echo("hipoecogênica (lipídica)"));
    assert_eq!(result.vulnerability_score, 3);
    assert_eq!(result.gray_weale, Some(GrayWeale::I));
}

#[test]
fn matching_works_in_the_other_direction_too() {
    // "mista" is a fragment of the "mista (fibrocalcificada)" keyword, which
    // precedes the exact "mista" entry in the table.
    let result = calculate_plaque_risk(&PlaqueRiskInput {
        composition: Some("mista".to_string()),
        ..PlaqueRiskInput::default()
    });
    assert_eq!(result.vulnerability_score, 1);
}

#[test]
fn matching_is_case_insensitive_on_echogenicity() {
    let result = calculate_plaque_risk(&echo("Hipoecogênica"));
    assert_eq!(result.vulnerability_score, 3);
    assert_eq!(result.gray_weale, Some(GrayWeale::I));
}

#[test]
fn first_table_entry_wins_on_ambiguity() {
    // "hiperecogênica" is a substring of "predominantemente hiperecogênica",
    // which comes earlier in the table than the exact "hiperecogênica"
    // entry, so the bidirectional match lands on Gray-Weale IV.
    let result = calculate_plaque_risk(&echo("hiperecogênica"));
    assert_eq!(result.vulnerability_score, 0);
    assert_eq!(result.gray_weale, Some(GrayWeale::IV));
}

#[test]
fn absent_fields_contribute_nothing() {
    let result = calculate_plaque_risk(&PlaqueRiskInput::default());
    assert_eq!(result.vulnerability_score, 0);
    assert_eq!(result.risk_level, PlaqueRiskLevel::Low);
    assert_eq!(result.gray_weale, None);
    assert!(result.factors.is_empty());
}

#[test]
fn symptomatic_flag_adds_two_points_and_a_factor() {
    let input = PlaqueRiskInput {
        has_symptoms: true,
        ..PlaqueRiskInput::default()
    };
    let result = calculate_plaque_risk(&input);
    assert_eq!(result.vulnerability_score, 2);
    assert_eq!(result.factors, vec!["Sintomático".to_string()]);
}

#[test]
fn risk_bands_match_documented_breakpoints() {
    // 2 points: low.
    let low = calculate_plaque_risk(&PlaqueRiskInput {
        composition: Some("heterogênea".to_string()),
        ..PlaqueRiskInput::default()
    });
    assert_eq!(low.vulnerability_score, 2);
    assert_eq!(low.risk_level, PlaqueRiskLevel::Low);

    // 3 points: moderate.
    let moderate = calculate_plaque_risk(&echo("hipoecogênica"));
    assert_eq!(moderate.risk_level, PlaqueRiskLevel::Moderate);

    // 5 points: high.
    let high = calculate_plaque_risk(&PlaqueRiskInput {
        echogenicity: Some("hipoecogênica".to_string()),
        composition: Some("heterogênea".to_string()),
        ..PlaqueRiskInput::default()
    });
    assert_eq!(high.vulnerability_score, 5);
    assert_eq!(high.risk_level, PlaqueRiskLevel::High);

    // 8 points: very high.
    let very_high = calculate_plaque_risk(&PlaqueRiskInput {
        echogenicity: Some("hipoecogênica".to_string()),
        composition: Some("heterogênea".to_string()),
        surface: Some("ulcerada".to_string()),
        ..PlaqueRiskInput::default()
    });
    assert_eq!(very_high.vulnerability_score, 8);
    assert_eq!(very_high.risk_level, PlaqueRiskLevel::VeryHigh);
    assert!(very_high.recommendation.contains("urgente"));
}

#[test]
fn stenosis_grades_score_by_keyword() {
    let critical = calculate_plaque_risk(&PlaqueRiskInput {
        stenosis_grade: Some("90-99% (crítica)".to_string()),
        ..PlaqueRiskInput::default()
    });
    assert_eq!(critical.vulnerability_score, 3);
    assert!(critical.factors.iter().any(|f| f.starts_with("Estenose:")));

    let mild = calculate_plaque_risk(&PlaqueRiskInput {
        stenosis_grade: Some("<50% (leve)".to_string()),
        ..PlaqueRiskInput::default()
    });
    assert_eq!(mild.vulnerability_score, 0);
}

#[test]
fn factors_respect_per_feature_thresholds() {
    // Isoechoic scores 1, below the echogenicity reporting threshold of 2:
    // it contributes to the score but not to the factors list.
    let result = calculate_plaque_risk(&PlaqueRiskInput {
        echogenicity: Some("isoecogênica".to_string()),
        composition: Some("mista".to_string()),
        ..PlaqueRiskInput::default()
    });

    assert_eq!(result.vulnerability_score, 2);
    assert_eq!(result.factors.len(), 1);
    assert!(result.factors[0].starts_with("Composição:"));
}

#[test]
fn factor_text_names_the_gray_weale_type() {
    let result = calculate_plaque_risk(&echo("hipoecogênica (lipídica)"));
    assert_eq!(
        result.factors,
        vec!["Ecogenicidade: hipoecogênica (lipídica) (Gray-Weale tipo I)".to_string()]
    );
}

#[test]
fn max_score_is_derived_from_the_tables() {
    // echogenicity 3 + composition 2 + surface 3 + stenosis 3 + symptoms 2.
    assert_eq!(MAX_SCORE, 13);
    let result = calculate_plaque_risk(&PlaqueRiskInput::default());
    assert_eq!(result.max_score, MAX_SCORE);
}

#[test]
fn matching_is_case_insensitive() {
    let result = calculate_plaque_risk(&PlaqueRiskInput {
        surface: Some("ULCERADA".to_string()),
        ..PlaqueRiskInput::default()
    });
    assert_eq!(result.vulnerability_score, 3);
}

#[test]
fn calculation_is_deterministic() {
    let input = PlaqueRiskInput {
        echogenicity: Some("predominantemente hipoecogênica (tipo II)".to_string()),
        composition: Some("heterogênea".to_string()),
        surface: Some("irregular".to_string()),
        stenosis_grade: Some("50-69% (moderada)".to_string()),
        has_symptoms: true,
    };

    let first = calculate_plaque_risk(&input);
    let second = calculate_plaque_risk(&input);
    assert_eq!(first.vulnerability_score, second.vulnerability_score);
    assert_eq!(first.factors, second.factors);
    assert_eq!(first.risk_level, second.risk_level);
}
