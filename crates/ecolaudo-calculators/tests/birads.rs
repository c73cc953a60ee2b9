use ecolaudo_calculators::birads::{
    calculate_birads, score_details, validate_lesion, BiradsCategory, BreastLesion, Calcifications,
    EchoPattern, LesionKind, Margins, Orientation, PosteriorFeature, Shape, Side, SuspicionLevel,
    Vascularity,
};

fn simple_cyst() -> BreastLesion {
    BreastLesion {
        side: Some(Side::Right),
        kind: Some(LesionKind::Cyst),
        size: Some("1.2 x 0.8 cm".to_string()),
        shape: Some(Shape::Oval),
        margins: Some(Margins::Circumscribed),
        echo_pattern: Some(EchoPattern::Anechoic),
        posterior: Some(PosteriorFeature::Enhancement),
        calcifications: Some(Calcifications::Absent),
        vascularity: Some(Vascularity::Absent),
        ..BreastLesion::default()
    }
}

#[test]
fn simple_cyst_is_category_2() {
    let result = calculate_birads(&simple_cyst());

    assert_eq!(result.category, BiradsCategory::C2);
    assert_eq!(result.suspicion, SuspicionLevel::Benign);
    assert!(result.total_points <= 0);
    assert!(!result.details.is_empty());
    assert!(result.recommendation.starts_with("Cisto simples detectado."));
}

#[test]
fn simple_cyst_accepts_round_shape() {
    let lesion = BreastLesion {
        shape: Some(Shape::Round),
        ..simple_cyst()
    };
    assert_eq!(calculate_birads(&lesion).category, BiradsCategory::C2);
}

#[test]
fn score_details_carry_negative_cyst_markers() {
    let details = score_details(&simple_cyst());

    let echo = details.iter().find(|d| d.lexicon == "Padrão de Eco").unwrap();
    assert_eq!(echo.points, -1);

    let posterior = details
        .iter()
        .find(|d| d.lexicon == "Características Posteriores")
        .unwrap();
    assert_eq!(posterior.points, -1);
}

#[test]
fn low_score_nodule_is_category_3() {
    // Hypoechoic (+1) only: probably benign.
    let lesion = BreastLesion {
        kind: Some(LesionKind::Nodule),
        shape: Some(Shape::Oval),
        margins: Some(Margins::Circumscribed),
        echo_pattern: Some(EchoPattern::Hypoechoic),
        ..BreastLesion::default()
    };

    let result = calculate_birads(&lesion);
    assert_eq!(result.total_points, 1);
    assert_eq!(result.category, BiradsCategory::C3);
    assert_eq!(result.suspicion, SuspicionLevel::ProbablyBenign);
}

#[test]
fn category_breakpoints_match_documented_table() {
    // One axis at a time around every boundary, built from real lexicons.
    let cases: &[(BreastLesion, BiradsCategory)] = &[
        // 0 points -> 2
        (
            BreastLesion {
                shape: Some(Shape::Oval),
                ..BreastLesion::default()
            },
            BiradsCategory::C2,
        ),
        // 2 points -> 3
        (
            BreastLesion {
                shape: Some(Shape::Irregular),
                ..BreastLesion::default()
            },
            BiradsCategory::C3,
        ),
        // 3 points -> 4A
        (
            BreastLesion {
                margins: Some(Margins::Spiculated),
                ..BreastLesion::default()
            },
            BiradsCategory::C4a,
        ),
        // 5 points -> 4B
        (
            BreastLesion {
                shape: Some(Shape::Irregular),
                margins: Some(Margins::Spiculated),
                ..BreastLesion::default()
            },
            BiradsCategory::C4b,
        ),
        // 7 points -> 4C
        (
            BreastLesion {
                shape: Some(Shape::Irregular),
                margins: Some(Margins::Spiculated),
                orientation: Some(Orientation::NotParallel),
                ..BreastLesion::default()
            },
            BiradsCategory::C4c,
        ),
        // 9 points -> 5
        (
            BreastLesion {
                shape: Some(Shape::Irregular),
                margins: Some(Margins::Spiculated),
                orientation: Some(Orientation::NotParallel),
                calcifications: Some(Calcifications::Micro),
                ..BreastLesion::default()
            },
            BiradsCategory::C5,
        ),
    ];

    for (lesion, expected) in cases {
        let result = calculate_birads(lesion);
        assert_eq!(
            result.category, *expected,
            "score {} mapped to {:?}",
            result.total_points, result.category
        );
    }
}

#[test]
fn calculation_is_deterministic() {
    let lesion = BreastLesion {
        kind: Some(LesionKind::Nodule),
        shape: Some(Shape::Irregular),
        margins: Some(Margins::Microlobulated),
        echo_pattern: Some(EchoPattern::Heterogeneous),
        vascularity: Some(Vascularity::Marked),
        ..BreastLesion::default()
    };

    let first = calculate_birads(&lesion);
    let second = calculate_birads(&lesion);
    assert_eq!(first.total_points, second.total_points);
    assert_eq!(first.category, second.category);
    assert_eq!(first.recommendation, second.recommendation);
}

#[test]
fn raising_one_axis_never_lowers_the_score() {
    let base = BreastLesion {
        kind: Some(LesionKind::Nodule),
        shape: Some(Shape::Oval),
        margins: Some(Margins::Indistinct),
        echo_pattern: Some(EchoPattern::Isoechoic),
        ..BreastLesion::default()
    };
    let raised = BreastLesion {
        echo_pattern: Some(EchoPattern::Hypoechoic),
        ..base.clone()
    };

    assert!(calculate_birads(&raised).total_points >= calculate_birads(&base).total_points);
}

#[test]
fn category_ordering_is_ordinal() {
    assert!(BiradsCategory::C4c > BiradsCategory::C4b);
    assert!(BiradsCategory::C4b > BiradsCategory::C4a);
    assert!(BiradsCategory::C4a > BiradsCategory::C3);
    assert!(BiradsCategory::C6 > BiradsCategory::C5);
}

#[test]
fn category_parses_from_display_form() {
    assert_eq!("4B".parse::<BiradsCategory>().unwrap(), BiradsCategory::C4b);
    assert_eq!("4b".parse::<BiradsCategory>().unwrap(), BiradsCategory::C4b);
    assert_eq!(BiradsCategory::C4b.to_string(), "4B");
    assert!("7".parse::<BiradsCategory>().is_err());
}

#[test]
fn spiculated_cyst_fails_validation() {
    let lesion = BreastLesion {
        kind: Some(LesionKind::Cyst),
        echo_pattern: Some(EchoPattern::Anechoic),
        margins: Some(Margins::Spiculated),
        ..BreastLesion::default()
    };

    let errors = validate_lesion(&lesion);
    assert!(errors.iter().any(|e| e.contains("margens espiculadas")));
}

#[test]
fn anechoic_with_shadowing_fails_validation() {
    let lesion = BreastLesion {
        echo_pattern: Some(EchoPattern::Anechoic),
        posterior: Some(PosteriorFeature::Shadowing),
        ..BreastLesion::default()
    };

    let errors = validate_lesion(&lesion);
    assert!(errors.iter().any(|e| e.contains("sombra acústica")));
}

#[test]
fn bare_nodule_fails_validation() {
    let lesion = BreastLesion {
        kind: Some(LesionKind::Nodule),
        ..BreastLesion::default()
    };

    let errors = validate_lesion(&lesion);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("sem características definidas"));
}

#[test]
fn consistent_lesion_passes_validation() {
    assert!(validate_lesion(&simple_cyst()).is_empty());
}

#[test]
fn empty_lesion_scores_zero_without_error() {
    let result = calculate_birads(&BreastLesion::default());
    assert_eq!(result.total_points, 0);
    assert_eq!(result.category, BiradsCategory::C2);
    assert!(result.details.is_empty());
}
