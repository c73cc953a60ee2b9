use std::collections::BTreeMap;

use ecolaudo_core::models::finding::{FieldValue, FindingInstance, SelectedFinding};
use ecolaudo_core::models::organ::{breast_catalog, Catalog, Finding, Organ, OrganCategory};
use ecolaudo_core::models::report::{abdomen_total_template, ReportData};
use ecolaudo_report::assembler::{
    build_breast_impression, build_breast_report, build_report, finding_description,
};
use ecolaudo_report::error::ReportError;

fn instance(entries: &[(&str, &str)]) -> FindingInstance {
    let measurements: BTreeMap<String, FieldValue> = entries
        .iter()
        .map(|(k, v)| (k.to_string(), FieldValue::from(*v)))
        .collect();
    FindingInstance::with_id("i-1", measurements)
}

fn breast_finding(name: &str, entries: &[(&str, &str)]) -> SelectedFinding {
    let mut selected = SelectedFinding::new(
        "mama-direita",
        "nodulos",
        Finding::new("f-1", name, "catalog description"),
    );
    selected.instances = vec![instance(entries)];
    selected
}

#[test]
fn empty_exam_renders_normal_limits_report() {
    let catalog = breast_catalog();
    let report = build_breast_report(&[], &[], &catalog).unwrap();

    assert!(report.starts_with("# LAUDO DE ULTRASSONOGRAFIA MAMÁRIA"));
    assert!(report.contains("Tecido mamário de ecotextura preservada"));
    assert!(report.contains("dentro dos limites da normalidade"));
    assert!(report.contains("**CLASSIFICAÇÃO:** BI-RADS 1 - Negativo"));
    // No per-finding paragraphs.
    assert!(!report.contains("**Mama Direita 1:**"));
}

#[test]
fn report_is_byte_identical_across_calls() {
    let catalog = breast_catalog();
    let findings = vec![
        breast_finding("Cisto simples", &[("size", "0,8 cm"), ("location", "QSE")]),
        breast_finding("Nódulo sólido", &[("description", "margens espiculadas")]),
    ];
    let normals = vec!["mama-esquerda".to_string()];

    let first = build_breast_report(&findings, &normals, &catalog).unwrap();
    let second = build_breast_report(&findings, &normals, &catalog).unwrap();
    assert_eq!(first, second);
}

#[test]
fn normal_breasts_come_before_findings() {
    let catalog = breast_catalog();
    let findings = vec![breast_finding("Cisto simples", &[("size", "0,8 cm")])];
    let normals = vec!["mama-esquerda".to_string()];

    let report = build_breast_report(&findings, &normals, &catalog).unwrap();

    let normal_pos = report.find("**Mama Esquerda:**").unwrap();
    let finding_pos = report.find("**Mama Direita 1:**").unwrap();
    assert!(normal_pos < finding_pos);
}

#[test]
fn impression_carries_the_ordinal_maximum_category() {
    let catalog = breast_catalog();
    let findings = vec![
        breast_finding("Nódulo sólido", &[]),                                    // 3
        breast_finding("Nódulo sólido", &[("description", "margens espiculadas")]), // 4B
        breast_finding("Nódulo sólido", &[("description", "aspecto benigno")]),  // 2
    ];

    let report = build_breast_report(&findings, &[], &catalog).unwrap();

    assert!(report.contains("**CLASSIFICAÇÃO FINAL:** BI-RADS 4B"));
    assert!(report.contains("1. Mama Direita: Lesão BI-RADS 3"));
    assert!(report.contains("2. Mama Direita: Lesão BI-RADS 4B"));
}

#[test]
fn templated_sentence_embeds_size_and_location() {
    let description = finding_description(&breast_finding(
        "Cisto simples",
        &[("size", "1,2 x 0,8 cm"), ("location", "no QSE da mama direita")],
    ));

    assert!(description.contains("medindo 1,2 x 0,8 cm"));
    assert!(description.contains("localizada no QSE da mama direita"));
    assert!(description.contains("BI-RADS 2"));
}

#[test]
fn missing_measurements_degrade_to_placeholders() {
    let description = finding_description(&breast_finding("Nódulo sólido", &[]));
    assert!(description.contains("dimensões não especificadas"));
    assert!(description.contains("localização não especificada"));
}

#[test]
fn nameless_finding_falls_back_to_generic_sentence() {
    let description = finding_description(&breast_finding(
        "",
        &[("size", "1,0 cm"), ("location", "QII")],
    ));
    assert_eq!(description, "Achado em QII, medindo 1,0 cm.");
}

#[test]
fn breast_impression_summarizes_count_and_category() {
    let findings = vec![
        breast_finding("Nódulo sólido", &[("description", "margens espiculadas")]),
        breast_finding("Cisto simples", &[]),
    ];

    let impression = build_breast_impression(&findings, &[]);
    assert_eq!(
        impression,
        "2 achados identificados. Classificação final: BI-RADS 4B. Indicada investigação \
         complementar."
    );

    let empty = build_breast_impression(&[], &[]);
    assert!(empty.contains("BI-RADS 1"));
}

fn liver_catalog() -> Catalog {
    Catalog::new(vec![
        Organ {
            id: "figado".to_string(),
            name: "Fígado".to_string(),
            normal_description: "apresenta dimensões normais, contornos regulares e ecotextura \
                                 homogênea."
                .to_string(),
            categories: vec![OrganCategory {
                id: "ecotextura".to_string(),
                name: "Alterações de Ecotextura".to_string(),
                findings: vec![Finding::new(
                    "esteatose",
                    "Esteatose Hepática",
                    "Infiltração gordurosa do parênquima hepático",
                )],
            }],
        },
        Organ {
            id: "rim-direito".to_string(),
            name: "Rim Direito".to_string(),
            normal_description: "de dimensões e ecogenicidade preservadas.".to_string(),
            categories: vec![],
        },
    ])
}

fn liver_finding() -> SelectedFinding {
    let mut selected = SelectedFinding::new(
        "figado",
        "ecotextura",
        Finding::new("esteatose", "Esteatose Hepática", "Infiltração gordurosa"),
    );
    selected.severity = Some("moderada".to_string());
    selected.instances = vec![instance(&[("size", "2,1 cm"), ("segment", "IVb")])];
    selected
}

#[test]
fn generic_report_rejects_a_completely_empty_exam() {
    let result = build_report(
        &ReportData {
            selected_findings: vec![],
            normal_organs: vec![],
            additional_notes: None,
        },
        &liver_catalog(),
        &abdomen_total_template(),
    );

    assert!(matches!(result, Err(ReportError::EmptyExam)));
}

#[test]
fn generic_report_groups_findings_by_organ_in_catalog_order() {
    let data = ReportData {
        selected_findings: vec![liver_finding()],
        normal_organs: vec!["rim-direito".to_string()],
        additional_notes: None,
    };

    let report = build_report(&data, &liver_catalog(), &abdomen_total_template()).unwrap();

    assert!(report.starts_with("# Ultrassonografia Abdominal Total"));
    assert!(report.contains(
        "**Fígado:** apresenta Esteatose Hepática (moderada) - 1) tamanho 2,1 cm, segmento IVb."
    ));
    assert!(report.contains("**Rim Direito:** de dimensões e ecogenicidade preservadas."));
    assert!(report.contains("Alterações ultrassonográficas em: Fígado."));
    assert!(report.contains("Demais estruturas avaliadas dentro da normalidade."));
}

#[test]
fn generic_report_normal_impression_without_findings() {
    let data = ReportData {
        selected_findings: vec![],
        normal_organs: vec!["figado".to_string()],
        additional_notes: None,
    };

    let report = build_report(&data, &liver_catalog(), &abdomen_total_template()).unwrap();
    assert!(report.contains("dentro dos limites da normalidade"));
    assert!(!report.contains("Alterações ultrassonográficas em:"));
}

#[test]
fn generic_report_appends_additional_notes() {
    let data = ReportData {
        selected_findings: vec![liver_finding()],
        normal_organs: vec![],
        additional_notes: Some("Paciente em jejum inadequado.".to_string()),
    };

    let report = build_report(&data, &liver_catalog(), &abdomen_total_template()).unwrap();
    assert!(report.contains("**Observações:** Paciente em jejum inadequado."));
}

#[test]
fn multi_select_fields_render_as_joined_list() {
    let mut selected = liver_finding();
    selected.instances = vec![FindingInstance::with_id(
        "i-1",
        BTreeMap::from([
            ("size".to_string(), FieldValue::from("2,1 cm")),
            (
                "composicao".to_string(),
                FieldValue::List(vec!["lipídica".to_string(), "fibrosa".to_string()]),
            ),
        ]),
    )];

    let report = build_report(
        &ReportData {
            selected_findings: vec![selected],
            normal_organs: vec![],
            additional_notes: None,
        },
        &liver_catalog(),
        &abdomen_total_template(),
    )
    .unwrap();

    assert!(report.contains("tamanho 2,1 cm, composicao: lipídica, fibrosa"));
}

#[test]
fn generic_report_is_deterministic() {
    let data = ReportData {
        selected_findings: vec![liver_finding()],
        normal_organs: vec!["rim-direito".to_string()],
        additional_notes: Some("Correlação clínica recomendada.".to_string()),
    };
    let catalog = liver_catalog();
    let template = abdomen_total_template();

    let first = build_report(&data, &catalog, &template).unwrap();
    let second = build_report(&data, &catalog, &template).unwrap();
    assert_eq!(first, second);
}
