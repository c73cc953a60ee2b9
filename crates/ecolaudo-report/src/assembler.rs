//! Report assembly.
//!
//! Side-effect-free string building over the classified findings. Two calls
//! with identical inputs produce byte-identical markdown.

use std::collections::BTreeSet;

use ecolaudo_calculators::birads::BiradsCategory;
use ecolaudo_core::models::finding::{FieldValue, FindingInstance, SelectedFinding};
use ecolaudo_core::models::organ::Catalog;
use ecolaudo_core::models::report::{ReportData, ReportTemplate};
use tracing::{debug, info};

use crate::classify::{determine_final_birads, determine_lesion_type, LesionType};
use crate::error::ReportError;
use crate::phrases::{extract_lesion_data, fallback_phrase, normal_breast_phrase, phrase_for};
use crate::render::{render_report, ReportSections};

const BREAST_REPORT_TITLE: &str = "LAUDO DE ULTRASSONOGRAFIA MAMÁRIA";

const BREAST_TECHNIQUE: &str = "Exame realizado com transdutor linear de alta frequência \
                                (7-12 MHz), com avaliação sistemática de ambas as mamas e \
                                regiões axilares, incluindo estudo com Doppler colorido quando \
                                indicado.";

const BREAST_OBSERVATIONS: &str = "\
- Correlação com exame clínico e mamografia é sempre recomendada.
- Este exame ultrassonográfico complementa, mas não substitui, a mamografia no rastreamento do \
câncer de mama.
- Em caso de dúvidas ou necessidade de esclarecimentos adicionais, favor entrar em contato.";

/// Exam-level classification line, embedding the category and its conduct.
fn final_classification(category: BiradsCategory) -> &'static str {
    match category {
        BiradsCategory::C1 => "BI-RADS 1 - Negativo. Rotina de rastreamento habitual.",
        BiradsCategory::C2 => "BI-RADS 2 - Achado benigno. Rotina de rastreamento habitual.",
        BiradsCategory::C3 => {
            "BI-RADS 3 - Achado provavelmente benigno. Sugestão de controle ultrassonográfico \
             semestral."
        }
        BiradsCategory::C4a => {
            "BI-RADS 4A - Lesão suspeita de baixa probabilidade de malignidade (2-10%). Indicada \
             investigação histopatológica."
        }
        BiradsCategory::C4b => {
            "BI-RADS 4B - Lesão suspeita de moderada probabilidade de malignidade (10-50%). \
             Fortemente indicada investigação histopatológica."
        }
        BiradsCategory::C4c => {
            "BI-RADS 4C - Lesão suspeita de alta probabilidade de malignidade (50-95%). Urgente \
             investigação histopatológica."
        }
        BiradsCategory::C5 => {
            "BI-RADS 5 - Lesão altamente suspeita de malignidade (>95%). Indicação de biópsia e \
             tratamento oncológico adequado."
        }
        BiradsCategory::C6 => {
            "BI-RADS 6 - Malignidade comprovada por biópsia. Em tratamento oncológico."
        }
    }
}

/// Rendered sentence for one finding.
///
/// A finding with no usable catalog name cannot be classified; it degrades
/// to the generic location-and-size sentence instead of aborting the
/// report.
pub fn finding_description(finding: &SelectedFinding) -> String {
    let data = extract_lesion_data(finding);
    if finding.finding.name.trim().is_empty() {
        return fallback_phrase(&data);
    }
    phrase_for(determine_lesion_type(finding), &data)
}

/// Assemble the full breast ultrasound report.
///
/// Empty input renders the normal-limits report with BI-RADS 1; otherwise
/// normal breasts come first as a joined list, then one templated paragraph
/// per finding, then the numbered impression with the ordinal-maximum
/// category.
pub fn build_breast_report(
    selected_findings: &[SelectedFinding],
    normal_organs: &[String],
    catalog: &Catalog,
) -> Result<String, ReportError> {
    debug!(
        findings = selected_findings.len(),
        normal_organs = normal_organs.len(),
        "assembling breast report"
    );

    let mut findings_parts: Vec<String> = Vec::new();

    if selected_findings.is_empty() && normal_organs.is_empty() {
        findings_parts.push(normal_breast_phrase().to_string());
    } else {
        let normal_names: Vec<String> = normal_organs
            .iter()
            .filter_map(|id| catalog.organ(id).map(|o| o.name.clone()))
            .collect();
        if !normal_names.is_empty() {
            findings_parts.push(format!(
                "**{}:** Tecido mamário de ecotextura preservada, sem nódulos ou formações \
                 císticas significativas.",
                normal_names.join(" e ")
            ));
        }

        for (index, finding) in selected_findings.iter().enumerate() {
            let organ_name = catalog.organ_name(&finding.organ_id);
            let description = finding_description(finding);
            findings_parts.push(format!("**{} {}:**\n{}", organ_name, index + 1, description));
        }
    }

    let impression = if selected_findings.is_empty() {
        "Exame ultrassonográfico mamário dentro dos limites da normalidade.\n\n\
         **CLASSIFICAÇÃO:** BI-RADS 1 - Negativo\n\n\
         **RECOMENDAÇÃO:** Seguimento de rotina conforme protocolo de rastreamento."
            .to_string()
    } else {
        let summary: Vec<String> = selected_findings
            .iter()
            .enumerate()
            .map(|(index, finding)| {
                let organ_name = catalog.organ_name(&finding.organ_id);
                let label = match determine_lesion_type(finding) {
                    LesionType::Nodule(category) => format!("Lesão BI-RADS {category}"),
                    _ => finding.finding.name.clone(),
                };
                format!("{}. {}: {}", index + 1, organ_name, label)
            })
            .collect();

        let final_birads = determine_final_birads(selected_findings);
        format!(
            "{}\n\n**CLASSIFICAÇÃO FINAL:** {}",
            summary.join("\n"),
            final_classification(final_birads)
        )
    };

    let report = render_report(&ReportSections {
        title: BREAST_REPORT_TITLE.to_string(),
        technique: BREAST_TECHNIQUE.to_string(),
        findings_title: "ACHADOS".to_string(),
        findings: findings_parts.join("\n\n"),
        impression_title: "IMPRESSÃO DIAGNÓSTICA".to_string(),
        impression,
        observations: BREAST_OBSERVATIONS.to_string(),
        notes: String::new(),
    })?;

    info!(report_len = report.len(), "breast report assembled");
    Ok(report)
}

/// Short clinical impression for the preview panel.
pub fn build_breast_impression(
    selected_findings: &[SelectedFinding],
    normal_organs: &[String],
) -> String {
    if selected_findings.is_empty() && normal_organs.is_empty() {
        return "Exame ultrassonográfico mamário sem alterações significativas. BI-RADS 1."
            .to_string();
    }

    if selected_findings.is_empty() {
        return "Exame ultrassonográfico mamário dentro dos limites da normalidade. BI-RADS 1."
            .to_string();
    }

    let final_birads = determine_final_birads(selected_findings);
    let count = selected_findings.len();
    let plural = if count > 1 { "s" } else { "" };
    let conduct = if final_birads >= BiradsCategory::C4a {
        "Indicada investigação complementar."
    } else if final_birads == BiradsCategory::C3 {
        "Sugestão de controle evolutivo."
    } else {
        "Achados benignos."
    };

    format!(
        "{count} achado{plural} identificado{plural}. Classificação final: BI-RADS \
         {final_birads}. {conduct}"
    )
}

/// Measurement fragments of one instance, in reporting order: the curated
/// clinical fields first (including the carotid Doppler set), then any
/// remaining fields generically as `name: value`.
fn measurement_fragments(instance: &FindingInstance) -> Vec<String> {
    // (primary key, legacy alias, prefix template). An empty prefix prints
    // the bare value.
    const CURATED: &[(&str, Option<&str>, &str)] = &[
        ("size", None, "tamanho "),
        ("segment", None, "segmento "),
        ("location", None, "localização "),
        ("quantity", None, "quantidade "),
        ("vps", None, "VPS "),
        ("vdf", None, "VDF "),
        ("ratioICA_CCA", Some("ratio"), "razão ICA/CCA "),
        ("nascetGrade", Some("nascet"), "grau NASCET "),
        ("emi", Some("emiValue"), ""),
        ("emiClassification", None, "classificação EMI "),
        ("plaqueEchogenicity", Some("echogenicity"), "ecogenicidade "),
        ("plaqueComposition", Some("composition"), "composição "),
        ("plaqueSurface", Some("surface"), "superfície "),
        ("plaqueRisk", Some("risk"), ""),
        ("vertebralFlowPattern", Some("flowPattern"), "padrão de fluxo "),
        ("subclavianSteal", None, "roubo da subclávia "),
        ("vertebralVelocity", None, "velocidade "),
        ("vertebralIR", None, "IR "),
        ("description", None, ""),
    ];

    let mut parts = Vec::new();
    let mut consumed: BTreeSet<&str> = BTreeSet::new();

    for (key, alias, prefix) in CURATED {
        consumed.insert(key);
        if let Some(alias) = alias {
            consumed.insert(alias);
        }
        let value = instance
            .text_field(key)
            .or_else(|| alias.and_then(|a| instance.text_field(a)));
        if let Some(value) = value {
            if *key == "emi" {
                parts.push(format!("EMI {value} mm"));
            } else {
                parts.push(format!("{prefix}{value}"));
            }
        }
    }

    for (key, value) in &instance.measurements {
        if consumed.contains(key.as_str()) {
            continue;
        }
        match value {
            FieldValue::Text(text) if !text.is_empty() => parts.push(format!("{key}: {text}")),
            FieldValue::List(items) if !items.is_empty() => {
                parts.push(format!("{key}: {}", items.join(", ")))
            }
            _ => {}
        }
    }

    parts
}

fn organ_finding_sentence(finding: &SelectedFinding) -> String {
    let mut sentence = finding.finding.name.clone();

    if let Some(severity) = &finding.severity {
        sentence.push_str(&format!(" ({severity})"));
    }

    let instance_details: Vec<String> = finding
        .instances
        .iter()
        .enumerate()
        .filter_map(|(index, instance)| {
            let fragments = measurement_fragments(instance);
            if fragments.is_empty() {
                None
            } else {
                Some(format!("{}) {}", index + 1, fragments.join(", ")))
            }
        })
        .collect();

    if !instance_details.is_empty() {
        sentence.push_str(&format!(" - {}", instance_details.join("; ")));
    }

    sentence
}

/// Assemble the generic per-organ exam report for any exam type.
///
/// Organs appear in catalog order; each gets its normal-state boilerplate
/// or the descriptions of its findings with per-instance measurements. A
/// completely empty exam is the one rejected input.
pub fn build_report(
    data: &ReportData,
    catalog: &Catalog,
    template: &ReportTemplate,
) -> Result<String, ReportError> {
    if data.is_empty() {
        return Err(ReportError::EmptyExam);
    }

    debug!(
        findings = data.selected_findings.len(),
        normal_organs = data.normal_organs.len(),
        exam = %template.exam_title,
        "assembling exam report"
    );

    let mut organ_paragraphs: Vec<String> = Vec::new();

    for organ in &catalog.organs {
        let organ_findings: Vec<&SelectedFinding> = data
            .selected_findings
            .iter()
            .filter(|f| f.organ_id == organ.id)
            .collect();
        let is_normal = data.normal_organs.iter().any(|id| *id == organ.id);

        if organ_findings.is_empty() && !is_normal {
            continue;
        }

        let body = if organ_findings.is_empty() {
            organ.normal_description.clone()
        } else {
            let sentences: Vec<String> = organ_findings
                .iter()
                .map(|f| organ_finding_sentence(f))
                .collect();
            format!("apresenta {}.", sentences.join(", "))
        };

        organ_paragraphs.push(format!("**{}:** {}", organ.name, body));
    }

    let impression = if data.selected_findings.is_empty() {
        template.normal_impression.clone()
    } else {
        let mut seen = BTreeSet::new();
        let organ_names: Vec<String> = data
            .selected_findings
            .iter()
            .filter_map(|f| catalog.organ(&f.organ_id).map(|o| o.name.clone()))
            .filter(|name| seen.insert(name.clone()))
            .collect();

        let mut impression = if organ_names.is_empty() {
            format!("{} conforme descrito acima.", template.abnormal_impression_intro)
        } else {
            format!(
                "{} {}.",
                template.abnormal_impression_intro,
                organ_names.join(", ")
            )
        };

        if !data.normal_organs.is_empty() {
            if let Some(suffix) = &template.abnormal_impression_suffix {
                impression.push_str(suffix);
            }
        }

        impression
    };

    let report = render_report(&ReportSections {
        title: template.exam_title.clone(),
        technique: template.technical_description.clone(),
        findings_title: template.findings_title.clone(),
        findings: organ_paragraphs.join("\n\n"),
        impression_title: template.impression_title.clone(),
        impression,
        observations: String::new(),
        notes: data.additional_notes.clone().unwrap_or_default(),
    })?;

    info!(report_len = report.len(), "exam report assembled");
    Ok(report)
}
