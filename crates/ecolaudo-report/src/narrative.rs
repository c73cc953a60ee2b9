//! Formal narrative text for the structured bilateral breast exam.
//!
//! Turns the typed BI-RADS lexicons into fluent clinical Portuguese and
//! assembles the per-breast report (technique, findings, axillary lymph
//! nodes, diagnostic impression). The exam date is a parameter, so the
//! output is fully deterministic.

use ecolaudo_calculators::birads::{
    calculate_birads, BiradsCategory, BreastLesion, Calcifications, EchoPattern, LesionKind,
    Margins, Orientation, PosteriorFeature, Shape, Side, Vascularity,
};
use serde::{Deserialize, Serialize};

fn shape_prose(shape: Shape) -> &'static str {
    match shape {
        Shape::Oval => "oval",
        Shape::Round => "arredondada",
        Shape::Irregular => "de contornos irregulares",
    }
}

fn orientation_prose(orientation: Orientation) -> &'static str {
    match orientation {
        Orientation::Parallel => "orientação paralela à pele",
        Orientation::NotParallel => "orientação não-paralela à pele",
    }
}

fn margins_prose(margins: Margins) -> &'static str {
    match margins {
        Margins::Circumscribed => "margens circunscritas",
        Margins::Indistinct => "margens indistintas",
        Margins::Angular => "margens angulares",
        Margins::Microlobulated => "margens microlobuladas",
        Margins::Spiculated => "margens espiculadas",
    }
}

fn echo_prose(echo: EchoPattern) -> &'static str {
    match echo {
        EchoPattern::Anechoic => "conteúdo anecoico",
        EchoPattern::Hyperechoic => "padrão hiperecoico",
        EchoPattern::Complex => "aspecto complexo cístico-sólido",
        EchoPattern::Hypoechoic => "padrão hipoecoico",
        EchoPattern::Isoechoic => "padrão isoecoico em relação ao tecido adiposo",
        EchoPattern::Heterogeneous => "padrão heterogêneo com múltiplas ecogenicidades",
    }
}

fn posterior_prose(posterior: PosteriorFeature) -> &'static str {
    match posterior {
        PosteriorFeature::NoChange => "sem alterações acústicas posteriores",
        PosteriorFeature::Enhancement => "com reforço acústico posterior",
        PosteriorFeature::Shadowing => "com sombra acústica posterior",
        PosteriorFeature::Combined => {
            "com características acústicas posteriores mistas (reforço e sombra)"
        }
    }
}

fn calcifications_prose(calcifications: Calcifications) -> &'static str {
    match calcifications {
        Calcifications::Absent => "sem calcificações associadas",
        Calcifications::Macro => "macrocalcificações grosseiras de aspecto benigno",
        Calcifications::Micro => "microcalcificações puntiformes suspeitas",
    }
}

fn vascularity_prose(vascularity: Vascularity) -> &'static str {
    match vascularity {
        Vascularity::Absent => "sem sinais de vascularização ao estudo Doppler",
        Vascularity::Minimal => "vascularização mínima periférica ao Doppler colorido",
        Vascularity::Moderate => "vascularização moderada com fluxo intranodular ao Doppler",
        Vascularity::Marked => {
            "vascularização acentuada com padrão penetrante central ao Doppler"
        }
    }
}

fn side_prose(side: Side) -> &'static str {
    match side {
        Side::Right => "direita",
        Side::Left => "esquerda",
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Full prose description of a solid nodule, weaving in every populated
/// lexicon. Empty for non-nodule lesions.
pub fn describe_nodule(lesion: &BreastLesion) -> String {
    if lesion.kind != Some(LesionKind::Nodule) {
        return String::new();
    }

    let mut opening = vec!["Nódulo sólido".to_string()];
    if let Some(shape) = lesion.shape {
        opening.push(shape_prose(shape).to_string());
    }
    if let Some(location) = lesion.location {
        opening.push(format!("no {}", location.prose()));
    }
    if let Some(size) = &lesion.size {
        opening.push(format!("medindo {size}"));
    }

    let mut text = opening.join(" ") + ",";

    let mut traits = Vec::new();
    if let Some(margins) = lesion.margins {
        traits.push(margins_prose(margins));
    }
    if let Some(orientation) = lesion.orientation {
        traits.push(orientation_prose(orientation));
    }
    if let Some(echo) = lesion.echo_pattern {
        traits.push(echo_prose(echo));
    }
    if let Some(posterior) = lesion.posterior {
        traits.push(posterior_prose(posterior));
    }
    if !traits.is_empty() {
        text.push_str(" apresentando ");
        text.push_str(&traits.join(", "));
    }

    let mut extras = Vec::new();
    if let Some(calcifications) = lesion.calcifications {
        extras.push(calcifications_prose(calcifications));
    }
    if let Some(vascularity) = lesion.vascularity {
        extras.push(vascularity_prose(vascularity));
    }
    if !extras.is_empty() {
        text.push_str(". ");
        let sentences: Vec<String> = extras.iter().map(|e| capitalize(e)).collect();
        text.push_str(&sentences.join(". "));
    }

    if let Some(notes) = &lesion.notes {
        text.push_str(". ");
        text.push_str(notes);
    }

    text + "."
}

/// Prose description of a simple cyst. Empty for non-cyst lesions.
pub fn describe_simple_cyst(lesion: &BreastLesion) -> String {
    if lesion.kind != Some(LesionKind::Cyst) {
        return String::new();
    }

    let mut text = "Imagem anecoica de paredes finas e regulares".to_string();

    if let Some(size) = &lesion.size {
        text.push_str(&format!(", medindo {size}"));
    }
    text.push_str(", com reforço acústico posterior");
    if let Some(location) = lesion.location {
        text.push_str(&format!(", localizada no {}", location.prose()));
    }
    text.push_str(". Aspecto característico de cisto simples.");

    if let Some(notes) = &lesion.notes {
        text.push(' ');
        text.push_str(notes);
    }

    text
}

/// Boilerplate for a breast with no alterations.
pub fn describe_normal_breast(side: Side) -> String {
    format!(
        "Mama {}: tecido mamário de padrão fibroglandular habitual, sem evidências de nódulos \
         sólidos, formações císticas ou outras alterações focais. Ausência de espessamentos \
         cutâneos, distorções arquiteturais ou coleções líquidas.",
        side_prose(side)
    )
}

/// Per-breast diagnostic impression line with category and conduct.
pub fn diagnostic_impression(lesion: &BreastLesion, category: BiradsCategory) -> String {
    let side_text = match lesion.side {
        Some(Side::Left) => "Mama esquerda",
        _ => "Mama direita",
    };

    let lesion_text = match lesion.kind {
        Some(LesionKind::Nodule) => {
            let mut text = "Nódulo sólido".to_string();
            if let Some(location) = lesion.location {
                text.push_str(&format!(" no {}", location.prose()));
            }
            text
        }
        Some(LesionKind::Cyst) => {
            let mut text = "Cisto simples".to_string();
            if let Some(location) = lesion.location {
                text.push_str(&format!(" no {}", location.prose()));
            }
            text
        }
        _ => {
            return format!("{side_text}: Sem alterações significativas - BI-RADS {category}.");
        }
    };

    format!(
        "{side_text}: {lesion_text} - BI-RADS {category}. {}",
        clinical_recommendation(category)
    )
}

/// Conduct recommendation per category, in the long report form.
pub fn clinical_recommendation(category: BiradsCategory) -> &'static str {
    match category {
        BiradsCategory::C1 => {
            "Exame negativo. Não há achados significativos. Seguimento de rotina conforme faixa \
             etária e fatores de risco."
        }
        BiradsCategory::C2 => {
            "Achado(s) benigno(s). Não há necessidade de seguimento diferenciado. Rastreamento \
             de rotina conforme faixa etária."
        }
        BiradsCategory::C3 => {
            "Achado(s) provavelmente benigno(s). Recomenda-se controle ultrassonográfico em \
             intervalo curto (6 meses) para documentação de estabilidade."
        }
        BiradsCategory::C4a => {
            "Baixa suspeita de malignidade (probabilidade de 2-10%). Biópsia percutânea (core \
             biopsy ou PAAF) recomendada para caracterização histopatológica."
        }
        BiradsCategory::C4b => {
            "Moderada suspeita de malignidade (probabilidade de 10-50%). Biópsia percutânea \
             (core biopsy) fortemente recomendada."
        }
        BiradsCategory::C4c => {
            "Alta suspeita de malignidade (probabilidade de 50-95%). Biópsia percutânea ou \
             exérese cirúrgica fortemente indicada. Correlação com mamografia e/ou ressonância \
             recomendada."
        }
        BiradsCategory::C5 => {
            "Altamente suspeito de malignidade (probabilidade >95%). Biópsia para confirmação \
             histopatológica seguida de tratamento oncológico apropriado."
        }
        BiradsCategory::C6 => {
            "Malignidade comprovada por biópsia prévia. Este exame é utilizado para \
             estadiamento, planejamento cirúrgico ou monitoramento de resposta à terapia \
             neoadjuvante."
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LymphNodeStatus {
    Normal,
    Altered,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LymphNodes {
    pub right: LymphNodeStatus,
    pub left: LymphNodeStatus,
}

fn lymph_node_text(side: Side, status: LymphNodeStatus) -> String {
    let side_adj = match side {
        Side::Right => "direitos",
        Side::Left => "esquerdos",
    };
    match status {
        LymphNodeStatus::Normal => format!(
            "Linfonodos axilares {side_adj} de morfologia e dimensões habituais, preservando o \
             hilo gorduroso central."
        ),
        LymphNodeStatus::Altered => format!(
            "Linfonodos axilares {side_adj} com alterações morfológicas - avaliação complementar \
             recomendada."
        ),
    }
}

fn breast_category(lesion: &BreastLesion) -> BiradsCategory {
    match lesion.kind {
        Some(LesionKind::Nodule) | Some(LesionKind::Cyst) => calculate_birads(lesion).category,
        _ => BiradsCategory::C1,
    }
}

fn breast_findings_section(lesion: &BreastLesion, side: Side) -> String {
    match lesion.kind {
        Some(LesionKind::Nodule) => describe_nodule(lesion),
        Some(LesionKind::Cyst) => describe_simple_cyst(lesion),
        _ => describe_normal_breast(side),
    }
}

/// Assemble the full bilateral breast report in markdown.
///
/// The final category is the ordinal maximum of the two sides. The caller
/// supplies the exam date; nothing here reads a clock.
pub fn build_bilateral_report(
    right: &BreastLesion,
    left: &BreastLesion,
    lymph_nodes: LymphNodes,
    exam_date: jiff::civil::Date,
) -> String {
    let right_category = breast_category(right);
    let left_category = breast_category(left);
    let final_category = right_category.max(left_category);

    let mut report = String::new();

    report.push_str("# ULTRASSONOGRAFIA DE MAMAS\n\n");
    report.push_str(&format!(
        "**Data do Exame:** {}\n\n",
        exam_date.strftime("%d/%m/%Y")
    ));
    report.push_str("---\n\n");

    report.push_str("## TÉCNICA\n\n");
    report.push_str(
        "Exame realizado com transdutor linear de alta frequência (7.5-12 MHz), avaliando ambas \
         as mamas e regiões axilares em múltiplos planos (transversal e longitudinal). Estudo \
         complementar com Doppler colorido para análise de vascularização das lesões \
         identificadas.\n\n",
    );
    report.push_str("---\n\n");

    report.push_str("## ACHADOS\n\n");
    report.push_str("### MAMA DIREITA\n\n");
    report.push_str(&breast_findings_section(right, Side::Right));
    report.push_str("\n\n");
    report.push_str("### MAMA ESQUERDA\n\n");
    report.push_str(&breast_findings_section(left, Side::Left));
    report.push_str("\n\n---\n\n");

    report.push_str("## LINFONODOS AXILARES\n\n");
    report.push_str(&format!(
        "**Região Axilar Direita:** {}\n\n",
        lymph_node_text(Side::Right, lymph_nodes.right)
    ));
    report.push_str(&format!(
        "**Região Axilar Esquerda:** {}\n\n",
        lymph_node_text(Side::Left, lymph_nodes.left)
    ));
    report.push_str("---\n\n");

    report.push_str("## IMPRESSÃO DIAGNÓSTICA\n\n");
    report.push_str(&diagnostic_impression(right, right_category));
    report.push_str("\n\n");
    report.push_str(&diagnostic_impression(left, left_category));
    report.push_str("\n\n");
    report.push_str(&format!("**CLASSIFICAÇÃO BI-RADS FINAL:** {final_category}\n\n"));

    report.push_str("---\n\n");
    report.push_str("*Baseado nos critérios ACR BI-RADS 5ª Edição*\n");

    report
}
