use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::finding::SelectedFinding;

/// Everything the report assembler needs for one exam.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReportData {
    pub selected_findings: Vec<SelectedFinding>,
    pub normal_organs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
}

impl ReportData {
    pub fn is_empty(&self) -> bool {
        self.selected_findings.is_empty() && self.normal_organs.is_empty()
    }
}

/// Per-exam-type boilerplate: titles, technique paragraph and the canned
/// impression texts the deterministic assembler stitches around the
/// findings.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReportTemplate {
    pub exam_title: String,
    pub technical_description: String,
    pub findings_title: String,
    pub impression_title: String,
    pub normal_impression: String,
    pub abnormal_impression_intro: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abnormal_impression_suffix: Option<String>,
}

/// Boilerplate for the total abdominal ultrasound exam.
pub fn abdomen_total_template() -> ReportTemplate {
    ReportTemplate {
        exam_title: "Ultrassonografia Abdominal Total".to_string(),
        technical_description: "Exame realizado com transdutor convexo de 3,5 MHz e linear de \
                                7,5 MHz, em modo bidimensional e Doppler colorido, conforme \
                                necessário."
            .to_string(),
        findings_title: "Achados Sonográficos".to_string(),
        impression_title: "Impressão Diagnóstica".to_string(),
        normal_impression: "Exame ultrassonográfico abdominal dentro dos limites da normalidade, \
                            sem evidências de alterações estruturais nos órgãos avaliados."
            .to_string(),
        abnormal_impression_intro: "Alterações ultrassonográficas em:".to_string(),
        abnormal_impression_suffix: Some(
            " Demais estruturas avaliadas dentro da normalidade.".to_string(),
        ),
    }
}

/// Boilerplate for the breast ultrasound exam.
pub fn breast_ultrasound_template() -> ReportTemplate {
    ReportTemplate {
        exam_title: "Ultrassonografia de Mamas".to_string(),
        technical_description: "Exame realizado com transdutor linear de alta frequência, \
                                documentação radial e antirradial, avaliação axilar complementar \
                                e Doppler colorido quando indicado."
            .to_string(),
        findings_title: "Achados Sonográficos".to_string(),
        impression_title: "Conclusão e BI-RADS".to_string(),
        normal_impression: "Ultrassonografia mamária sem achados suspeitos, compatível com \
                            BI-RADS 1. Estruturas axilares preservadas."
            .to_string(),
        abnormal_impression_intro: "Achados relevantes identificados nas seguintes regiões \
                                    mamárias:"
            .to_string(),
        abnormal_impression_suffix: Some(
            " Recomenda-se correlação clínico-radiológica e seguimento conforme categorias \
             BI-RADS descritas."
                .to_string(),
        ),
    }
}
