//! Carotid plaque vulnerability scorer.
//!
//! The plaque description fields arrive as free text, so matching is a
//! case-insensitive substring check in either direction against fixed
//! keyword tables ("hipoecogênica (lipídica)" matches the "hipoecogênica"
//! keyword and vice versa). First match in table order wins. The keyword
//! sets are clinical Portuguese and are kept verbatim — based on
//! Gray-Weale, ACSRS and ESVS guidance.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Gray-Weale ultrasound plaque type, a proxy for plaque stability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GrayWeale {
    I,
    II,
    III,
    IV,
    V,
}

impl fmt::Display for GrayWeale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let roman = match self {
            GrayWeale::I => "I",
            GrayWeale::II => "II",
            GrayWeale::III => "III",
            GrayWeale::IV => "IV",
            GrayWeale::V => "V",
        };
        f.write_str(roman)
    }
}

// Keyword tables. Order matters: first match wins, so the more specific
// spellings that share a substring with a broader one must come later only
// when the broader form should take precedence.
const ECHOGENICITY_KEYWORDS: &[(&str, i32, GrayWeale)] = &[
    ("hipoecogênica", 3, GrayWeale::I),
    ("hipoecogênica (lipídica)", 3, GrayWeale::I),
    ("predominantemente hipoecogênica", 2, GrayWeale::II),
    ("predominantemente hipoecogênica (tipo ii)", 2, GrayWeale::II),
    ("isoecogênica", 1, GrayWeale::III),
    ("predominantemente hiperecogênica", 0, GrayWeale::IV),
    ("predominantemente hiperecogênica (tipo iv)", 0, GrayWeale::IV),
    ("hiperecogênica", 0, GrayWeale::V),
    ("hiperecogênica (fibrosa)", 0, GrayWeale::V),
    ("calcificada", 0, GrayWeale::V),
];

const COMPOSITION_KEYWORDS: &[(&str, i32)] = &[
    ("heterogênea", 2),
    ("predominantemente lipídica", 2),
    ("mista (fibrocalcificada)", 1),
    ("mista", 1),
    ("homogênea", 0),
];

const SURFACE_KEYWORDS: &[(&str, i32)] = &[
    ("ulcerada", 3),
    ("irregular", 2),
    ("lisa", 0),
    ("regular", 0),
];

const STENOSIS_KEYWORDS: &[(&str, i32)] = &[
    ("70-99", 2),
    ("≥70%", 2),
    ("70-89% (grave)", 2),
    ("90-99% (crítica)", 3),
    ("50-69", 1),
    ("50-69%", 1),
    ("50-69% (moderada)", 1),
    ("<50", 0),
    ("<50%", 0),
    ("<50% (leve)", 0),
    ("normal", 0),
    ("normal (sem estenose)", 0),
];

/// Flat contribution of a symptomatic presentation.
const SYMPTOMATIC_POINTS: i32 = 2;

const fn max_tuple_points(table: &[(&str, i32)]) -> i32 {
    let mut max = 0;
    let mut i = 0;
    while i < table.len() {
        if table[i].1 > max {
            max = table[i].1;
        }
        i += 1;
    }
    max
}

const fn max_echo_points(table: &[(&str, i32, GrayWeale)]) -> i32 {
    let mut max = 0;
    let mut i = 0;
    while i < table.len() {
        if table[i].1 > max {
            max = table[i].1;
        }
        i += 1;
    }
    max
}

/// Highest achievable vulnerability score, derived from the tables so edits
/// to them can never desynchronize the denominator.
pub const MAX_SCORE: i32 = max_echo_points(ECHOGENICITY_KEYWORDS)
    + max_tuple_points(COMPOSITION_KEYWORDS)
    + max_tuple_points(SURFACE_KEYWORDS)
    + max_tuple_points(STENOSIS_KEYWORDS)
    + SYMPTOMATIC_POINTS;

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PlaqueRiskInput {
    pub echogenicity: Option<String>,
    pub composition: Option<String>,
    pub surface: Option<String>,
    pub stenosis_grade: Option<String>,
    #[serde(default)]
    pub has_symptoms: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PlaqueRiskLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl PlaqueRiskLevel {
    pub fn label(self) -> &'static str {
        match self {
            PlaqueRiskLevel::Low => "Risco Baixo",
            PlaqueRiskLevel::Moderate => "Risco Moderado",
            PlaqueRiskLevel::High => "Risco Alto",
            PlaqueRiskLevel::VeryHigh => "Risco Muito Alto",
        }
    }

    pub fn recommendation(self) -> &'static str {
        match self {
            PlaqueRiskLevel::Low => {
                "Placa estável. Manter prevenção secundária e seguimento anual."
            }
            PlaqueRiskLevel::Moderate => {
                "Manter controle de fatores de risco cardiovascular. Seguimento \
                 ultrassonográfico em 6-12 meses."
            }
            PlaqueRiskLevel::High => {
                "Placa com características de instabilidade. Indicado seguimento próximo e \
                 otimização de fatores de risco."
            }
            PlaqueRiskLevel::VeryHigh => {
                "Placa vulnerável. Considerar avaliação vascular urgente e discussão \
                 multidisciplinar para intervenção."
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PlaqueRiskResult {
    pub risk_level: PlaqueRiskLevel,
    pub risk_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gray_weale: Option<GrayWeale>,
    pub vulnerability_score: i32,
    pub max_score: i32,
    pub factors: Vec<String>,
    pub recommendation: String,
}

/// Bidirectional, case-insensitive substring match. Empty input matches
/// nothing (an absent field contributes zero points).
fn keyword_matches(input: &str, keyword: &str) -> bool {
    !input.is_empty() && (input.contains(keyword) || keyword.contains(input))
}

fn match_echogenicity(input: Option<&str>) -> Option<(i32, GrayWeale)> {
    let input = input?.to_lowercase();
    ECHOGENICITY_KEYWORDS
        .iter()
        .find(|(keyword, _, _)| keyword_matches(&input, keyword))
        .map(|(_, score, gray_weale)| (*score, *gray_weale))
}

fn match_keyword(table: &[(&str, i32)], input: Option<&str>) -> Option<i32> {
    let input = input?.to_lowercase();
    table
        .iter()
        .find(|(keyword, _)| keyword_matches(&input, keyword))
        .map(|(_, score)| *score)
}

fn risk_level_for_score(score: i32) -> PlaqueRiskLevel {
    match score {
        s if s >= 7 => PlaqueRiskLevel::VeryHigh,
        5..=6 => PlaqueRiskLevel::High,
        3..=4 => PlaqueRiskLevel::Moderate,
        _ => PlaqueRiskLevel::Low,
    }
}

/// Score a carotid plaque description into a 4-level vulnerability risk.
///
/// The factors list names only the features whose contribution crosses the
/// per-feature reporting threshold; it explains the score, it is not part
/// of it.
pub fn calculate_plaque_risk(input: &PlaqueRiskInput) -> PlaqueRiskResult {
    let mut score = 0;
    let mut factors = Vec::new();
    let mut gray_weale = None;

    if let Some((echo_score, gw)) = match_echogenicity(input.echogenicity.as_deref()) {
        score += echo_score;
        gray_weale = Some(gw);
        if echo_score >= 2 {
            let echogenicity = input.echogenicity.as_deref().unwrap_or_default();
            factors.push(format!("Ecogenicidade: {echogenicity} (Gray-Weale tipo {gw})"));
        }
    }

    if let Some(comp_score) = match_keyword(COMPOSITION_KEYWORDS, input.composition.as_deref()) {
        score += comp_score;
        if comp_score >= 1 {
            let composition = input.composition.as_deref().unwrap_or_default();
            factors.push(format!("Composição: {composition}"));
        }
    }

    if let Some(surf_score) = match_keyword(SURFACE_KEYWORDS, input.surface.as_deref()) {
        score += surf_score;
        if surf_score >= 2 {
            let surface = input.surface.as_deref().unwrap_or_default();
            factors.push(format!("Superfície: {surface}"));
        }
    }

    if let Some(stenosis_score) = match_keyword(STENOSIS_KEYWORDS, input.stenosis_grade.as_deref())
    {
        score += stenosis_score;
        if stenosis_score >= 1 {
            let stenosis = input.stenosis_grade.as_deref().unwrap_or_default();
            factors.push(format!("Estenose: {stenosis}"));
        }
    }

    if input.has_symptoms {
        score += SYMPTOMATIC_POINTS;
        factors.push("Sintomático".to_string());
    }

    let risk_level = risk_level_for_score(score);

    PlaqueRiskResult {
        risk_level,
        risk_label: risk_level.label().to_string(),
        gray_weale,
        vulnerability_score: score,
        max_score: MAX_SCORE,
        factors,
        recommendation: risk_level.recommendation().to_string(),
    }
}
