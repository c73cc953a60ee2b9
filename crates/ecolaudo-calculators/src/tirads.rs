//! ACR TI-RADS calculator for thyroid nodules.
//!
//! Five lexicon axes scored by table lookup, banded into categories TR1–TR5,
//! then a size-dependent conduct (FNA / follow-up / none) per the ACR
//! thresholds. Inputs arrive as free form strings; lookup accepts either the
//! canonical value or the display label.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CalculatorError;
use crate::lexicon::{
    find_points, TIRADS_COMPOSITION, TIRADS_ECHOGENIC_FOCI, TIRADS_ECHOGENICITY, TIRADS_MARGINS,
    TIRADS_SHAPE,
};
use crate::numeric::parse_leading_f64;

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TiradsInput {
    pub composition: Option<String>,
    pub echogenicity: Option<String>,
    pub shape: Option<String>,
    pub margins: Option<String>,
    pub echogenic_foci: Option<String>,
    /// Largest nodule dimension, free text (e.g. "1,2 cm", "15 mm").
    pub size: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum TiradsCategory {
    #[serde(rename = "1")]
    Tr1,
    #[serde(rename = "2")]
    Tr2,
    #[serde(rename = "3")]
    Tr3,
    #[serde(rename = "4")]
    Tr4,
    #[serde(rename = "5")]
    Tr5,
}

impl TiradsCategory {
    pub fn number(self) -> u32 {
        match self {
            TiradsCategory::Tr1 => 1,
            TiradsCategory::Tr2 => 2,
            TiradsCategory::Tr3 => 3,
            TiradsCategory::Tr4 => 4,
            TiradsCategory::Tr5 => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TiradsCategory::Tr1 => "TI-RADS 1 - Benigno",
            TiradsCategory::Tr2 => "TI-RADS 2 - Não suspeito",
            TiradsCategory::Tr3 => "TI-RADS 3 - Levemente suspeito",
            TiradsCategory::Tr4 => "TI-RADS 4 - Moderadamente suspeito",
            TiradsCategory::Tr5 => "TI-RADS 5 - Altamente suspeito",
        }
    }

    /// Semantic severity badge for presentation layers.
    pub fn badge(self) -> &'static str {
        match self {
            TiradsCategory::Tr1 | TiradsCategory::Tr2 => "benign",
            TiradsCategory::Tr3 => "attention",
            TiradsCategory::Tr4 => "warning",
            TiradsCategory::Tr5 => "critical",
        }
    }
}

impl fmt::Display for TiradsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl TryFrom<u32> for TiradsCategory {
    type Error = CalculatorError;

    fn try_from(n: u32) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(TiradsCategory::Tr1),
            2 => Ok(TiradsCategory::Tr2),
            3 => Ok(TiradsCategory::Tr3),
            4 => Ok(TiradsCategory::Tr4),
            5 => Ok(TiradsCategory::Tr5),
            _ => Err(CalculatorError::UnknownTiradsCategory(n)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum TiradsRisk {
    Benign,
    NotSuspicious,
    MildlySuspicious,
    ModeratelySuspicious,
    HighlySuspicious,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum TiradsConduct {
    NoFna,
    FollowUp,
    FnaRecommended,
    FnaStronglyRecommended,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TiradsBreakdown {
    pub composition: i32,
    pub echogenicity: i32,
    pub shape: i32,
    pub margins: i32,
    pub echogenic_foci: i32,
}

/// Category-specific size thresholds in centimeters. Infinite for TR1–TR2,
/// which never indicate FNA.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SizeThresholds {
    pub fna_threshold: f64,
    pub follow_up_threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TiradsResult {
    pub points: i32,
    pub category: TiradsCategory,
    pub category_label: String,
    pub risk: TiradsRisk,
    pub recommendation: String,
    pub conduct: TiradsConduct,
    pub conduct_label: String,
    pub breakdown: TiradsBreakdown,
    pub size_thresholds: SizeThresholds,
}

/// Normalize a free-text size to centimeters.
///
/// Strips everything but digits and decimal separators, accepts the comma
/// decimal separator, reads the leading number of what remains ("1,2 x 0,8
/// cm" → 1.2) and assumes millimeters when the magnitude exceeds 10 (nobody
/// reports a 15 cm thyroid nodule; "15" means 15 mm).
pub fn parse_size_cm(size: &str) -> Option<f64> {
    let cleaned: String = size
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    let num = parse_leading_f64(&cleaned)?;
    if num > 10.0 { Some(num / 10.0) } else { Some(num) }
}

/// Calculate the ACR TI-RADS category and conduct for a thyroid nodule.
pub fn calculate_tirads(input: &TiradsInput) -> TiradsResult {
    let breakdown = TiradsBreakdown {
        composition: find_points(TIRADS_COMPOSITION, input.composition.as_deref()),
        echogenicity: find_points(TIRADS_ECHOGENICITY, input.echogenicity.as_deref()),
        shape: find_points(TIRADS_SHAPE, input.shape.as_deref()),
        margins: find_points(TIRADS_MARGINS, input.margins.as_deref()),
        echogenic_foci: find_points(TIRADS_ECHOGENIC_FOCI, input.echogenic_foci.as_deref()),
    };

    let points = breakdown.composition
        + breakdown.echogenicity
        + breakdown.shape
        + breakdown.margins
        + breakdown.echogenic_foci;

    let (category, risk, fna_threshold, follow_up_threshold) = match points {
        0 => (TiradsCategory::Tr1, TiradsRisk::Benign, f64::INFINITY, f64::INFINITY),
        1..=2 => (
            TiradsCategory::Tr2,
            TiradsRisk::NotSuspicious,
            f64::INFINITY,
            f64::INFINITY,
        ),
        3 => (TiradsCategory::Tr3, TiradsRisk::MildlySuspicious, 2.5, 1.5),
        4..=6 => (TiradsCategory::Tr4, TiradsRisk::ModeratelySuspicious, 1.5, 1.0),
        _ => (TiradsCategory::Tr5, TiradsRisk::HighlySuspicious, 1.0, 0.5),
    };

    let category_label = category.label().to_string();
    let size_cm = input.size.as_deref().and_then(parse_size_cm);

    let (conduct, conduct_label, recommendation) = if category <= TiradsCategory::Tr2 {
        (
            TiradsConduct::NoFna,
            "Sem indicação de PAAF ou seguimento".to_string(),
            "Nódulo benigno. Não há necessidade de punção ou seguimento específico.".to_string(),
        )
    } else if let Some(size_cm) = size_cm {
        if size_cm >= fna_threshold {
            let conduct = if category == TiradsCategory::Tr5 {
                TiradsConduct::FnaStronglyRecommended
            } else {
                TiradsConduct::FnaRecommended
            };
            let conduct_label = if category == TiradsCategory::Tr5 {
                format!("PAAF fortemente recomendada (≥{fna_threshold}cm)")
            } else {
                format!("PAAF recomendada (≥{fna_threshold}cm)")
            };
            (
                conduct,
                conduct_label,
                format!(
                    "{category_label} ({points} pts). Nódulo de {size_cm:.1}cm. PAAF recomendada \
                     conforme ACR TI-RADS."
                ),
            )
        } else if size_cm >= follow_up_threshold {
            (
                TiradsConduct::FollowUp,
                format!("Seguimento recomendado (≥{follow_up_threshold}cm)"),
                format!(
                    "{category_label} ({points} pts). Nódulo de {size_cm:.1}cm. Seguimento \
                     ultrassonográfico em 1-2 anos."
                ),
            )
        } else {
            (
                TiradsConduct::NoFna,
                format!("Sem indicação (<{follow_up_threshold}cm)"),
                format!(
                    "{category_label} ({points} pts). Nódulo de {size_cm:.1}cm. Abaixo do limiar \
                     para PAAF/seguimento. Considerar controle conforme contexto clínico."
                ),
            )
        }
    } else {
        (
            TiradsConduct::FollowUp,
            "Informar tamanho para conduta".to_string(),
            format!(
                "{category_label} ({points} pts). Informe o tamanho do nódulo para determinar a \
                 conduta."
            ),
        )
    };

    TiradsResult {
        points,
        category,
        category_label,
        risk,
        recommendation,
        conduct,
        conduct_label,
        breakdown,
        size_thresholds: SizeThresholds {
            fna_threshold,
            follow_up_threshold,
        },
    }
}

/// Compact "Composição: +2 | Forma: +3" summary of the positive axes.
pub fn format_breakdown(breakdown: &TiradsBreakdown) -> String {
    let axes = [
        ("Composição", breakdown.composition),
        ("Ecogenicidade", breakdown.echogenicity),
        ("Forma", breakdown.shape),
        ("Margens", breakdown.margins),
        ("Focos", breakdown.echogenic_foci),
    ];

    let parts: Vec<String> = axes
        .iter()
        .filter(|(_, points)| *points > 0)
        .map(|(name, points)| format!("{name}: +{points}"))
        .collect();

    if parts.is_empty() {
        "Nenhum ponto".to_string()
    } else {
        parts.join(" | ")
    }
}
