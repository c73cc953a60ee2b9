//! BI-RADS category calculator for breast lesions.
//!
//! Scores the ultrasound lexicons of ACR BI-RADS 5th edition and converts
//! the sum into a category with its standard recommendation. A simple cyst
//! is recognized directly from its diagnostic criteria and short-circuits
//! to category 2.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CalculatorError;
use crate::lexicon::{
    find_points, LexiconEntry, BIRADS_CALCIFICATIONS, BIRADS_ECHO_PATTERN, BIRADS_MARGINS,
    BIRADS_ORIENTATION, BIRADS_POSTERIOR, BIRADS_SHAPE, BIRADS_VASCULARITY,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Side {
    #[serde(rename = "direita")]
    Right,
    #[serde(rename = "esquerda")]
    Left,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum LesionKind {
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "nodulo")]
    Nodule,
    #[serde(rename = "cisto")]
    Cyst,
    #[serde(rename = "outros")]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Shape {
    #[serde(rename = "oval")]
    Oval,
    #[serde(rename = "redonda")]
    Round,
    #[serde(rename = "irregular")]
    Irregular,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Orientation {
    #[serde(rename = "paralela")]
    Parallel,
    #[serde(rename = "nao-paralela")]
    NotParallel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Margins {
    #[serde(rename = "circunscritas")]
    Circumscribed,
    #[serde(rename = "indistintas")]
    Indistinct,
    #[serde(rename = "angular")]
    Angular,
    #[serde(rename = "microlobuladas")]
    Microlobulated,
    #[serde(rename = "espiculadas")]
    Spiculated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum EchoPattern {
    #[serde(rename = "anecoico")]
    Anechoic,
    #[serde(rename = "hiperecoico")]
    Hyperechoic,
    #[serde(rename = "isoecoico")]
    Isoechoic,
    #[serde(rename = "hipoecoico")]
    Hypoechoic,
    #[serde(rename = "heterogeneo")]
    Heterogeneous,
    #[serde(rename = "complexo")]
    Complex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PosteriorFeature {
    #[serde(rename = "sem-alteracao")]
    NoChange,
    #[serde(rename = "reforco")]
    Enhancement,
    #[serde(rename = "sombra")]
    Shadowing,
    #[serde(rename = "combinado")]
    Combined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Calcifications {
    #[serde(rename = "ausentes")]
    Absent,
    #[serde(rename = "macro")]
    Macro,
    #[serde(rename = "micro")]
    Micro,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Vascularity {
    #[serde(rename = "ausente")]
    Absent,
    #[serde(rename = "minima")]
    Minimal,
    #[serde(rename = "moderada")]
    Moderate,
    #[serde(rename = "acentuada")]
    Marked,
}

/// Breast quadrant / region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum BreastLocation {
    #[serde(rename = "QSE")]
    UpperOuter,
    #[serde(rename = "QSI")]
    UpperInner,
    #[serde(rename = "QIE")]
    LowerOuter,
    #[serde(rename = "QII")]
    LowerInner,
    #[serde(rename = "retroareolar")]
    Retroareolar,
    #[serde(rename = "prolongamento-axilar")]
    AxillaryTail,
}

impl Shape {
    pub fn value(self) -> &'static str {
        match self {
            Shape::Oval => "oval",
            Shape::Round => "redonda",
            Shape::Irregular => "irregular",
        }
    }
}

impl Orientation {
    pub fn value(self) -> &'static str {
        match self {
            Orientation::Parallel => "paralela",
            Orientation::NotParallel => "nao-paralela",
        }
    }
}

impl Margins {
    pub fn value(self) -> &'static str {
        match self {
            Margins::Circumscribed => "circunscritas",
            Margins::Indistinct => "indistintas",
            Margins::Angular => "angular",
            Margins::Microlobulated => "microlobuladas",
            Margins::Spiculated => "espiculadas",
        }
    }
}

impl EchoPattern {
    pub fn value(self) -> &'static str {
        match self {
            EchoPattern::Anechoic => "anecoico",
            EchoPattern::Hyperechoic => "hiperecoico",
            EchoPattern::Isoechoic => "isoecoico",
            EchoPattern::Hypoechoic => "hipoecoico",
            EchoPattern::Heterogeneous => "heterogeneo",
            EchoPattern::Complex => "complexo",
        }
    }
}

impl PosteriorFeature {
    pub fn value(self) -> &'static str {
        match self {
            PosteriorFeature::NoChange => "sem-alteracao",
            PosteriorFeature::Enhancement => "reforco",
            PosteriorFeature::Shadowing => "sombra",
            PosteriorFeature::Combined => "combinado",
        }
    }
}

impl Calcifications {
    pub fn value(self) -> &'static str {
        match self {
            Calcifications::Absent => "ausentes",
            Calcifications::Macro => "macro",
            Calcifications::Micro => "micro",
        }
    }
}

impl Vascularity {
    pub fn value(self) -> &'static str {
        match self {
            Vascularity::Absent => "ausente",
            Vascularity::Minimal => "minima",
            Vascularity::Moderate => "moderada",
            Vascularity::Marked => "acentuada",
        }
    }
}

impl BreastLocation {
    /// Formal prose form used in narrative text.
    pub fn prose(self) -> &'static str {
        match self {
            BreastLocation::UpperOuter => "quadrante superior externo",
            BreastLocation::UpperInner => "quadrante superior interno",
            BreastLocation::LowerOuter => "quadrante inferior externo",
            BreastLocation::LowerInner => "quadrante inferior interno",
            BreastLocation::Retroareolar => "região retroareolar",
            BreastLocation::AxillaryTail => "prolongamento axilar",
        }
    }
}

/// Final BI-RADS category with its documented total order.
///
/// The order is ordinal, not lexicographic: `4A < 4B < 4C < 5`. Derived
/// `Ord` on the variant declaration order encodes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum BiradsCategory {
    #[serde(rename = "1")]
    C1,
    #[serde(rename = "2")]
    C2,
    #[serde(rename = "3")]
    C3,
    #[serde(rename = "4A")]
    C4a,
    #[serde(rename = "4B")]
    C4b,
    #[serde(rename = "4C")]
    C4c,
    #[serde(rename = "5")]
    C5,
    #[serde(rename = "6")]
    C6,
}

impl BiradsCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            BiradsCategory::C1 => "1",
            BiradsCategory::C2 => "2",
            BiradsCategory::C3 => "3",
            BiradsCategory::C4a => "4A",
            BiradsCategory::C4b => "4B",
            BiradsCategory::C4c => "4C",
            BiradsCategory::C5 => "5",
            BiradsCategory::C6 => "6",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            BiradsCategory::C1 => "Negativo",
            BiradsCategory::C2 => "Benigno",
            BiradsCategory::C3 => "Provavelmente Benigno",
            BiradsCategory::C4a => "Baixa Suspeita de Malignidade",
            BiradsCategory::C4b => "Moderada Suspeita de Malignidade",
            BiradsCategory::C4c => "Alta Suspeita de Malignidade",
            BiradsCategory::C5 => "Altamente Suspeito de Malignidade",
            BiradsCategory::C6 => "Malignidade Comprovada",
        }
    }

    pub fn recommendation(self) -> &'static str {
        match self {
            BiradsCategory::C1 => "Rotina de rastreamento anual.",
            BiradsCategory::C2 => "Achado benigno. Rotina de rastreamento anual.",
            BiradsCategory::C3 => {
                "Achado provavelmente benigno. Controle ultrassonográfico em 6 meses."
            }
            BiradsCategory::C4a => "Baixa suspeita de malignidade (2-10%). Biópsia indicada.",
            BiradsCategory::C4b => {
                "Moderada suspeita de malignidade (10-50%). Biópsia recomendada."
            }
            BiradsCategory::C4c => {
                "Alta suspeita de malignidade (50-95%). Biópsia fortemente recomendada."
            }
            BiradsCategory::C5 => {
                "Altamente suspeito de malignidade (>95%). Biópsia urgente indicada."
            }
            BiradsCategory::C6 => "Malignidade comprovada por biópsia. Tratamento oncológico.",
        }
    }
}

impl fmt::Display for BiradsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BiradsCategory {
    type Err = CalculatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "1" => Ok(BiradsCategory::C1),
            "2" => Ok(BiradsCategory::C2),
            "3" => Ok(BiradsCategory::C3),
            "4A" => Ok(BiradsCategory::C4a),
            "4B" => Ok(BiradsCategory::C4b),
            "4C" => Ok(BiradsCategory::C4c),
            "5" => Ok(BiradsCategory::C5),
            "6" => Ok(BiradsCategory::C6),
            _ => Err(CalculatorError::UnknownBiradsCategory(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum SuspicionLevel {
    #[serde(rename = "benigno")]
    Benign,
    #[serde(rename = "provavelmente-benigno")]
    ProbablyBenign,
    #[serde(rename = "suspeito")]
    Suspicious,
    #[serde(rename = "altamente-suspeito")]
    HighlySuspicious,
}

/// A breast lesion as described on the exam form. Every lexicon is
/// optional; unset axes simply contribute no points.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BreastLesion {
    pub side: Option<Side>,
    pub kind: Option<LesionKind>,
    pub size: Option<String>,
    pub location: Option<BreastLocation>,
    pub shape: Option<Shape>,
    pub orientation: Option<Orientation>,
    pub margins: Option<Margins>,
    pub echo_pattern: Option<EchoPattern>,
    pub posterior: Option<PosteriorFeature>,
    pub calcifications: Option<Calcifications>,
    pub vascularity: Option<Vascularity>,
    pub notes: Option<String>,
}

/// Per-lexicon contribution, kept so the UI can show why a score was
/// produced.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ScoreDetail {
    pub lexicon: String,
    pub selected: String,
    pub points: i32,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BiradsResult {
    pub category: BiradsCategory,
    pub total_points: i32,
    pub details: Vec<ScoreDetail>,
    pub recommendation: String,
    pub suspicion: SuspicionLevel,
}

fn detail(table: &[LexiconEntry], lexicon: &str, value: &str) -> ScoreDetail {
    let entry = table.iter().find(|e| e.value == value);
    ScoreDetail {
        lexicon: lexicon.to_string(),
        selected: entry.map(|e| e.label.to_string()).unwrap_or_else(|| value.to_string()),
        points: find_points(table, Some(value)),
        description: entry.map(|e| e.description.to_string()).unwrap_or_default(),
    }
}

/// Per-lexicon score breakdown for every populated axis of the lesion.
pub fn score_details(lesion: &BreastLesion) -> Vec<ScoreDetail> {
    let mut details = Vec::new();

    if let Some(shape) = lesion.shape {
        details.push(detail(BIRADS_SHAPE, "Forma", shape.value()));
    }
    if let Some(orientation) = lesion.orientation {
        details.push(detail(BIRADS_ORIENTATION, "Orientação", orientation.value()));
    }
    if let Some(margins) = lesion.margins {
        details.push(detail(BIRADS_MARGINS, "Margens", margins.value()));
    }
    if let Some(echo) = lesion.echo_pattern {
        details.push(detail(BIRADS_ECHO_PATTERN, "Padrão de Eco", echo.value()));
    }
    if let Some(posterior) = lesion.posterior {
        details.push(detail(
            BIRADS_POSTERIOR,
            "Características Posteriores",
            posterior.value(),
        ));
    }
    if let Some(calc) = lesion.calcifications {
        details.push(detail(BIRADS_CALCIFICATIONS, "Calcificações", calc.value()));
    }
    if let Some(vasc) = lesion.vascularity {
        details.push(detail(BIRADS_VASCULARITY, "Vascularização", vasc.value()));
    }

    details
}

/// Diagnostic criteria of a simple cyst: anechoic content, posterior
/// enhancement, oval or round shape, circumscribed (or unreported) margins.
fn is_simple_cyst(lesion: &BreastLesion) -> bool {
    lesion.echo_pattern == Some(EchoPattern::Anechoic)
        && lesion.posterior == Some(PosteriorFeature::Enhancement)
        && matches!(lesion.shape, Some(Shape::Oval) | Some(Shape::Round))
        && matches!(lesion.margins, None | Some(Margins::Circumscribed))
}

fn category_for_points(total: i32) -> BiradsCategory {
    match total {
        t if t <= 0 => BiradsCategory::C2,
        1..=2 => BiradsCategory::C3,
        3..=4 => BiradsCategory::C4a,
        5..=6 => BiradsCategory::C4b,
        7..=8 => BiradsCategory::C4c,
        _ => BiradsCategory::C5,
    }
}

fn suspicion_for_category(category: BiradsCategory) -> SuspicionLevel {
    match category {
        BiradsCategory::C1 | BiradsCategory::C2 => SuspicionLevel::Benign,
        BiradsCategory::C3 => SuspicionLevel::ProbablyBenign,
        BiradsCategory::C4a | BiradsCategory::C4b | BiradsCategory::C4c => {
            SuspicionLevel::Suspicious
        }
        BiradsCategory::C5 | BiradsCategory::C6 => SuspicionLevel::HighlySuspicious,
    }
}

/// Calculate the BI-RADS category of a breast lesion.
///
/// Pure function: identical input always yields identical output, and a
/// categorical mismatch never errors — unknown axes just score zero.
pub fn calculate_birads(lesion: &BreastLesion) -> BiradsResult {
    let details = score_details(lesion);
    let total_points: i32 = details.iter().map(|d| d.points).sum();

    if is_simple_cyst(lesion) {
        return BiradsResult {
            category: BiradsCategory::C2,
            total_points,
            details,
            recommendation: format!(
                "Cisto simples detectado. {}",
                BiradsCategory::C2.recommendation()
            ),
            suspicion: SuspicionLevel::Benign,
        };
    }

    let category = category_for_points(total_points);
    BiradsResult {
        category,
        total_points,
        details,
        recommendation: category.recommendation().to_string(),
        suspicion: suspicion_for_category(category),
    }
}

/// Check a lesion for clinically inconsistent lexicon combinations.
///
/// Returns messages rather than failing; an inconsistent form still scores.
pub fn validate_lesion(lesion: &BreastLesion) -> Vec<String> {
    let mut errors = Vec::new();

    if lesion.kind == Some(LesionKind::Cyst)
        && matches!(
            lesion.margins,
            Some(Margins::Spiculated) | Some(Margins::Microlobulated)
        )
    {
        let margins = lesion.margins.map(Margins::value).unwrap_or_default();
        errors.push(format!(
            "Cistos não devem ter margens {margins}. Margens espiculadas/microlobuladas são \
             características de lesões sólidas suspeitas."
        ));
    }

    if lesion.echo_pattern == Some(EchoPattern::Anechoic)
        && lesion.posterior == Some(PosteriorFeature::Shadowing)
    {
        errors.push(
            "Lesão anecoica (sem ecos internos) tipicamente não causa sombra acústica. Sombra \
             sugere conteúdo sólido denso."
                .to_string(),
        );
    }

    if lesion.kind == Some(LesionKind::Cyst)
        && lesion.echo_pattern == Some(EchoPattern::Anechoic)
        && matches!(
            lesion.vascularity,
            Some(Vascularity::Moderate) | Some(Vascularity::Marked)
        )
    {
        errors.push(
            "Cisto simples (anecoico) não deve apresentar vascularização interna. Vascularização \
             sugere componente sólido."
                .to_string(),
        );
    }

    if matches!(lesion.shape, Some(Shape::Oval) | Some(Shape::Round))
        && lesion.margins == Some(Margins::Spiculated)
    {
        errors.push(
            "Inconsistência: lesão com forma regular (oval/redonda) raramente apresenta margens \
             espiculadas. Revisar achados."
                .to_string(),
        );
    }

    if lesion.orientation == Some(Orientation::NotParallel)
        && lesion.shape == Some(Shape::Oval)
        && lesion.margins == Some(Margins::Circumscribed)
        && lesion.echo_pattern == Some(EchoPattern::Hyperechoic)
    {
        errors.push(
            "Orientação não-paralela em lesão com características benignas é incomum. Reavaliar \
             orientação."
                .to_string(),
        );
    }

    if lesion.posterior == Some(PosteriorFeature::Enhancement)
        && lesion.echo_pattern == Some(EchoPattern::Hypoechoic)
        && lesion.margins == Some(Margins::Spiculated)
    {
        errors.push(
            "Reforço acústico posterior é raro em lesões sólidas suspeitas (hipoecoicas com \
             margens espiculadas). Verificar achados."
                .to_string(),
        );
    }

    if lesion.kind == Some(LesionKind::Cyst)
        && lesion.echo_pattern == Some(EchoPattern::Anechoic)
        && lesion.calcifications == Some(Calcifications::Micro)
    {
        errors.push(
            "Microcalcificações não são esperadas em cistos simples. Considerar reclassificar \
             como lesão complexa."
                .to_string(),
        );
    }

    if lesion.kind == Some(LesionKind::Nodule)
        && lesion.shape.is_none()
        && lesion.margins.is_none()
        && lesion.echo_pattern.is_none()
        && lesion.posterior.is_none()
    {
        errors.push(
            "Lesão nodular sem características definidas. Preencher ao menos os léxicos \
             principais (forma, margens, padrão de eco)."
                .to_string(),
        );
    }

    errors
}
