//! Phrase templates for breast findings.
//!
//! Each lesion type renders to a full clinical sentence with the resolved
//! BI-RADS category and recommendation embedded. Missing fields fall back
//! to neutral substrings so a half-filled form still produces readable
//! prose.

use ecolaudo_calculators::birads::BiradsCategory;
use ecolaudo_core::models::finding::SelectedFinding;

use crate::classify::{BenignKind, CystKind, FibroadenomaKind, LesionType, SpecialKind};

/// Normalized inputs of a phrase template.
#[derive(Debug, Clone, Default)]
pub struct LesionData {
    pub size: String,
    pub location: String,
    pub margins: Option<String>,
    pub orientation: Option<String>,
    pub echogenicity: Option<String>,
    pub vascularization: String,
    pub posterior: Option<String>,
    pub birads: Option<String>,
    pub complexity: Option<String>,
    pub walls: Option<String>,
    pub solid: Option<String>,
    pub distribution: Option<String>,
    pub additional: Option<String>,
    pub content: Option<String>,
    pub implant_kind: Option<String>,
    pub position: Option<String>,
    pub findings: Option<String>,
}

pub const UNSPECIFIED_SIZE: &str = "dimensões não especificadas";
pub const UNSPECIFIED_LOCATION: &str = "localização não especificada";
const DEFAULT_VASCULARIZATION: &str = "Estudo Doppler realizado";

impl LesionData {
    pub fn unspecified() -> Self {
        Self {
            size: UNSPECIFIED_SIZE.to_string(),
            location: UNSPECIFIED_LOCATION.to_string(),
            vascularization: DEFAULT_VASCULARIZATION.to_string(),
            ..Self::default()
        }
    }
}

/// Pull the template inputs out of a finding's first instance.
///
/// Only the generic measurement fields are read (size, location,
/// description); lexicon-specific axes stay with the BI-RADS calculator.
pub fn extract_lesion_data(finding: &SelectedFinding) -> LesionData {
    let mut data = LesionData::unspecified();

    if let Some(size) = finding.first_text_field("size") {
        data.size = size.to_string();
    }
    if let Some(location) = finding.first_text_field("location") {
        data.location = location.to_string();
    }
    if let Some(description) = finding.first_text_field("description") {
        data.additional = Some(description.to_string());
    }

    data
}

fn nodule_phrase(category: BiradsCategory, data: &LesionData) -> String {
    let size = &data.size;
    let location = &data.location;
    let vascularization = &data.vascularization;

    match category {
        BiradsCategory::C1 | BiradsCategory::C2 => format!(
            "Nódulo sólido de contornos regulares e bem definidos, medindo {size}, localizado \
             {location}. Apresenta margens circunscritas, orientação paralela e padrão hipoecóico \
             homogêneo. {vascularization}. BI-RADS 2 - Achado benigno."
        ),
        BiradsCategory::C3 => format!(
            "Nódulo sólido ovalado, de contornos regulares, medindo {size}, localizado \
             {location}. Apresenta margens circunscritas, orientação paralela à pele e ecotextura \
             homogênea. {vascularization}. BI-RADS 3 - Achado provavelmente benigno. Sugestão de \
             controle ultrassonográfico em 6 meses."
        ),
        BiradsCategory::C4a => {
            let margins = data.margins.as_deref().unwrap_or("parcialmente indefinidos");
            let orientation = data.orientation.as_deref().unwrap_or("orientação não paralela");
            let echogenicity = data.echogenicity.as_deref().unwrap_or("ecotextura heterogênea");
            format!(
                "Nódulo sólido medindo {size}, localizado {location}. Apresenta contornos \
                 {margins}, {orientation} e {echogenicity}. {vascularization}. BI-RADS 4A - \
                 Lesão suspeita de baixa probabilidade de malignidade. Indicada investigação \
                 histopatológica."
            )
        }
        BiradsCategory::C4b => {
            let margins = data.margins.as_deref().unwrap_or("espiculadas/microlobuladas");
            let orientation = data.orientation.as_deref().unwrap_or("orientação não paralela");
            let echogenicity = data
                .echogenicity
                .as_deref()
                .unwrap_or("hipoecogenicidade marcante");
            let posterior = data.posterior.as_deref().unwrap_or("Sombra acústica posterior");
            format!(
                "Nódulo sólido irregular medindo {size}, localizado {location}. Caracteriza-se \
                 por margens {margins}, {orientation} e {echogenicity}. {vascularization}. \
                 {posterior} presente. BI-RADS 4B - Lesão suspeita de moderada probabilidade de \
                 malignidade. Fortemente indicada investigação histopatológica."
            )
        }
        BiradsCategory::C4c => {
            let posterior = data.posterior.as_deref().unwrap_or("sombra acústica posterior");
            format!(
                "Nódulo sólido de morfologia irregular medindo {size}, localizado {location}. \
                 Apresenta múltiplas características suspeitas: margens espiculadas, orientação \
                 não paralela, acentuada hipoecogenicidade e {posterior}. {vascularization}. \
                 BI-RADS 4C - Lesão suspeita de alta probabilidade de malignidade. Urgente \
                 investigação histopatológica."
            )
        }
        BiradsCategory::C5 | BiradsCategory::C6 => format!(
            "Nódulo sólido de morfologia francamente irregular medindo {size}, localizado \
             {location}. Apresenta critérios altamente suspeitos: margens espiculadas, orientação \
             antiparalela, acentuada hipoecogenicidade, sombra acústica posterior e \
             {vascularization}. BI-RADS 5 - Lesão altamente suspeita de malignidade. Indicação \
             urgente de biópsia."
        ),
    }
}

fn cyst_phrase(kind: CystKind, data: &LesionData) -> String {
    let size = &data.size;
    let location = &data.location;

    match kind {
        CystKind::Simple => format!(
            "Imagem anecóica arredondada, de paredes finas e regulares, medindo {size}, com \
             acentuado reforço acústico posterior, localizada {location}. Achado compatível com \
             cisto simples. BI-RADS 2 - Achado benigno."
        ),
        CystKind::Clustered => format!(
            "Múltiplos cistos simples agrupados, o maior medindo {size}, localizados {location}. \
             Apresentam características típicas de cistos simples com paredes finas e reforço \
             acústico posterior. BI-RADS 2 - Achados benignos."
        ),
        CystKind::Complex => {
            let complexity = data
                .complexity
                .as_deref()
                .unwrap_or("com septações e debris internos");
            let walls = data.walls.as_deref().unwrap_or("Paredes espessadas irregulares");
            let solid = data
                .solid
                .as_deref()
                .unwrap_or("Componente sólido vegetante identificado");
            let birads = data.birads.as_deref().unwrap_or("4A");
            let conclusion = if birads == "3" {
                "Cisto complicado. Sugestão de controle em 6 meses."
            } else {
                "Lesão cística complexa suspeita. Indicada investigação complementar."
            };
            format!(
                "Formação cística {complexity}, medindo {size}, localizada {location}. {walls}. \
                 {solid}. BI-RADS {birads} - {conclusion}"
            )
        }
    }
}

fn fibroadenoma_phrase(kind: FibroadenomaKind, data: &LesionData) -> String {
    let size = &data.size;
    let location = &data.location;
    let vascularization = &data.vascularization;

    match kind {
        FibroadenomaKind::Typical => format!(
            "Nódulo sólido ovalado, bem delimitado, de contornos regulares e lobulados, medindo \
             {size}, localizado {location}. Apresenta orientação paralela à pele, margens \
             circunscritas e ecotextura homogênea hipoecóica. {vascularization}. Achado \
             compatível com fibroadenoma. BI-RADS 2 - Achado benigno."
        ),
        FibroadenomaKind::Giant => format!(
            "Volumosa formação sólida ovalada medindo {size}, localizada {location}. Apresenta \
             contornos lobulados bem definidos, orientação paralela e ecotextura heterogênea com \
             áreas hipoecóicas. {vascularization}. Compatível com fibroadenoma gigante ou tumor \
             filoide de baixo grau. BI-RADS 3 - Sugestão de controle evolutivo e considerar \
             investigação complementar se sintomático."
        ),
    }
}

fn benign_phrase(kind: BenignKind, data: &LesionData) -> String {
    match kind {
        BenignKind::Fibrocystic => {
            let distribution = data
                .distribution
                .as_deref()
                .unwrap_or("bilaterais e simétricas");
            let additional = data.additional.as_deref().unwrap_or_default();
            format!(
                "Alterações fibrocísticas difusas caracterizadas por múltiplos microcistos e \
                 áreas de fibrose {distribution}. {additional}. BI-RADS 2 - Alterações benignas."
            )
        }
        BenignKind::Duct => {
            let location = if data.location == UNSPECIFIED_LOCATION {
                "retroareolar"
            } else {
                &data.location
            };
            let size = if data.size == UNSPECIFIED_SIZE {
                "3-4mm"
            } else {
                &data.size
            };
            let content = data
                .content
                .as_deref()
                .unwrap_or("Conteúdo anecóico/hipoecóico em seu interior");
            format!(
                "Ectasia ductal {location}, com ductos medindo até {size}. {content}. BI-RADS 2 \
                 - Alteração benigna."
            )
        }
        BenignKind::LymphNode => {
            let location = if data.location == UNSPECIFIED_LOCATION {
                "axilar"
            } else {
                &data.location
            };
            let size = &data.size;
            format!(
                "Linfonodo {location} de aspecto habitual, medindo {size}, com córtex hipoecóico \
                 fino e hilo gorduroso preservado. BI-RADS 2 - Linfonodo de aspecto benigno."
            )
        }
    }
}

fn special_phrase(kind: SpecialKind, data: &LesionData) -> String {
    match kind {
        SpecialKind::Normal => normal_breast_phrase().to_string(),
        SpecialKind::Implant => {
            let implant_kind = data.implant_kind.as_deref().unwrap_or("de silicone");
            let position = data.position.as_deref().unwrap_or("retromuscular");
            let additional = data.additional.as_deref().unwrap_or_default();
            format!(
                "Prótese mamária {implant_kind} {position} de contornos regulares, sem \
                 evidências de ruptura ou coleções periprotéticas. {additional}"
            )
        }
        SpecialKind::PostSurgical => {
            let location = &data.location;
            let findings = data
                .findings
                .as_deref()
                .unwrap_or("área de remodelação cicatricial e distorção arquitetural");
            let additional = data.additional.as_deref().unwrap_or_default();
            format!(
                "Alterações pós-operatórias em {location} caracterizadas por {findings}. \
                 Ausência de imagens nodulares suspeitas no leito cirúrgico. {additional}"
            )
        }
    }
}

/// Boilerplate for a breast with no reportable findings.
pub fn normal_breast_phrase() -> &'static str {
    "Tecido mamário de ecotextura preservada, sem evidências de nódulos sólidos ou formações \
     císticas significativas. Ductos de calibre habitual. Ausência de sinais diretos ou \
     indiretos de malignidade."
}

/// Render the sentence for a classified lesion.
pub fn phrase_for(lesion_type: LesionType, data: &LesionData) -> String {
    match lesion_type {
        LesionType::Nodule(category) => nodule_phrase(category, data),
        LesionType::Cyst(kind) => cyst_phrase(kind, data),
        LesionType::Fibroadenoma(kind) => fibroadenoma_phrase(kind, data),
        LesionType::Benign(kind) => benign_phrase(kind, data),
        LesionType::Special(kind) => special_phrase(kind, data),
    }
}

/// Last-resort sentence when a finding cannot be rendered through its
/// template; one malformed finding must never abort the whole report.
pub fn fallback_phrase(data: &LesionData) -> String {
    format!("Achado em {}, medindo {}.", data.location, data.size)
}
