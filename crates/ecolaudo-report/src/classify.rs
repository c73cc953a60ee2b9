//! Finding classification.
//!
//! Buckets a structured finding into a lesion type by keyword-matching its
//! catalog name and free-text description. The rules live in an explicit
//! ordered list so precedence is auditable rule by rule; the first rule
//! that fires wins.

use ecolaudo_calculators::birads::BiradsCategory;
use ecolaudo_core::models::finding::SelectedFinding;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CystKind {
    Simple,
    Clustered,
    Complex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FibroadenomaKind {
    Typical,
    Giant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenignKind {
    Fibrocystic,
    Duct,
    LymphNode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialKind {
    Normal,
    Implant,
    PostSurgical,
}

/// Lesion type a finding resolves to; selects the phrase template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", content = "subtype", rename_all = "snake_case")]
pub enum LesionType {
    Nodule(BiradsCategory),
    Cyst(CystKind),
    Fibroadenoma(FibroadenomaKind),
    Benign(BenignKind),
    Special(SpecialKind),
}

impl LesionType {
    /// BI-RADS category carried by the lesion type, for nodule subtypes.
    pub fn birads(self) -> Option<BiradsCategory> {
        match self {
            LesionType::Nodule(category) => Some(category),
            _ => None,
        }
    }
}

/// One classification rule: a predicate over (lowercased finding name,
/// lowercased description) and the type it resolves to when it fires.
type Rule = (fn(&str, &str) -> bool, fn(&str, &str) -> LesionType);

fn is_cyst(name: &str, _desc: &str) -> bool {
    name.contains("cisto")
}

fn cyst_kind(name: &str, desc: &str) -> LesionType {
    if name.contains("simples") || desc.contains("simples") {
        LesionType::Cyst(CystKind::Simple)
    } else if name.contains("agrupados") || desc.contains("agrupados") {
        LesionType::Cyst(CystKind::Clustered)
    } else {
        LesionType::Cyst(CystKind::Complex)
    }
}

fn is_fibroadenoma(name: &str, _desc: &str) -> bool {
    name.contains("fibroadenoma")
}

fn fibroadenoma_kind(name: &str, desc: &str) -> LesionType {
    if name.contains("gigante") || desc.contains("gigante") {
        LesionType::Fibroadenoma(FibroadenomaKind::Giant)
    } else {
        LesionType::Fibroadenoma(FibroadenomaKind::Typical)
    }
}

fn is_fibrocystic(name: &str, _desc: &str) -> bool {
    name.contains("fibrocístic")
}

fn is_duct(name: &str, _desc: &str) -> bool {
    name.contains("ectasia") || name.contains("ducto")
}

fn is_lymph_node(name: &str, _desc: &str) -> bool {
    name.contains("linfonodo")
}

fn is_implant(name: &str, _desc: &str) -> bool {
    name.contains("prótese") || name.contains("implante")
}

fn is_post_surgical(name: &str, _desc: &str) -> bool {
    name.contains("pós-operatório") || name.contains("cicatriz")
}

fn is_suspicious(name: &str, desc: &str) -> bool {
    desc.contains("espiculad") || desc.contains("irregular") || name.contains("suspeito")
}

fn is_malignant(_name: &str, desc: &str) -> bool {
    desc.contains("maligno") || desc.contains("birads 5")
}

fn is_benign_nodule(_name: &str, desc: &str) -> bool {
    desc.contains("benigno") || desc.contains("birads 2")
}

/// Rule table in priority order. Name-based buckets come before the
/// description suspicion keywords, which come before the default.
const RULES: &[Rule] = &[
    (is_cyst, cyst_kind),
    (is_fibroadenoma, fibroadenoma_kind),
    (is_fibrocystic, |_, _| LesionType::Benign(BenignKind::Fibrocystic)),
    (is_duct, |_, _| LesionType::Benign(BenignKind::Duct)),
    (is_lymph_node, |_, _| LesionType::Benign(BenignKind::LymphNode)),
    (is_implant, |_, _| LesionType::Special(SpecialKind::Implant)),
    (is_post_surgical, |_, _| LesionType::Special(SpecialKind::PostSurgical)),
    (is_suspicious, |_, _| LesionType::Nodule(BiradsCategory::C4b)),
    (is_malignant, |_, _| LesionType::Nodule(BiradsCategory::C5)),
    (is_benign_nodule, |_, _| LesionType::Nodule(BiradsCategory::C2)),
];

/// Classify a finding by its catalog name and first-instance description.
///
/// Nothing matching falls back to a probably-benign nodule (BI-RADS 3).
pub fn determine_lesion_type(finding: &SelectedFinding) -> LesionType {
    let name = finding.finding.name.to_lowercase();
    let description = finding
        .first_text_field("description")
        .unwrap_or_default()
        .to_lowercase();

    for (predicate, resolve) in RULES {
        if predicate(&name, &description) {
            return resolve(&name, &description);
        }
    }

    LesionType::Nodule(BiradsCategory::C3)
}

/// Exam-level BI-RADS: the ordinal maximum across all findings.
pub fn determine_final_birads(findings: &[SelectedFinding]) -> BiradsCategory {
    findings
        .iter()
        .filter_map(|f| determine_lesion_type(f).birads())
        .max()
        .unwrap_or(BiradsCategory::C1)
}
