//! Ankle-brachial and toe-brachial index computation.
//!
//! Ratios of distal to brachial systolic pressure, banded into the standard
//! peripheral-arterial-disease severity grades. The derivation is one-way:
//! [`compute_pressure_indices`] is pure, and the host applies the results
//! back onto its form fields with [`apply_to_fields`], which is idempotent —
//! recomputing with unchanged inputs writes nothing.

use std::collections::BTreeMap;

use ecolaudo_core::models::finding::FieldValue;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::numeric::parse_leading_f64;

/// Form field ids shared with the browser UI.
pub const FIELD_BRACHIAL: &str = "pas-braquial";
pub const FIELD_RIGHT_ANKLE: &str = "pas-tornoz-d";
pub const FIELD_LEFT_ANKLE: &str = "pas-tornoz-e";
pub const FIELD_RIGHT_TOE: &str = "pressao-halux-d";
pub const FIELD_LEFT_TOE: &str = "pressao-halux-e";

const FIELD_RIGHT_ABI: &str = "itb-direito";
const FIELD_LEFT_ABI: &str = "itb-esquerdo";
const FIELD_RIGHT_TBI: &str = "idb-direito";
const FIELD_LEFT_TBI: &str = "idb-esquerdo";
const FIELD_RIGHT_ABI_CLASS: &str = "classificacao-d";
const FIELD_LEFT_ABI_CLASS: &str = "classificacao-e";
const FIELD_RIGHT_TBI_CLASS: &str = "classificacao-idb-d";
const FIELD_LEFT_TBI_CLASS: &str = "classificacao-idb-e";

/// Systolic pressures in mmHg. `None` for fields not filled in yet.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PressureInputs {
    pub brachial: Option<f64>,
    pub right_ankle: Option<f64>,
    pub left_ankle: Option<f64>,
    pub right_toe: Option<f64>,
    pub left_toe: Option<f64>,
}

impl PressureInputs {
    /// Read the pressure fields out of a form value map, ignoring anything
    /// non-positive or non-numeric.
    pub fn from_fields(fields: &BTreeMap<String, FieldValue>) -> Self {
        let read = |key: &str| -> Option<f64> {
            fields
                .get(key)
                .and_then(FieldValue::as_text)
                .and_then(parse_leading_f64)
                .filter(|p| *p > 0.0)
        };

        Self {
            brachial: read(FIELD_BRACHIAL),
            right_ankle: read(FIELD_RIGHT_ANKLE),
            left_ankle: read(FIELD_LEFT_ANKLE),
            right_toe: read(FIELD_RIGHT_TOE),
            left_toe: read(FIELD_LEFT_TOE),
        }
    }
}

/// Ankle-brachial index severity band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AbiBand {
    Incompressible,
    Normal,
    Mild,
    Moderate,
    Severe,
}

impl AbiBand {
    pub fn classify(ratio: f64) -> Self {
        if ratio > 1.30 {
            AbiBand::Incompressible
        } else if ratio >= 0.91 {
            AbiBand::Normal
        } else if ratio >= 0.70 {
            AbiBand::Mild
        } else if ratio >= 0.40 {
            AbiBand::Moderate
        } else {
            AbiBand::Severe
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AbiBand::Incompressible => "Incompressível (>1.30)",
            AbiBand::Normal => "Normal (0.91-1.30)",
            AbiBand::Mild => "Doença leve (0.70-0.90)",
            AbiBand::Moderate => "Doença moderada (0.40-0.69)",
            AbiBand::Severe => "Doença grave (<0.40)",
        }
    }
}

/// Toe-brachial index severity band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum TbiBand {
    Normal,
    Mild,
    Moderate,
    Severe,
}

impl TbiBand {
    pub fn classify(ratio: f64) -> Self {
        if ratio > 0.70 {
            TbiBand::Normal
        } else if ratio >= 0.50 {
            TbiBand::Mild
        } else if ratio >= 0.30 {
            TbiBand::Moderate
        } else {
            TbiBand::Severe
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TbiBand::Normal => "Normal (>0.70)",
            TbiBand::Mild => "Doença leve (0.50-0.69)",
            TbiBand::Moderate => "Doença moderada (0.30-0.49)",
            TbiBand::Severe => "Doença grave (<0.30)",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AbiMeasurement {
    pub ratio: f64,
    /// Two-decimal display form, also what gets written to the form field.
    pub formatted: String,
    pub band: AbiBand,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TbiMeasurement {
    pub ratio: f64,
    pub formatted: String,
    pub band: TbiBand,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PressureIndexReport {
    pub right_abi: Option<AbiMeasurement>,
    pub left_abi: Option<AbiMeasurement>,
    pub right_tbi: Option<TbiMeasurement>,
    pub left_tbi: Option<TbiMeasurement>,
}

fn abi(brachial: f64, distal: Option<f64>) -> Option<AbiMeasurement> {
    let ratio = distal? / brachial;
    Some(AbiMeasurement {
        ratio,
        formatted: format!("{ratio:.2}"),
        band: AbiBand::classify(ratio),
    })
}

fn tbi(brachial: f64, distal: Option<f64>) -> Option<TbiMeasurement> {
    let ratio = distal? / brachial;
    Some(TbiMeasurement {
        ratio,
        formatted: format!("{ratio:.2}"),
        band: TbiBand::classify(ratio),
    })
}

/// Compute every index for which both the brachial pressure and the distal
/// pressure of that side are present. Without a positive brachial pressure
/// nothing is computed.
pub fn compute_pressure_indices(inputs: &PressureInputs) -> PressureIndexReport {
    let Some(brachial) = inputs.brachial.filter(|p| *p > 0.0) else {
        return PressureIndexReport::default();
    };

    PressureIndexReport {
        right_abi: abi(brachial, inputs.right_ankle.filter(|p| *p > 0.0)),
        left_abi: abi(brachial, inputs.left_ankle.filter(|p| *p > 0.0)),
        right_tbi: tbi(brachial, inputs.right_toe.filter(|p| *p > 0.0)),
        left_tbi: tbi(brachial, inputs.left_toe.filter(|p| *p > 0.0)),
    }
}

fn write_if_changed(fields: &mut BTreeMap<String, FieldValue>, key: &str, value: &str) -> bool {
    let current = fields.get(key).and_then(FieldValue::as_text);
    if current == Some(value) {
        return false;
    }
    fields.insert(key.to_string(), FieldValue::Text(value.to_string()));
    true
}

/// Write the derived index and classification fields back into a form value
/// map, touching only entries whose value actually differs.
///
/// Returns whether anything changed; applying the same report twice always
/// returns `false` the second time.
pub fn apply_to_fields(
    report: &PressureIndexReport,
    fields: &mut BTreeMap<String, FieldValue>,
) -> bool {
    let mut changed = false;

    if let Some(abi) = &report.right_abi {
        changed |= write_if_changed(fields, FIELD_RIGHT_ABI, &abi.formatted);
        changed |= write_if_changed(fields, FIELD_RIGHT_ABI_CLASS, abi.band.label());
    }
    if let Some(abi) = &report.left_abi {
        changed |= write_if_changed(fields, FIELD_LEFT_ABI, &abi.formatted);
        changed |= write_if_changed(fields, FIELD_LEFT_ABI_CLASS, abi.band.label());
    }
    if let Some(tbi) = &report.right_tbi {
        changed |= write_if_changed(fields, FIELD_RIGHT_TBI, &tbi.formatted);
        changed |= write_if_changed(fields, FIELD_RIGHT_TBI_CLASS, tbi.band.label());
    }
    if let Some(tbi) = &report.left_tbi {
        changed |= write_if_changed(fields, FIELD_LEFT_TBI, &tbi.formatted);
        changed |= write_if_changed(fields, FIELD_LEFT_TBI_CLASS, tbi.band.label());
    }

    changed
}
