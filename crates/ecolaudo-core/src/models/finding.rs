use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::organ::Finding;

/// A single form field value: free text (numbers travel as strings, exactly
/// as the browser form produces them) or a multi-select list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s.as_str()),
            FieldValue::List(_) => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

/// One measured occurrence of a finding (the catalog [`Finding`] is the
/// definition; this is a concrete lesion the sonographer described).
///
/// Owned exclusively by its parent [`SelectedFinding`]. The measurement map
/// is ordered so downstream report text is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FindingInstance {
    pub id: String,
    pub measurements: BTreeMap<String, FieldValue>,
}

impl FindingInstance {
    /// Create an instance with a fresh uuid-v4 id.
    pub fn new(measurements: BTreeMap<String, FieldValue>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            measurements,
        }
    }

    pub fn with_id(id: &str, measurements: BTreeMap<String, FieldValue>) -> Self {
        Self {
            id: id.to_string(),
            measurements,
        }
    }

    /// Text value of a measurement field, if present and non-empty.
    pub fn text_field(&self, name: &str) -> Option<&str> {
        self.measurements
            .get(name)
            .and_then(FieldValue::as_text)
            .filter(|s| !s.is_empty())
    }
}

/// A finding the sonographer checked for an organ, with its measured
/// instances. Never coexists with "normal" status for the same organ; the
/// exam state enforces that exclusivity.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SelectedFinding {
    pub organ_id: String,
    pub category_id: String,
    pub finding_id: String,
    pub finding: Finding,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(default)]
    pub instances: Vec<FindingInstance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_normal: Option<bool>,
}

impl SelectedFinding {
    pub fn new(organ_id: &str, category_id: &str, finding: Finding) -> Self {
        Self {
            organ_id: organ_id.to_string(),
            category_id: category_id.to_string(),
            finding_id: finding.id.clone(),
            finding,
            severity: None,
            instances: Vec::new(),
            is_normal: None,
        }
    }

    pub fn first_instance(&self) -> Option<&FindingInstance> {
        self.instances.first()
    }

    /// Text value of a field on the first instance, the convention the
    /// phrase templates read (size, location, description).
    pub fn first_text_field(&self, name: &str) -> Option<&str> {
        self.first_instance().and_then(|i| i.text_field(name))
    }
}
