use std::collections::BTreeSet;

use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::finding::{FindingInstance, SelectedFinding};
use super::organ::Finding;
use crate::error::CoreError;

/// How long an autosaved in-progress exam stays restorable.
pub const AUTOSAVE_TTL: SignedDuration = SignedDuration::from_hours(1);

/// How long the "resume last exam" entry stays offered.
pub const LAST_EXAM_TTL: SignedDuration = SignedDuration::from_hours(24);

/// Session state of one exam: the findings checked so far and the organs
/// marked normal.
///
/// Invariant: an organ never appears both in `normal_organs` and as the
/// owner of a selected finding. Both mutations below re-establish it, and
/// both are idempotent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ExamState {
    pub selected_findings: Vec<SelectedFinding>,
    pub normal_organs: BTreeSet<String>,
}

impl ExamState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check (or update) a finding for an organ. The organ leaves the
    /// normal set; an already-selected finding is updated in place.
    pub fn set_finding(
        &mut self,
        organ_id: &str,
        category_id: &str,
        finding: Finding,
        severity: Option<String>,
        instances: Vec<FindingInstance>,
    ) {
        let finding_id = finding.id.clone();
        match self
            .selected_findings
            .iter_mut()
            .find(|f| f.organ_id == organ_id && f.finding_id == finding_id)
        {
            Some(existing) => {
                existing.severity = severity;
                existing.instances = instances;
            }
            None => {
                let mut selected = SelectedFinding::new(organ_id, category_id, finding);
                selected.severity = severity;
                selected.instances = instances;
                self.selected_findings.push(selected);
            }
        }
        self.normal_organs.remove(organ_id);
    }

    /// Uncheck a finding, dropping its instances with it.
    pub fn remove_finding(&mut self, organ_id: &str, finding_id: &str) {
        self.selected_findings
            .retain(|f| !(f.organ_id == organ_id && f.finding_id == finding_id));
    }

    /// Mark or unmark an organ as normal. Marking clears every finding of
    /// that organ.
    pub fn set_organ_normal(&mut self, organ_id: &str, is_normal: bool) {
        if is_normal {
            self.normal_organs.insert(organ_id.to_string());
            self.selected_findings.retain(|f| f.organ_id != organ_id);
        } else {
            self.normal_organs.remove(organ_id);
        }
    }

    pub fn is_organ_normal(&self, organ_id: &str) -> bool {
        self.normal_organs.contains(organ_id)
    }

    pub fn findings_for_organ(&self, organ_id: &str) -> impl Iterator<Item = &SelectedFinding> {
        self.selected_findings
            .iter()
            .filter(move |f| f.organ_id == organ_id)
    }

    pub fn is_empty(&self) -> bool {
        self.selected_findings.is_empty() && self.normal_organs.is_empty()
    }

    pub fn reset(&mut self) {
        self.selected_findings.clear();
        self.normal_organs.clear();
    }
}

/// Persistence envelope for an autosaved exam. The host owns the actual
/// storage (browser local storage); the core only decides freshness.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SavedExam {
    pub state: ExamState,
    pub saved_at: Timestamp,
}

impl SavedExam {
    pub fn new(state: ExamState, saved_at: Timestamp) -> Self {
        Self { state, saved_at }
    }

    /// Whether this save is past the given TTL at `now`.
    pub fn is_expired(&self, now: Timestamp, ttl: SignedDuration) -> bool {
        now.duration_since(self.saved_at) > ttl
    }

    /// Serialized form the host hands to its storage (browser local
    /// storage, in the reference UI).
    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(raw: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(raw)?)
    }
}
