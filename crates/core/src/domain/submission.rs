use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::forms::{ApplicationDetails, BasicInfo};
use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubmissionId(pub Uuid);

impl SubmissionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Side-effecting steps of the processing stage, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProcessingStep {
    GenerateDocument,
    UploadAndPersist,
    Notify,
}

impl ProcessingStep {
    pub const ALL: [ProcessingStep; 3] =
        [Self::GenerateDocument, Self::UploadAndPersist, Self::Notify];

    pub fn index(self) -> usize {
        match self {
            Self::GenerateDocument => 0,
            Self::UploadAndPersist => 1,
            Self::Notify => 2,
        }
    }

    pub fn next(self) -> Option<ProcessingStep> {
        match self {
            Self::GenerateDocument => Some(Self::UploadAndPersist),
            Self::UploadAndPersist => Some(Self::Notify),
            Self::Notify => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    CollectingBasicInfo,
    CollectingDetails,
    Processing(ProcessingStep),
    Terminal,
}

/// One fallible sub-operation within the processing stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StepKey {
    Document,
    Upload,
    Persist,
    NotifyInternal,
    NotifySubmitter,
}

impl StepKey {
    pub const ALL: [StepKey; 5] = [
        Self::Document,
        Self::Upload,
        Self::Persist,
        Self::NotifyInternal,
        Self::NotifySubmitter,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepOutcome {
    Succeeded,
    Failed,
}

impl StepOutcome {
    pub fn from_success(success: bool) -> Self {
        if success {
            Self::Succeeded
        } else {
            Self::Failed
        }
    }

    pub fn succeeded(self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

/// Write-once record of attempted sub-operations. Once a key carries an
/// outcome it is never rewritten; re-entrant processing consults this map
/// to decide what may still run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepStatus {
    entries: BTreeMap<StepKey, StepOutcome>,
}

impl StepStatus {
    /// Records an outcome unless one is already present. Returns whether
    /// the write happened.
    pub fn record(&mut self, key: StepKey, outcome: StepOutcome) -> bool {
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, outcome);
        true
    }

    pub fn attempted(&self, key: StepKey) -> bool {
        self.entries.contains_key(&key)
    }

    pub fn get(&self, key: StepKey) -> Option<StepOutcome> {
        self.entries.get(&key).copied()
    }

    pub fn succeeded(&self, key: StepKey) -> bool {
        self.get(key).is_some_and(StepOutcome::succeeded)
    }

    pub fn iter(&self) -> impl Iterator<Item = (StepKey, StepOutcome)> + '_ {
        self.entries.iter().map(|(key, outcome)| (*key, *outcome))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Generated document bytes and the storage reference obtained for them.
/// Each slot is set at most once so re-entrant steps reuse what exists.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifacts {
    document: Option<Vec<u8>>,
    document_link: Option<String>,
}

impl Artifacts {
    pub fn set_document(&mut self, bytes: Vec<u8>) -> bool {
        if self.document.is_some() {
            return false;
        }
        self.document = Some(bytes);
        true
    }

    pub fn document(&self) -> Option<&[u8]> {
        self.document.as_deref()
    }

    pub fn set_document_link(&mut self, link: String) -> bool {
        if self.document_link.is_some() {
            return false;
        }
        self.document_link = Some(link);
        true
    }

    pub fn document_link(&self) -> Option<&str> {
        self.document_link.as_deref()
    }
}

/// One applicant's complete in-flight record as it moves through intake
/// and processing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: Option<SubmissionId>,
    pub phase: Phase,
    pub basic_info: Option<BasicInfo>,
    pub details: Option<ApplicationDetails>,
    pub artifacts: Artifacts,
    pub step_status: StepStatus,
}

impl Submission {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns the submission id and enters the first processing step.
    /// The id is generated exactly once; a submission that is already
    /// processing keeps the id it has.
    pub fn begin_processing(&mut self) -> Result<SubmissionId, DomainError> {
        if self.phase != Phase::CollectingDetails {
            return Err(DomainError::InvalidPhaseTransition {
                from: self.phase.clone(),
                to: Phase::Processing(ProcessingStep::GenerateDocument),
            });
        }
        let id = self.id.get_or_insert_with(SubmissionId::generate).clone();
        self.phase = Phase::Processing(ProcessingStep::GenerateDocument);
        Ok(id)
    }

    pub fn is_terminal(&self) -> bool {
        self.phase == Phase::Terminal
    }

    pub fn current_step(&self) -> Option<ProcessingStep> {
        match self.phase {
            Phase::Processing(step) => Some(step),
            _ => None,
        }
    }

    /// Filename used for the generated application document.
    pub fn document_filename(&self) -> String {
        match &self.basic_info {
            Some(info) => format!(
                "Application_{}_{}.pdf",
                info.last_name.replace(' ', "_"),
                info.first_name.replace(' ', "_")
            ),
            None => "Application.pdf".to_owned(),
        }
    }

    pub fn contact_email(&self) -> Option<&str> {
        self.basic_info.as_ref().map(|info| info.email.as_str())
    }

    /// Clears everything back to the start of collection. The next
    /// submission gets a fresh id.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
