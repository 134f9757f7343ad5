use serde::{Deserialize, Serialize};

use crate::domain::submission::{Phase, ProcessingStep, StepKey, StepOutcome, Submission};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    pub key: StepKey,
    pub outcome: StepOutcome,
}

/// The per-capability checklist shown once a submission is terminal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalSummary {
    pub saved: bool,
    pub document_produced: bool,
    pub document_uploaded: bool,
    pub internal_notified: bool,
    pub submitter_notified: bool,
}

/// Snapshot of where a submission stands. Building one reads state only;
/// it never executes a step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressReport {
    pub phase: Phase,
    pub current_step: Option<ProcessingStep>,
    pub completed: Vec<StepReport>,
    pub summary: Option<TerminalSummary>,
}

impl ProgressReport {
    pub fn for_submission(submission: &Submission) -> Self {
        let completed = submission
            .step_status
            .iter()
            .map(|(key, outcome)| StepReport { key, outcome })
            .collect();

        let summary = submission.is_terminal().then(|| TerminalSummary {
            saved: submission.step_status.succeeded(StepKey::Persist),
            document_produced: submission.step_status.succeeded(StepKey::Document),
            document_uploaded: submission.step_status.succeeded(StepKey::Upload),
            internal_notified: submission.step_status.succeeded(StepKey::NotifyInternal),
            submitter_notified: submission.step_status.succeeded(StepKey::NotifySubmitter),
        });

        Self {
            phase: submission.phase.clone(),
            current_step: submission.current_step(),
            completed,
            summary,
        }
    }

    /// Index of the step currently in flight, for a progress bar.
    pub fn current_step_index(&self) -> Option<usize> {
        self.current_step.map(ProcessingStep::index)
    }
}
