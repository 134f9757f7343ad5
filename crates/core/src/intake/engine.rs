use tracing::info;

use crate::audit::{AuditCategory, AuditContext, AuditEvent, AuditOutcome, AuditSink};
use crate::domain::forms::{ApplicationDetails, BasicInfo};
use crate::domain::submission::{
    Phase, ProcessingStep, StepKey, StepOutcome, Submission, SubmissionId,
};
use crate::errors::DomainError;
use crate::intake::collaborators::{
    DocumentGenerator, Notifier, PersistenceWriter, StorageUploader,
};
use crate::intake::progress::ProgressReport;
use crate::maintenance::MaintenanceGate;

/// Drives one submission through collection and processing. The engine is
/// re-entrant by design: the host may call `advance` on every refresh
/// cycle, and each side-effecting sub-operation still runs at most once
/// per submission.
pub struct IntakeEngine<G, U, P, N> {
    generator: G,
    uploader: U,
    store: P,
    notifier: N,
    maintenance: MaintenanceGate,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// The maintenance flag is set; nothing ran.
    Maintenance { notice: String },
    /// The submission is still collecting form input.
    NotProcessing { phase: Phase },
    /// One processing step was handled (executed or skipped as already
    /// attempted) and the phase moved forward.
    StepCompleted { step: ProcessingStep, next: Phase },
    AlreadyTerminal,
}

impl<G, U, P, N> IntakeEngine<G, U, P, N>
where
    G: DocumentGenerator,
    U: StorageUploader,
    P: PersistenceWriter,
    N: Notifier,
{
    pub fn new(generator: G, uploader: U, store: P, notifier: N) -> Self {
        Self { generator, uploader, store, notifier, maintenance: MaintenanceGate::from_env() }
    }

    pub fn with_maintenance(mut self, gate: MaintenanceGate) -> Self {
        self.maintenance = gate;
        self
    }

    /// Accepts the first screen and moves to detail collection.
    pub fn submit_basic_info(
        &self,
        submission: &mut Submission,
        info: BasicInfo,
    ) -> Result<(), DomainError> {
        self.check_maintenance()?;
        if submission.phase != Phase::CollectingBasicInfo {
            return Err(DomainError::InvalidPhaseTransition {
                from: submission.phase.clone(),
                to: Phase::CollectingDetails,
            });
        }
        info.validate()?;
        submission.basic_info = Some(info);
        submission.phase = Phase::CollectingDetails;
        Ok(())
    }

    /// Accepts the application form, assigns the submission id, and enters
    /// the first processing step.
    pub fn submit_details(
        &self,
        submission: &mut Submission,
        details: ApplicationDetails,
    ) -> Result<SubmissionId, DomainError> {
        self.check_maintenance()?;
        if submission.phase != Phase::CollectingDetails {
            return Err(DomainError::InvalidPhaseTransition {
                from: submission.phase.clone(),
                to: Phase::Processing(ProcessingStep::GenerateDocument),
            });
        }
        let details = details.sanitized();
        details.validate()?;
        submission.details = Some(details);
        let id = submission.begin_processing()?;
        info!(submission_id = %id, "application accepted, processing started");
        Ok(id)
    }

    /// The one permitted backward transition: detail collection back to
    /// basic info. Never available once processing has started.
    pub fn go_back(&self, submission: &mut Submission) -> Result<(), DomainError> {
        if submission.phase != Phase::CollectingDetails {
            return Err(DomainError::InvalidPhaseTransition {
                from: submission.phase.clone(),
                to: Phase::CollectingBasicInfo,
            });
        }
        submission.phase = Phase::CollectingBasicInfo;
        Ok(())
    }

    /// Executes the current processing step and moves the phase forward.
    /// Safe to call any number of times: attempted sub-operations are
    /// skipped and existing artifacts reused.
    pub fn advance(&self, submission: &mut Submission) -> AdvanceOutcome {
        if let Some(notice) = self.maintenance.notice() {
            return AdvanceOutcome::Maintenance { notice: notice.to_owned() };
        }

        let step = match submission.phase {
            Phase::Terminal => return AdvanceOutcome::AlreadyTerminal,
            Phase::Processing(step) => step,
            ref collecting => {
                return AdvanceOutcome::NotProcessing { phase: collecting.clone() }
            }
        };

        match step {
            ProcessingStep::GenerateDocument => self.run_generate(submission),
            ProcessingStep::UploadAndPersist => self.run_upload_and_persist(submission),
            ProcessingStep::Notify => self.run_notify(submission),
        }

        let next = step.next().map(Phase::Processing).unwrap_or(Phase::Terminal);
        submission.phase = next.clone();
        AdvanceOutcome::StepCompleted { step, next }
    }

    /// `advance` plus an audit record of what the cycle did.
    pub fn advance_with_audit<S>(
        &self,
        submission: &mut Submission,
        sink: &S,
        audit: &AuditContext,
    ) -> AdvanceOutcome
    where
        S: AuditSink,
    {
        let outcome = self.advance(submission);
        let event = match &outcome {
            AdvanceOutcome::StepCompleted { step, next } => AuditEvent::new(
                submission.id.clone(),
                audit.correlation_id.clone(),
                "intake.step_completed",
                step_category(*step),
                audit.actor.clone(),
                AuditOutcome::Success,
            )
            .with_metadata("step", format!("{step:?}"))
            .with_metadata("next_phase", format!("{next:?}")),
            AdvanceOutcome::Maintenance { notice } => AuditEvent::new(
                submission.id.clone(),
                audit.correlation_id.clone(),
                "intake.maintenance_shortcircuit",
                AuditCategory::System,
                audit.actor.clone(),
                AuditOutcome::Rejected,
            )
            .with_metadata("notice", notice.clone()),
            AdvanceOutcome::NotProcessing { phase } => AuditEvent::new(
                submission.id.clone(),
                audit.correlation_id.clone(),
                "intake.advance_ignored",
                AuditCategory::Intake,
                audit.actor.clone(),
                AuditOutcome::Skipped,
            )
            .with_metadata("phase", format!("{phase:?}")),
            AdvanceOutcome::AlreadyTerminal => AuditEvent::new(
                submission.id.clone(),
                audit.correlation_id.clone(),
                "intake.advance_ignored",
                AuditCategory::Intake,
                audit.actor.clone(),
                AuditOutcome::Skipped,
            )
            .with_metadata("phase", "Terminal".to_owned()),
        };
        sink.emit(event);
        outcome
    }

    /// Pure read of where the submission stands; never executes anything.
    pub fn progress(&self, submission: &Submission) -> ProgressReport {
        ProgressReport::for_submission(submission)
    }

    /// Clears the submission for an unrelated follow-up; the next run gets
    /// a fresh id.
    pub fn reset(&self, submission: &mut Submission) {
        submission.reset();
    }

    fn check_maintenance(&self) -> Result<(), DomainError> {
        match self.maintenance.notice() {
            Some(notice) => Err(DomainError::MaintenanceActive { notice: notice.to_owned() }),
            None => Ok(()),
        }
    }

    fn run_generate(&self, submission: &mut Submission) {
        if submission.step_status.attempted(StepKey::Document) {
            info!(step = "generate_document", "step already attempted, reusing recorded outcome");
            return;
        }
        let outcome = match self.generator.generate(submission) {
            Some(bytes) => {
                submission.artifacts.set_document(bytes);
                StepOutcome::Succeeded
            }
            None => StepOutcome::Failed,
        };
        submission.step_status.record(StepKey::Document, outcome);
        info!(step = "generate_document", success = outcome.succeeded(), "document step finished");
    }

    fn run_upload_and_persist(&self, submission: &mut Submission) {
        if !submission.step_status.attempted(StepKey::Upload) {
            let filename = submission.document_filename();
            let link = submission
                .artifacts
                .document()
                .map(|bytes| self.uploader.upload(bytes, &filename));
            let outcome = match link {
                Some(link) if !link.is_empty() => {
                    submission.artifacts.set_document_link(link);
                    StepOutcome::Succeeded
                }
                // Upload failed, or there was no document to upload.
                Some(_) | None => StepOutcome::Failed,
            };
            submission.step_status.record(StepKey::Upload, outcome);
            info!(step = "upload", success = outcome.succeeded(), "upload step finished");
        }

        if !submission.step_status.attempted(StepKey::Persist) {
            let link = submission.artifacts.document_link().unwrap_or_default().to_owned();
            let outcome = StepOutcome::from_success(self.store.persist(submission, &link));
            submission.step_status.record(StepKey::Persist, outcome);
            info!(step = "persist", success = outcome.succeeded(), "persistence step finished");
        }
    }

    fn run_notify(&self, submission: &mut Submission) {
        if !submission.step_status.attempted(StepKey::NotifyInternal) {
            // Internal notification is gated on a persisted record; the
            // confirmation to the submitter below is not.
            let outcome = if submission.step_status.succeeded(StepKey::Persist) {
                StepOutcome::from_success(
                    self.notifier.notify_internal(submission, submission.artifacts.document()),
                )
            } else {
                StepOutcome::Failed
            };
            submission.step_status.record(StepKey::NotifyInternal, outcome);
            info!(
                step = "notify_internal",
                success = outcome.succeeded(),
                "internal notification step finished"
            );
        }

        if !submission.step_status.attempted(StepKey::NotifySubmitter) {
            let outcome = StepOutcome::from_success(self.notifier.notify_submitter(submission));
            submission.step_status.record(StepKey::NotifySubmitter, outcome);
            info!(
                step = "notify_submitter",
                success = outcome.succeeded(),
                "confirmation step finished"
            );
        }
    }
}

fn step_category(step: ProcessingStep) -> AuditCategory {
    match step {
        ProcessingStep::GenerateDocument => AuditCategory::Document,
        ProcessingStep::UploadAndPersist => AuditCategory::Persistence,
        ProcessingStep::Notify => AuditCategory::Notification,
    }
}
