pub mod audit;
pub mod config;
pub mod domain;
pub mod errors;
pub mod intake;
pub mod maintenance;
pub mod pricing;

pub use audit::{AuditCategory, AuditContext, AuditEvent, AuditOutcome, AuditSink, InMemoryAuditSink};
pub use domain::forms::{ApplicationDetails, BasicInfo, InterviewSlot, SlotCatalog};
pub use domain::submission::{
    Phase, ProcessingStep, StepKey, StepOutcome, StepStatus, Submission, SubmissionId,
};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use intake::collaborators::{DocumentGenerator, Notifier, PersistenceWriter, StorageUploader};
pub use intake::engine::{AdvanceOutcome, IntakeEngine};
pub use intake::progress::{ProgressReport, TerminalSummary};
pub use maintenance::MaintenanceGate;
pub use pricing::{
    compute_quote, DistanceMeasurer, FixedDistance, InstallationParams, LineItem, OriginSite, Quote,
};
