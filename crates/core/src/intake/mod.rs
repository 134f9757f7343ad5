pub mod collaborators;
pub mod engine;
pub mod progress;

pub use collaborators::{DocumentGenerator, Notifier, PersistenceWriter, StorageUploader};
pub use engine::{AdvanceOutcome, IntakeEngine};
pub use progress::{ProgressReport, StepReport, TerminalSummary};
