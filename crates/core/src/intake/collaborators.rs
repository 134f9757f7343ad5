use crate::domain::submission::Submission;

/// Renders the accumulated submission into a filled document. `None`
/// signals the generator is unavailable; implementations must not panic
/// across this boundary.
pub trait DocumentGenerator: Send + Sync {
    fn generate(&self, submission: &Submission) -> Option<Vec<u8>>;
}

/// Uploads document bytes to external storage and returns a reference
/// link. An empty string signals failure.
pub trait StorageUploader: Send + Sync {
    fn upload(&self, document: &[u8], filename: &str) -> String;
}

/// Appends the submission to the durable store. The link may be empty
/// when no document was produced or uploaded; the writer must tolerate it.
pub trait PersistenceWriter: Send + Sync {
    fn persist(&self, submission: &Submission, document_link: &str) -> bool;
}

/// Sends the two transactional messages: the internal heads-up (with the
/// document attached when available) and the submitter confirmation.
pub trait Notifier: Send + Sync {
    fn notify_internal(&self, submission: &Submission, document: Option<&[u8]>) -> bool;
    fn notify_submitter(&self, submission: &Submission) -> bool;
}
