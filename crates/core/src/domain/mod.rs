pub mod forms;
pub mod submission;
