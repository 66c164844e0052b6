pub mod model;
pub mod recorder;

pub use model::{Job, JobStatus, SourceType};
pub use recorder::{JobRecorder, PersistOutcome};
