pub mod file_store;
pub mod record;

use crate::error::AppError;
use crate::model::Task;

/// Persistence sink: receives the whole list after every mutation.
pub trait TaskStore {
    fn save(&self, tasks: &[Task]) -> Result<(), AppError>;
}

/// Keeps nothing. Used when a session runs without a backing file.
pub struct NoopStore;

impl TaskStore for NoopStore {
    fn save(&self, _tasks: &[Task]) -> Result<(), AppError> {
        Ok(())
    }
}
