use crate::error::AppError;
use crate::model::Task;

/// Ordered, in-memory list of tasks. Positions are 0-based here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub fn get(&self, index: usize) -> Result<&Task, AppError> {
        let len = self.tasks.len();
        self.tasks.get(index).ok_or_else(|| out_of_range(index, len))
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut Task, AppError> {
        let len = self.tasks.len();
        self.tasks.get_mut(index).ok_or_else(|| out_of_range(index, len))
    }

    pub fn remove_at(&mut self, index: usize) -> Result<Task, AppError> {
        if index >= self.tasks.len() {
            return Err(out_of_range(index, self.tasks.len()));
        }
        Ok(self.tasks.remove(index))
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    /// Tasks whose description contains `query` (case-sensitive), paired with
    /// their 0-based position in the list.
    pub fn find(&self, query: &str) -> Vec<(usize, &Task)> {
        self.tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.description().contains(query))
            .collect()
    }
}

impl From<Vec<Task>> for TaskList {
    fn from(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }
}

// Errors report the 1-based number the user typed.
fn out_of_range(index: usize, len: usize) -> AppError {
    AppError::IndexOutOfRange {
        index: index.saturating_add(1),
        len,
    }
}
