use crate::error::AppError;
use crate::model::{Task, parse_date};

pub const INVALID_DEADLINE_DATE_MSG: &str =
    "Deadlines must be dated as yyyy-mm-dd, e.g. 2024-03-05.";

/// One parsed input line. Indices are 1-based, exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Find { query: String },
    SetCompletion { index: usize, completed: bool },
    Delete { index: usize },
    AddTask(NewTask),
}

/// Fields of a task still to be created. The deadline date is kept as typed
/// and only parsed when the task is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewTask {
    Todo {
        description: String,
    },
    Deadline {
        description: String,
        by: String,
    },
    Event {
        description: String,
        from: String,
        to: String,
    },
}

impl NewTask {
    pub fn build(&self) -> Result<Task, AppError> {
        match self {
            Self::Todo { description } => Task::todo(description),
            Self::Deadline { description, by } => {
                let date = parse_date(by)
                    .map_err(|_| AppError::invalid_format(INVALID_DEADLINE_DATE_MSG))?;
                Task::deadline(description, date)
            }
            Self::Event {
                description,
                from,
                to,
            } => Task::event(description, from, to),
        }
    }
}
