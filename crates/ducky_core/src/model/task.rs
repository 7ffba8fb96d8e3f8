use crate::error::AppError;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

const RECORD_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");
const DISPLAY_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[month repr:short] [day padding:none] [year]");

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskKind {
    Todo,
    Deadline { by: Date },
    Event { from: String, to: String },
}

/// A tracked unit of work. The description is never blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    description: String,
    completed: bool,
    kind: TaskKind,
}

impl Task {
    pub fn new(description: &str, kind: TaskKind) -> Result<Self, AppError> {
        let trimmed = description.trim();
        if trimmed.is_empty() {
            return Err(AppError::invalid_format("A task description cannot be empty."));
        }

        Ok(Self {
            description: trimmed.to_string(),
            completed: false,
            kind,
        })
    }

    pub fn todo(description: &str) -> Result<Self, AppError> {
        Self::new(description, TaskKind::Todo)
    }

    pub fn deadline(description: &str, by: Date) -> Result<Self, AppError> {
        Self::new(description, TaskKind::Deadline { by })
    }

    pub fn event(description: &str, from: &str, to: &str) -> Result<Self, AppError> {
        Self::new(
            description,
            TaskKind::Event {
                from: from.to_string(),
                to: to.to_string(),
            },
        )
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> &TaskKind {
        &self.kind
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }

    pub fn type_tag(&self) -> char {
        match self.kind {
            TaskKind::Todo => 'T',
            TaskKind::Deadline { .. } => 'D',
            TaskKind::Event { .. } => 'E',
        }
    }

    pub fn status_icon(&self) -> char {
        if self.completed { 'X' } else { ' ' }
    }

    /// Variant-specific suffix shown after the description, if any.
    pub fn schedule_label(&self) -> Option<String> {
        match &self.kind {
            TaskKind::Todo => None,
            TaskKind::Deadline { by } => Some(format!("by: {}", format_display_date(*by))),
            TaskKind::Event { from, to } => Some(format!("from: {from} to: {to}")),
        }
    }

    pub fn render(&self) -> String {
        let head = format!(
            "[{}][{}] {}",
            self.type_tag(),
            self.status_icon(),
            self.description
        );
        match self.schedule_label() {
            Some(label) => format!("{head} ({label})"),
            None => head,
        }
    }
}

/// Parses a strict `yyyy-mm-dd` calendar date.
pub fn parse_date(value: &str) -> Result<Date, AppError> {
    let trimmed = value.trim();
    Date::parse(trimmed, RECORD_DATE_FORMAT).map_err(|err| {
        AppError::invalid_date(format!("'{trimmed}' is not a yyyy-mm-dd date: {err}"))
    })
}

pub fn format_record_date(date: Date) -> String {
    date.format(RECORD_DATE_FORMAT).unwrap_or_else(|_| date.to_string())
}

pub fn format_display_date(date: Date) -> String {
    date.format(DISPLAY_DATE_FORMAT).unwrap_or_else(|_| date.to_string())
}
