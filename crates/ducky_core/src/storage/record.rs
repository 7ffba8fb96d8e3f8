use crate::error::AppError;
use crate::model::{Task, TaskKind, format_record_date, parse_date};

pub const FIELD_DELIMITER: &str = " | ";

/// Free-text fields carry `|` as `\|` so they can never form a delimiter.
fn escape_field(text: &str) -> String {
    text.replace('|', "\\|")
}

fn unescape_field(text: &str) -> String {
    text.replace("\\|", "|")
}

pub fn format_record(task: &Task) -> String {
    let done = if task.is_completed() { "1" } else { "0" };
    let mut fields = vec![
        task.type_tag().to_string(),
        done.to_string(),
        escape_field(task.description()),
    ];

    match task.kind() {
        TaskKind::Todo => {}
        TaskKind::Deadline { by } => fields.push(format_record_date(*by)),
        TaskKind::Event { from, to } => {
            fields.push(escape_field(from));
            fields.push(escape_field(to));
        }
    }

    fields.join(FIELD_DELIMITER)
}

/// Rebuilds a task from one saved line.
///
/// The completion field counts as done only when it is exactly `1`. Fields
/// past the ones a variant needs are ignored. `\|` in a free-text field reads
/// back as `|`.
pub fn parse_record(line: &str) -> Result<Task, AppError> {
    let fields: Vec<&str> = line.trim().split(FIELD_DELIMITER).collect();
    if fields.len() < 3 {
        return Err(AppError::corrupt_record(format!(
            "expected at least 3 fields, found {}",
            fields.len()
        )));
    }

    let description = unescape_field(fields[2]);
    if description.trim().is_empty() {
        return Err(AppError::corrupt_record("description is empty"));
    }

    let mut task = match fields[0] {
        "T" => Task::todo(&description)?,
        "D" => {
            let by = fields
                .get(3)
                .ok_or_else(|| AppError::corrupt_record("deadline record has no date"))?;
            Task::deadline(&description, parse_date(by)?)?
        }
        "E" => match (fields.get(3), fields.get(4)) {
            (Some(from), Some(to)) => {
                Task::event(&description, &unescape_field(from), &unescape_field(to))?
            }
            _ => {
                return Err(AppError::corrupt_record(
                    "event record needs start and end fields",
                ));
            }
        },
        other => {
            return Err(AppError::corrupt_record(format!(
                "unknown task type '{other}'"
            )));
        }
    };

    if fields[1] == "1" {
        task.set_completed(true);
    }

    Ok(task)
}
