use crate::command::{Command, NewTask};
use crate::error::AppError;
use regex::Regex;
use std::sync::LazyLock;

pub const INVALID_NUMBER_MSG: &str = "Did you enter a valid number?";
pub const INVALID_TODO_MSG: &str = "A description is required for creating a to-do.";
pub const INVALID_DEADLINE_MSG: &str =
    "A description and deadline (in yyyy-mm-dd format) is required for creating a deadline.";
pub const INVALID_EVENT_MSG: &str =
    "A description, start time and end time is required for creating an event.";

static EVENT_MARKERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("/from|/to").expect("event marker pattern is valid"));

/// Turns one input line into a [`Command`].
///
/// Only the verb is case-folded. The `/by`, `/from` and `/to` markers are
/// matched literally, so a description containing one of them is split there.
pub fn parse_command(line: &str) -> Result<Command, AppError> {
    let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));
    let verb = verb.to_lowercase();
    let argument = rest.trim();

    let command = match verb.as_str() {
        "list" => Command::List,
        "find" => Command::Find {
            query: argument.to_string(),
        },
        "mark" => Command::SetCompletion {
            index: parse_index(argument)?,
            completed: true,
        },
        "unmark" => Command::SetCompletion {
            index: parse_index(argument)?,
            completed: false,
        },
        "delete" => Command::Delete {
            index: parse_index(argument)?,
        },
        "todo" => parse_todo(argument)?,
        "deadline" => parse_deadline(argument)?,
        "event" => parse_event(argument)?,
        _ => return Err(AppError::UnknownCommand),
    };

    tracing::debug!(?command, "parsed command");
    Ok(command)
}

fn parse_index(argument: &str) -> Result<usize, AppError> {
    argument
        .parse::<usize>()
        .map_err(|_| AppError::invalid_format(INVALID_NUMBER_MSG))
}

fn parse_todo(argument: &str) -> Result<Command, AppError> {
    if argument.is_empty() {
        return Err(AppError::invalid_format(INVALID_TODO_MSG));
    }

    Ok(Command::AddTask(NewTask::Todo {
        description: argument.to_string(),
    }))
}

fn parse_deadline(argument: &str) -> Result<Command, AppError> {
    let parts = required_parts(argument.splitn(2, "/by"), 2, INVALID_DEADLINE_MSG)?;
    let [description, by] = parts.as_slice() else {
        return Err(AppError::invalid_format(INVALID_DEADLINE_MSG));
    };

    Ok(Command::AddTask(NewTask::Deadline {
        description: description.clone(),
        by: by.clone(),
    }))
}

fn parse_event(argument: &str) -> Result<Command, AppError> {
    let parts = required_parts(EVENT_MARKERS.splitn(argument, 3), 3, INVALID_EVENT_MSG)?;
    let [description, from, to] = parts.as_slice() else {
        return Err(AppError::invalid_format(INVALID_EVENT_MSG));
    };

    Ok(Command::AddTask(NewTask::Event {
        description: description.clone(),
        from: from.clone(),
        to: to.clone(),
    }))
}

/// Collects exactly `expected` trimmed, non-empty parts or fails with `message`.
fn required_parts<'a>(
    parts: impl Iterator<Item = &'a str>,
    expected: usize,
    message: &str,
) -> Result<Vec<String>, AppError> {
    let parts: Vec<String> = parts.map(|part| part.trim().to_string()).collect();
    if parts.len() < expected || parts.iter().any(|part| part.is_empty()) {
        return Err(AppError::invalid_format(message));
    }
    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::{
        INVALID_DEADLINE_MSG, INVALID_EVENT_MSG, INVALID_NUMBER_MSG, INVALID_TODO_MSG,
        parse_command,
    };
    use crate::command::{Command, NewTask};
    use crate::error::AppError;

    fn todo(description: &str) -> Command {
        Command::AddTask(NewTask::Todo {
            description: description.to_string(),
        })
    }

    #[test]
    fn list_ignores_arguments_and_case() {
        assert_eq!(parse_command("list").unwrap(), Command::List);
        assert_eq!(parse_command("LIST everything").unwrap(), Command::List);
    }

    #[test]
    fn find_keeps_query_and_allows_empty() {
        assert_eq!(
            parse_command("find  book ").unwrap(),
            Command::Find {
                query: "book".to_string()
            }
        );
        assert_eq!(
            parse_command("find").unwrap(),
            Command::Find {
                query: String::new()
            }
        );
    }

    #[test]
    fn todo_with_description() {
        assert_eq!(parse_command("todo buy milk").unwrap(), todo("buy milk"));
        assert_eq!(parse_command("ToDo   read  ").unwrap(), todo("read"));
    }

    #[test]
    fn todo_without_description_is_invalid() {
        for line in ["todo", "todo ", "todo    "] {
            let err = parse_command(line).unwrap_err();
            assert_eq!(err, AppError::invalid_format(INVALID_TODO_MSG));
        }
    }

    #[test]
    fn deadline_splits_on_by() {
        assert_eq!(
            parse_command("deadline return book /by 2024-03-05").unwrap(),
            Command::AddTask(NewTask::Deadline {
                description: "return book".to_string(),
                by: "2024-03-05".to_string(),
            })
        );
    }

    #[test]
    fn deadline_keeps_free_text_date_for_later() {
        let command = parse_command("deadline essay /by next friday").unwrap();
        assert_eq!(
            command,
            Command::AddTask(NewTask::Deadline {
                description: "essay".to_string(),
                by: "next friday".to_string(),
            })
        );
    }

    #[test]
    fn deadline_missing_parts_is_invalid() {
        for line in [
            "deadline return book",
            "deadline /by 2024-03-05",
            "deadline return book /by",
            "deadline return book /by   ",
            "deadline",
            "deadline return book /BY 2024-03-05",
        ] {
            let err = parse_command(line).unwrap_err();
            assert_eq!(err, AppError::invalid_format(INVALID_DEADLINE_MSG), "{line}");
        }
    }

    #[test]
    fn event_splits_on_from_and_to() {
        assert_eq!(
            parse_command("event project meeting /from Mon 2pm /to 4pm").unwrap(),
            Command::AddTask(NewTask::Event {
                description: "project meeting".to_string(),
                from: "Mon 2pm".to_string(),
                to: "4pm".to_string(),
            })
        );
    }

    #[test]
    fn event_markers_are_positional_not_named() {
        assert_eq!(
            parse_command("event talk /to 5pm /from 3pm").unwrap(),
            Command::AddTask(NewTask::Event {
                description: "talk".to_string(),
                from: "5pm".to_string(),
                to: "3pm".to_string(),
            })
        );
    }

    #[test]
    fn deadline_description_containing_by_is_split_there() {
        assert_eq!(
            parse_command("deadline read /by-laws /by 2024-03-05").unwrap(),
            Command::AddTask(NewTask::Deadline {
                description: "read".to_string(),
                by: "-laws /by 2024-03-05".to_string(),
            })
        );
    }

    #[test]
    fn event_description_containing_a_marker_is_split_there() {
        assert_eq!(
            parse_command("event talk on /topics /from 2pm /to 4pm").unwrap(),
            Command::AddTask(NewTask::Event {
                description: "talk on".to_string(),
                from: "pics".to_string(),
                to: "2pm /to 4pm".to_string(),
            })
        );
    }

    #[test]
    fn event_missing_parts_is_invalid() {
        for line in [
            "event meeting",
            "event meeting /from Mon",
            "event meeting /to 4pm",
            "event /from Mon /to 4pm",
            "event meeting /from /to 4pm",
            "event meeting /from Mon /to ",
        ] {
            let err = parse_command(line).unwrap_err();
            assert_eq!(err, AppError::invalid_format(INVALID_EVENT_MSG), "{line}");
        }
    }

    #[test]
    fn mark_and_unmark_take_a_number() {
        assert_eq!(
            parse_command("mark 3").unwrap(),
            Command::SetCompletion {
                index: 3,
                completed: true
            }
        );
        assert_eq!(
            parse_command("unmark  2 ").unwrap(),
            Command::SetCompletion {
                index: 2,
                completed: false
            }
        );
    }

    #[test]
    fn non_numeric_index_is_invalid_for_every_indexed_verb() {
        for line in ["mark abc", "unmark abc", "delete abc", "mark", "delete -1", "mark 1 2"] {
            let err = parse_command(line).unwrap_err();
            assert_eq!(err, AppError::invalid_format(INVALID_NUMBER_MSG), "{line}");
        }
    }

    #[test]
    fn delete_takes_a_number() {
        assert_eq!(
            parse_command("delete 1").unwrap(),
            Command::Delete { index: 1 }
        );
    }

    #[test]
    fn unknown_verb_is_rejected() {
        assert_eq!(parse_command("foobar").unwrap_err(), AppError::UnknownCommand);
        assert_eq!(parse_command("").unwrap_err(), AppError::UnknownCommand);
        assert_eq!(
            parse_command("todo\tbuy milk").unwrap_err(),
            AppError::UnknownCommand
        );
    }
}
