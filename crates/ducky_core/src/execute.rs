use crate::command::Command;
use crate::error::AppError;
use crate::model::Task;
use crate::storage::TaskStore;
use crate::task_list::TaskList;

pub const EMPTY_LISTING_MSG: &str = "No tasks to show.";

/// Display sink for command results.
pub trait Console {
    fn show(&mut self, lines: &[String]);

    /// Shows tasks next to the 1-based number used to address them.
    fn show_tasks(&mut self, tasks: &[(usize, &Task)]) {
        if tasks.is_empty() {
            self.show(&[EMPTY_LISTING_MSG.to_string()]);
            return;
        }

        let lines: Vec<String> = tasks
            .iter()
            .map(|(number, task)| format!("{number}. {}", task.render()))
            .collect();
        self.show(&lines);
    }
}

impl Console for Vec<String> {
    fn show(&mut self, lines: &[String]) {
        self.extend_from_slice(lines);
    }
}

/// Runs one command against the list.
///
/// Mutations are applied before saving. A failed save returns the error but
/// leaves the in-memory change in place; the next successful save catches
/// the file up.
pub fn execute(
    command: &Command,
    tasks: &mut TaskList,
    console: &mut dyn Console,
    store: &dyn TaskStore,
) -> Result<(), AppError> {
    match command {
        Command::List => {
            let numbered: Vec<(usize, &Task)> = tasks
                .all()
                .iter()
                .enumerate()
                .map(|(index, task)| (index + 1, task))
                .collect();
            console.show_tasks(&numbered);
        }
        Command::Find { query } => {
            let numbered: Vec<(usize, &Task)> = tasks
                .find(query)
                .into_iter()
                .map(|(index, task)| (index + 1, task))
                .collect();
            console.show_tasks(&numbered);
        }
        Command::SetCompletion { index, completed } => {
            let position = to_position(*index, tasks.len())?;
            let task = tasks.get_mut(position)?;
            task.set_completed(*completed);
            let rendered = task.render();
            store.save(tasks.all())?;

            let heading = if *completed {
                "Okay! I've marked this task as complete:"
            } else {
                "Okay! I've marked this task as incomplete:"
            };
            console.show(&[heading.to_string(), format!("  {rendered}")]);
        }
        Command::Delete { index } => {
            let position = to_position(*index, tasks.len())?;
            let removed = tasks.remove_at(position)?;
            store.save(tasks.all())?;

            console.show(&[
                "Noted. I've removed this task:".to_string(),
                format!("  {}", removed.render()),
                list_size_line(tasks.len()),
            ]);
        }
        Command::AddTask(pending) => {
            let task = pending.build()?;
            let rendered = task.render();
            tasks.append(task);
            store.save(tasks.all())?;

            console.show(&[
                "Got it. I've added this task:".to_string(),
                format!("  {rendered}"),
                list_size_line(tasks.len()),
            ]);
        }
    }

    Ok(())
}

fn to_position(index: usize, len: usize) -> Result<usize, AppError> {
    match index.checked_sub(1) {
        Some(position) if position < len => Ok(position),
        _ => Err(AppError::IndexOutOfRange { index, len }),
    }
}

fn list_size_line(len: usize) -> String {
    let noun = if len == 1 { "task" } else { "tasks" };
    format!("Now you have {len} {noun} in the list.")
}
