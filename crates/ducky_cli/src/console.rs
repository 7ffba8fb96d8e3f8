use crate::cli::OutputMode;
use ducky_core::config::Palette;
use ducky_core::execute::{Console, EMPTY_LISTING_MSG};
use ducky_core::model::{Task, TaskKind, format_record_date};
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "#")]
    number: usize,
    #[tabled(rename = "type")]
    kind: char,
    done: &'static str,
    description: String,
    when: String,
}

impl TaskRow {
    fn new(number: usize, task: &Task) -> Self {
        Self {
            number,
            kind: task.type_tag(),
            done: if task.is_completed() { "yes" } else { "no" },
            description: task.description().to_string(),
            when: task.schedule_label().unwrap_or_else(|| "-".to_string()),
        }
    }
}

pub fn task_json(number: usize, task: &Task) -> serde_json::Value {
    let mut value = serde_json::json!({
        "number": number,
        "type": task.type_tag().to_string(),
        "description": task.description(),
        "completed": task.is_completed(),
    });
    match task.kind() {
        TaskKind::Todo => {}
        TaskKind::Deadline { by } => {
            value["by"] = serde_json::Value::String(format_record_date(*by));
        }
        TaskKind::Event { from, to } => {
            value["from"] = serde_json::Value::String(from.clone());
            value["to"] = serde_json::Value::String(to.clone());
        }
    }
    value
}

/// Writes command results to stdout in the selected output mode.
pub struct TerminalConsole {
    mode: OutputMode,
    palette: Palette,
}

impl TerminalConsole {
    pub fn new(mode: OutputMode, palette: Palette) -> Self {
        Self { mode, palette }
    }

    pub fn render_tasks(&self, tasks: &[(usize, &Task)]) -> Vec<String> {
        match self.mode {
            OutputMode::Plain => {
                if tasks.is_empty() {
                    return vec![self.palette.mutedize(EMPTY_LISTING_MSG)];
                }
                tasks
                    .iter()
                    .map(|(number, task)| {
                        let label = self.palette.mutedize(&format!("{number}."));
                        format!("{label} {}", task.render())
                    })
                    .collect()
            }
            OutputMode::Table => {
                if tasks.is_empty() {
                    return vec![self.palette.mutedize(EMPTY_LISTING_MSG)];
                }
                let rows: Vec<TaskRow> = tasks
                    .iter()
                    .map(|(number, task)| TaskRow::new(*number, task))
                    .collect();
                vec![Table::new(rows).to_string()]
            }
            OutputMode::Json => {
                let payload: Vec<serde_json::Value> = tasks
                    .iter()
                    .map(|(number, task)| task_json(*number, task))
                    .collect();
                vec![serde_json::Value::Array(payload).to_string()]
            }
        }
    }
}

impl Console for TerminalConsole {
    fn show(&mut self, lines: &[String]) {
        for (position, line) in lines.iter().enumerate() {
            if position == 0 {
                println!("{}", self.palette.accentize(line));
            } else {
                println!("{line}");
            }
        }
    }

    fn show_tasks(&mut self, tasks: &[(usize, &Task)]) {
        for line in self.render_tasks(tasks) {
            println!("{line}");
        }
    }
}
