use ducky_core::config::Config;
use ducky_core::execute::{Console, execute};
use ducky_core::parser::parse_command;
use ducky_core::storage::TaskStore;
use ducky_core::{AppError, TaskList};
use std::io::{BufRead, Write};

pub const GREETING: [&str; 2] = ["Hello! I'm Ducky.", "What can I do for you?"];
pub const FAREWELL: &str = "Bye. Hope to see you again soon!";

const USAGE: [&str; 10] = [
    "Commands:",
    "  list",
    "  find <query>",
    "  mark <number>",
    "  unmark <number>",
    "  delete <number>",
    "  todo <description>",
    "  deadline <description> /by <yyyy-mm-dd>",
    "  event <description> /from <start> /to <end>",
    "  help | bye",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub fn format_error(err: &AppError) -> String {
    format!("ERROR: {} - {}", err.code(), err)
}

/// Owns the task list and the store for the lifetime of one run.
pub struct Session {
    tasks: TaskList,
    store: Box<dyn TaskStore>,
    config: Config,
}

impl Session {
    pub fn new(tasks: TaskList, store: Box<dyn TaskStore>, config: Config) -> Self {
        Self {
            tasks,
            store,
            config,
        }
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn handle_line(&mut self, line: &str, console: &mut dyn Console) -> Result<Flow, AppError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Flow::Continue);
        }

        if ["bye", "exit", "quit"]
            .iter()
            .any(|word| line.eq_ignore_ascii_case(word))
        {
            console.show(&[FAREWELL.to_string()]);
            return Ok(Flow::Exit);
        }

        if line.eq_ignore_ascii_case("help") || line == "?" {
            let usage: Vec<String> = USAGE.iter().map(|line| line.to_string()).collect();
            console.show(&usage);
            return Ok(Flow::Continue);
        }

        let expanded = self.config.expand_alias(line);
        let command = parse_command(&expanded)?;
        execute(&command, &mut self.tasks, console, self.store.as_ref())?;
        Ok(Flow::Continue)
    }

    /// Reads commands until `bye` or end of input. Command errors are written
    /// to `errors` and the loop carries on.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        console: &mut dyn Console,
        errors: &mut W,
    ) -> Result<(), AppError> {
        let greeting: Vec<String> = GREETING.iter().map(|line| line.to_string()).collect();
        console.show(&greeting);

        for line in input.lines() {
            let line = line.map_err(|err| AppError::io(err.to_string()))?;
            match self.handle_line(&line, console) {
                Ok(Flow::Exit) => break,
                Ok(Flow::Continue) => {}
                Err(err) => {
                    tracing::debug!(code = err.code(), line = %line, "command rejected");
                    writeln!(errors, "{}", format_error(&err))
                        .map_err(|err| AppError::io(err.to_string()))?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{FAREWELL, Flow, GREETING, Session, format_error};
    use ducky_core::config::Config;
    use ducky_core::storage::NoopStore;
    use ducky_core::storage::file_store::FileStore;
    use ducky_core::{AppError, TaskList};
    use std::io::Cursor;

    fn session() -> Session {
        Session::new(TaskList::new(), Box::new(NoopStore), Config::default())
    }

    #[test]
    fn run_greets_executes_and_stops_at_bye() {
        let mut session = session();
        let mut console: Vec<String> = Vec::new();
        let mut errors: Vec<u8> = Vec::new();
        let input = Cursor::new("todo buy milk\n\nfoobar\nbye\ntodo never\n");

        session.run(input, &mut console, &mut errors).unwrap();

        assert_eq!(console[0], GREETING[0]);
        assert_eq!(console.last().map(String::as_str), Some(FAREWELL));
        assert_eq!(session.tasks().len(), 1);
        let errors = String::from_utf8(errors).unwrap();
        assert_eq!(
            errors.trim(),
            "ERROR: unknown_command - Sorry, I don't know what that means."
        );
    }

    #[test]
    fn run_ends_quietly_at_end_of_input() {
        let mut session = session();
        let mut console: Vec<String> = Vec::new();
        let mut errors: Vec<u8> = Vec::new();

        session
            .run(Cursor::new("todo a\ntodo b"), &mut console, &mut errors)
            .unwrap();

        assert_eq!(session.tasks().len(), 2);
        assert!(errors.is_empty());
    }

    #[test]
    fn help_lists_commands() {
        let mut session = session();
        let mut console: Vec<String> = Vec::new();

        assert_eq!(session.handle_line("?", &mut console).unwrap(), Flow::Continue);
        assert!(console.iter().any(|line| line.contains("deadline")));
    }

    #[test]
    fn aliases_expand_before_parsing() {
        let config = Config {
            aliases: [("t".to_string(), "todo".to_string())].into_iter().collect(),
            ..Config::default()
        };
        let mut session = Session::new(TaskList::new(), Box::new(NoopStore), config);
        let mut console: Vec<String> = Vec::new();

        session.handle_line("t stretch", &mut console).unwrap();

        assert_eq!(session.tasks().all()[0].description(), "stretch");
    }

    #[test]
    fn invalid_format_message_reaches_the_user_verbatim() {
        let mut session = session();
        let mut console: Vec<String> = Vec::new();

        let err = session.handle_line("mark abc", &mut console).unwrap_err();
        assert_eq!(
            format_error(&err),
            "ERROR: invalid_format - Did you enter a valid number?"
        );
    }

    #[test]
    fn mutations_are_written_to_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.txt");
        let mut session = Session::new(
            TaskList::new(),
            Box::new(FileStore::new(&path)),
            Config::default(),
        );
        let mut console: Vec<String> = Vec::new();

        session
            .handle_line("deadline return book /by 2024-03-05", &mut console)
            .unwrap();
        session.handle_line("mark 1", &mut console).unwrap();

        let saved = std::fs::read_to_string(&path).unwrap();
        assert_eq!(saved, "D | 1 | return book | 2024-03-05\n");
    }

    #[test]
    fn index_errors_keep_the_list() {
        let mut session = session();
        let mut console: Vec<String> = Vec::new();
        session.handle_line("todo one", &mut console).unwrap();

        let err = session.handle_line("delete 4", &mut console).unwrap_err();

        assert_eq!(err, AppError::IndexOutOfRange { index: 4, len: 1 });
        assert_eq!(session.tasks().len(), 1);
    }
}
