mod task;

pub use task::{Task, TaskKind, format_display_date, format_record_date, parse_date};
