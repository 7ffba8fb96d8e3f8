pub mod command;
pub mod config;
pub mod error;
pub mod execute;
pub mod model;
pub mod parser;
pub mod storage;
pub mod task_list;

pub use command::{Command, NewTask};
pub use error::AppError;
pub use execute::{Console, execute};
pub use model::{Task, TaskKind};
pub use parser::parse_command;
pub use storage::TaskStore;
pub use task_list::TaskList;
