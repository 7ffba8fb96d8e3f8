pub mod cli;
pub mod console;
pub mod session;
