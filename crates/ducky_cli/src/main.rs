use clap::Parser;
use ducky_cli::cli::Cli;
use ducky_cli::console::TerminalConsole;
use ducky_cli::session::{Session, format_error};
use ducky_core::AppError;
use ducky_core::config::{self, Config, ConfigOverrides};
use ducky_core::storage::file_store::{FileStore, LoadReport, resolve_store_path};
use ducky_core::storage::{NoopStore, TaskStore};
use std::io;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let default_level = "warn";
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .try_init();
}

fn load_config(cli: &Cli) -> Result<Config, AppError> {
    let loaded = config::load_config_with_fallback(cli.config.as_deref());
    if let Some(err) = loaded.error {
        eprintln!("WARNING: using default settings ({})", err);
    }

    let mut overrides = ConfigOverrides::default();
    for raw in &cli.config_override {
        overrides.apply(raw)?;
    }
    Ok(config::merge_overrides(&loaded.config, &overrides))
}

fn report_skipped(store: &FileStore, report: &LoadReport) {
    if report.skipped.is_empty() {
        return;
    }

    eprintln!(
        "WARNING: skipped {} unreadable record(s) in {}",
        report.skipped.len(),
        store.path().display()
    );
    for skipped in &report.skipped {
        eprintln!("  line {}: {}", skipped.line_number, skipped.error);
    }
}

fn build_session(cli: &Cli) -> Result<(Session, Config), AppError> {
    let config = load_config(cli)?;
    let path = resolve_store_path(cli.store.as_deref(), config.store_path.as_deref())?;
    let file_store = FileStore::new(path);
    let report = file_store.load()?;
    report_skipped(&file_store, &report);

    let store: Box<dyn TaskStore> = if cli.dry_run {
        Box::new(NoopStore)
    } else {
        Box::new(file_store)
    };
    let session = Session::new(report.tasks, store, config.clone());
    Ok((session, config))
}

fn run(cli: Cli) -> Result<(), AppError> {
    let (mut session, config) = build_session(&cli)?;
    let palette = config::palette_for_theme(config.theme.as_deref());
    let mut console = TerminalConsole::new(cli.output, palette);

    match cli.command_line() {
        Some(line) => {
            session.handle_line(&line, &mut console)?;
        }
        None => {
            let stdin = io::stdin();
            session.run(stdin.lock(), &mut console, &mut io::stderr())?;
        }
    }

    Ok(())
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("{}", format_error(&err));
        std::process::exit(1);
    }
}
