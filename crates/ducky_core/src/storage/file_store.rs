use crate::error::AppError;
use crate::model::Task;
use crate::storage::TaskStore;
use crate::storage::record::{format_record, parse_record};
use crate::task_list::TaskList;
use std::path::{Path, PathBuf};

pub const STORE_ENV_VAR: &str = "DUCKY_STORE_PATH";
const STORE_FILE_NAME: &str = "tasks.txt";

/// A saved line that could not be turned back into a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub line_number: usize,
    pub line: String,
    pub error: AppError,
}

#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub tasks: TaskList,
    pub skipped: Vec<SkippedRecord>,
}

/// Flat task file, one record per line, rewritten whole on every save.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

/// Picks the task file: an explicit path wins, then `DUCKY_STORE_PATH`, then
/// the configured path, then the per-user default.
pub fn resolve_store_path(
    explicit: Option<&Path>,
    configured: Option<&Path>,
) -> Result<PathBuf, AppError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(STORE_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if let Some(path) = configured {
        return Ok(path.to_path_buf());
    }

    default_store_path()
}

pub fn default_store_path() -> Result<PathBuf, AppError> {
    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::invalid_config("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata).join("ducky").join(STORE_FILE_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::invalid_config("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("ducky")
            .join(STORE_FILE_NAME))
    }
}

impl FileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw lines of the file without their line endings; a missing file
    /// reads as empty. Lines are not decoded so one bad byte only costs its
    /// own line.
    pub fn read_lines(&self) -> Result<Vec<Vec<u8>>, AppError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read(&self.path)
            .map_err(|err| AppError::io(format!("{}: {}", self.path.display(), err)))?;
        let mut lines: Vec<Vec<u8>> = content
            .split(|byte| *byte == b'\n')
            .map(|line| line.strip_suffix(b"\r").unwrap_or(line).to_vec())
            .collect();
        if lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }
        Ok(lines)
    }

    pub fn write_lines(&self, lines: &[String]) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .map_err(|err| AppError::io(format!("{}: {}", parent.display(), err)))?;
        }

        let mut content = lines.join("\n");
        if !content.is_empty() {
            content.push('\n');
        }
        std::fs::write(&self.path, content)
            .map_err(|err| AppError::io(format!("{}: {}", self.path.display(), err)))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&self.path, permissions)
                .map_err(|err| AppError::io(err.to_string()))?;
        }

        Ok(())
    }

    /// Loads every readable record. Corrupt lines and bad dates are skipped
    /// and reported; blank lines are ignored.
    pub fn load(&self) -> Result<LoadReport, AppError> {
        let mut report = LoadReport::default();

        for (offset, bytes) in self.read_lines()?.into_iter().enumerate() {
            let line = match String::from_utf8(bytes) {
                Ok(line) => line,
                Err(err) => {
                    let line = String::from_utf8_lossy(err.as_bytes()).into_owned();
                    let error = AppError::corrupt_record("line is not valid UTF-8");
                    self.skip(&mut report, offset + 1, line, error);
                    continue;
                }
            };
            if line.trim().is_empty() {
                continue;
            }

            match parse_record(&line) {
                Ok(task) => report.tasks.append(task),
                Err(err) if err.is_record_error() => self.skip(&mut report, offset + 1, line, err),
                Err(err) => return Err(err),
            }
        }

        tracing::debug!(
            path = %self.path.display(),
            loaded = report.tasks.len(),
            skipped = report.skipped.len(),
            "loaded task file"
        );
        Ok(report)
    }

    fn skip(&self, report: &mut LoadReport, line_number: usize, line: String, error: AppError) {
        tracing::warn!(
            path = %self.path.display(),
            line_number,
            error = %error,
            "skipping unreadable task record"
        );
        report.skipped.push(SkippedRecord {
            line_number,
            line,
            error,
        });
    }
}

impl TaskStore for FileStore {
    fn save(&self, tasks: &[Task]) -> Result<(), AppError> {
        let lines: Vec<String> = tasks.iter().map(format_record).collect();
        self.write_lines(&lines)?;
        tracing::info!(path = %self.path.display(), count = tasks.len(), "saved tasks");
        Ok(())
    }
}
