use crate::error::AppError;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.json";
pub const CONFIG_ENV_VAR: &str = "DUCKY_CONFIG_PATH";

#[derive(Debug, Clone)]
pub struct Palette {
    pub accent: &'static str,
    pub muted: &'static str,
    pub reset: &'static str,
}

impl Palette {
    pub fn accentize(&self, text: &str) -> String {
        paint(self.accent, self.reset, text)
    }

    pub fn mutedize(&self, text: &str) -> String {
        paint(self.muted, self.reset, text)
    }
}

fn paint(color: &str, reset: &str, text: &str) -> String {
    if color.is_empty() {
        text.to_string()
    } else {
        format!("{color}{text}{reset}")
    }
}

pub fn palette_for_theme(theme: Option<&str>) -> Palette {
    match theme.and_then(canonical_theme_name).as_deref() {
        Some("noir") => Palette {
            accent: "\x1b[38;5;208m",
            muted: "\x1b[38;5;250m",
            reset: "\x1b[0m",
        },
        Some("solarized") => Palette {
            accent: "\x1b[38;5;108m",
            muted: "\x1b[38;5;250m",
            reset: "\x1b[0m",
        },
        _ => Palette {
            accent: "",
            muted: "",
            reset: "",
        },
    }
}

pub fn canonical_theme_name(raw: &str) -> Option<String> {
    let name = canonical_key(raw).unwrap_or_else(|| "default".to_string());

    match name.as_str() {
        "vanilla" | "light" => Some("default".to_string()),
        "dark" | "dark_mode" | "darkmode" => Some("noir".to_string()),
        _ => Some(name),
    }
}

/// Lower-cases `raw` and folds runs of punctuation or spaces into `_`.
pub fn canonical_key(raw: &str) -> Option<String> {
    let mut cleaned = String::new();
    let mut previous_underscore = false;

    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            cleaned.push(ch.to_ascii_lowercase());
            previous_underscore = false;
        } else if !previous_underscore && !cleaned.is_empty() {
            cleaned.push('_');
            previous_underscore = true;
        }
    }

    let trimmed = cleaned.trim_matches('_');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub theme: Option<String>,
    /// Verb shortcuts, e.g. `"ls": "list"`. Names are stored lower-cased.
    #[serde(default)]
    pub aliases: HashMap<String, String>,
    #[serde(default)]
    pub store_path: Option<PathBuf>,
}

impl Config {
    /// Replaces the first word of `line` when it names an alias.
    pub fn expand_alias(&self, line: &str) -> String {
        let (verb, rest) = match line.split_once(' ') {
            Some((verb, rest)) => (verb, Some(rest)),
            None => (line, None),
        };

        let expansion = self
            .aliases
            .get(&verb.to_lowercase())
            .map(|target| target.trim());

        match (expansion, rest) {
            (Some(target), Some(rest)) => format!("{target} {rest}"),
            (Some(target), None) => target.to_string(),
            (None, _) => line.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub error: Option<AppError>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub theme: Option<String>,
    pub store_path: Option<PathBuf>,
    pub aliases: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverrideTarget {
    Theme,
    StorePath,
    Alias(String),
}

impl ConfigOverrides {
    /// Applies one `KEY=VALUE` pair. Keys: `theme`, `store_path`,
    /// `aliases.<name>`.
    pub fn apply(&mut self, raw: &str) -> Result<OverrideTarget, AppError> {
        let (key_raw, value_raw) = raw
            .trim()
            .split_once('=')
            .ok_or_else(|| AppError::invalid_config("override must be in KEY=VALUE format"))?;
        let value = value_raw.trim().to_string();
        let (field, subfield) = match key_raw.split_once('.') {
            Some((field, rest)) => (field, Some(rest.trim())),
            None => (key_raw, None),
        };

        let field = canonical_key(field)
            .ok_or_else(|| AppError::invalid_config("override key cannot be empty"))?;

        match (field.as_str(), subfield) {
            ("theme", None) => {
                self.theme = Some(value);
                Ok(OverrideTarget::Theme)
            }
            ("store_path" | "store", None) => {
                self.store_path = Some(PathBuf::from(value));
                Ok(OverrideTarget::StorePath)
            }
            ("aliases" | "alias", Some(name)) if !name.is_empty() => {
                let name = name.to_lowercase();
                self.aliases.insert(name.clone(), value);
                Ok(OverrideTarget::Alias(name))
            }
            ("aliases" | "alias", _) => Err(AppError::invalid_config(
                "aliases override requires an alias name",
            )),
            ("theme" | "store_path" | "store", Some(_)) => Err(AppError::invalid_config(format!(
                "{field} override cannot have subfields"
            ))),
            (other, _) => Err(AppError::invalid_config(format!(
                "unknown config field '{other}'"
            ))),
        }
    }
}

pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf, AppError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::invalid_config("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata).join("ducky").join(CONFIG_FILE_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::invalid_config("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("ducky")
            .join(CONFIG_FILE_NAME))
    }
}

/// Never fails: problems come back in `error` next to default settings.
pub fn load_config_with_fallback(explicit: Option<&Path>) -> ConfigLoad {
    match config_path(explicit) {
        Ok(path) => load_config_with_fallback_from_path(&path),
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

fn load_config_with_fallback_from_path(path: &Path) -> ConfigLoad {
    if !path.exists() {
        return ConfigLoad {
            config: Config::default(),
            error: None,
        };
    }

    match load_config_from_path(path) {
        Ok(config) => ConfigLoad {
            config,
            error: None,
        },
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "falling back to default config");
            ConfigLoad {
                config: Config::default(),
                error: Some(err),
            }
        }
    }
}

fn load_config_from_path(path: &Path) -> Result<Config, AppError> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| AppError::io(format!("{}: {}", path.display(), err)))?;
    let mut config: Config = serde_json::from_str(&content).map_err(|err| {
        AppError::invalid_config(format!("invalid JSON in {}: {}", path.display(), err))
    })?;
    config.theme = config.theme.and_then(|name| canonical_theme_name(&name));
    config.aliases = fold_alias_names(config.aliases);
    tracing::debug!(path = %path.display(), aliases = config.aliases.len(), "loaded config");
    Ok(config)
}

pub fn merge_overrides(base: &Config, overrides: &ConfigOverrides) -> Config {
    let mut merged = base.clone();
    if let Some(theme) = overrides.theme.as_deref() {
        merged.theme = canonical_theme_name(theme);
    }
    if let Some(store_path) = overrides.store_path.as_ref() {
        merged.store_path = Some(store_path.clone());
    }
    for (alias, value) in &overrides.aliases {
        merged.aliases.insert(alias.to_lowercase(), value.clone());
    }
    merged
}

/// Lower-cases alias names. When two names differ only in case, the one
/// sorting last wins, which is the all-lower-case spelling if present.
fn fold_alias_names(aliases: HashMap<String, String>) -> HashMap<String, String> {
    let mut entries: Vec<(String, String)> = aliases.into_iter().collect();
    entries.sort();
    entries
        .into_iter()
        .map(|(alias, target)| (alias.to_lowercase(), target))
        .collect()
}
