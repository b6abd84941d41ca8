use std::{fs, path::Path, path::PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::ValueEnum;
use dirs::home_dir;
use serde::{Deserialize, Serialize};

use crate::interpret::chart::{DEFAULT_PALETTE, MIN_CHART_POINTS};
use crate::interpret::label::DEFAULT_LABEL_MAX_CHARS;
use crate::interpret::InterpretOptions;

const APP_DIR_NAME: &str = ".pannypal";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// How an input file is read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    /// The raw text of one assistant reply
    #[default]
    Text,
    /// One chat message object as returned by the backend
    Message,
    /// A list of messages, or an object with a `messages` list
    Conversation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Longest label kept when a label is recovered from prose
    pub label_max_chars: usize,
    /// Points needed before a chart is drawn (never below 2)
    pub min_chart_points: usize,
    /// Colours handed out to pie slices
    pub palette: Vec<String>,
    /// Styled terminal output
    pub color: bool,
    /// Used when `--input-kind` is not given
    pub default_input_kind: InputKind,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            label_max_chars: DEFAULT_LABEL_MAX_CHARS,
            min_chart_points: MIN_CHART_POINTS,
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            color: true,
            default_input_kind: InputKind::Text,
        }
    }
}

impl Settings {
    pub fn load_with(project_root: Option<&Path>, explicit: Option<&Path>) -> Result<Self> {
        let path = resolve_config_path(project_root, explicit)?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let value: Self = toml::from_str(&content)
            .with_context(|| format!("Invalid config TOML at {}", path.display()))?;
        Ok(value)
    }

    pub fn save_with(&self, project_root: Option<&Path>, explicit: Option<&Path>) -> Result<()> {
        let (dir, path) = resolve_config_dir_and_file(project_root, explicit)?;
        if !dir.exists() {
            fs::create_dir_all(&dir).with_context(|| format!(
                "Failed to create config directory at {}",
                dir.display()
            ))?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write config at {}", path.display()))?;
        Ok(())
    }

    /// Write a default config at the user location, or under `project_root`.
    pub fn init_scoped(force: bool, project_root: Option<&Path>) -> Result<PathBuf> {
        let (dir, file) = if let Some(root) = project_root {
            (root.to_path_buf(), root.join(CONFIG_FILE_NAME))
        } else {
            (config_dir_path()?, config_file_path()?)
        };
        if file.exists() && !force {
            anyhow::bail!("Config already exists at {} (use --force to overwrite)", file.display());
        }
        if !dir.exists() { fs::create_dir_all(&dir)?; }
        let default = Self::default();
        let content = toml::to_string_pretty(&default)?;
        fs::write(&file, content)?;
        Ok(file)
    }

    /// Update one key from its command-line spelling.
    pub fn set_key(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "label-max-chars" | "label_max_chars" => {
                let parsed: usize = value
                    .parse()
                    .with_context(|| format!("label-max-chars expects a number, got `{}`", value))?;
                if parsed == 0 {
                    anyhow::bail!("label-max-chars must be positive");
                }
                self.label_max_chars = parsed;
            }
            "min-chart-points" | "min_chart_points" => {
                let parsed: usize = value
                    .parse()
                    .with_context(|| format!("min-chart-points expects a number, got `{}`", value))?;
                if parsed < MIN_CHART_POINTS {
                    anyhow::bail!("min-chart-points cannot be below {}", MIN_CHART_POINTS);
                }
                self.min_chart_points = parsed;
            }
            "palette" => {
                let colors: Vec<String> = value
                    .split(',')
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(str::to_string)
                    .collect();
                if colors.is_empty() {
                    anyhow::bail!("palette needs at least one colour");
                }
                self.palette = colors;
            }
            "color" => {
                self.color = value
                    .parse()
                    .with_context(|| format!("color expects true or false, got `{}`", value))?;
            }
            "input-kind" | "default_input_kind" => {
                self.default_input_kind = InputKind::from_str(value, true)
                    .map_err(|e| anyhow!("Invalid input kind `{}`: {}", value, e))?;
            }
            _ => anyhow::bail!("Unknown config key: {}", key),
        }
        Ok(())
    }

    pub fn interpret_options(&self) -> InterpretOptions {
        InterpretOptions {
            label_max_chars: self.label_max_chars,
            min_chart_points: self.min_chart_points.max(MIN_CHART_POINTS),
            palette: self.palette.clone(),
        }
    }
}

fn config_dir_path() -> Result<PathBuf> {
    let home = home_dir().context("Cannot resolve home directory")?;
    Ok(home.join(APP_DIR_NAME))
}

fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir_path()?.join(CONFIG_FILE_NAME))
}

fn resolve_config_path(project_root: Option<&Path>, explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(p) = explicit { return Ok(p.to_path_buf()); }
    if let Some(root) = project_root { return Ok(root.join(CONFIG_FILE_NAME)); }
    config_file_path()
}

fn resolve_config_dir_and_file(project_root: Option<&Path>, explicit: Option<&Path>) -> Result<(PathBuf, PathBuf)> {
    if let Some(p) = explicit {
        let dir = p.parent().unwrap_or_else(|| Path::new("."));
        return Ok((dir.to_path_buf(), p.to_path_buf()));
    }
    if let Some(root) = project_root {
        return Ok((root.to_path_buf(), root.join(CONFIG_FILE_NAME)));
    }
    let dir = config_dir_path()?;
    Ok((dir.clone(), dir.join(CONFIG_FILE_NAME)))
}
