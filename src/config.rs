use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// What the command prints for a document.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Plain text with field values substituted
    Plain,
    /// Terminal form preview
    Form,
    /// The validated document literal as JSON
    Content,
    /// The field value snapshot as JSON
    Values,
}

impl OutputMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Form => "form",
            Self::Content => "content",
            Self::Values => "values",
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub watch: bool,
    pub hide_text: bool,
    pub edit: bool,
    pub comments: bool,
    pub output: Option<OutputMode>,
    pub values: Option<PathBuf>,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            watch: self.watch || other.watch,
            hide_text: self.hide_text || other.hide_text,
            edit: self.edit || other.edit,
            comments: self.comments || other.comments,
            output: other.output.or(self.output),
            values: other.values.clone().or_else(|| self.values.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("formtext").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("formtext")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("formtext").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("formtext")
                .join("config");
        }
    }

    PathBuf::from(".formtextrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".formtextrc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# formtext defaults (saved with --save)".to_string()];
    if flags.watch {
        lines.push("--watch".to_string());
    }
    if flags.hide_text {
        lines.push("--hide-text".to_string());
    }
    if flags.edit {
        lines.push("--edit".to_string());
    }
    if flags.comments {
        lines.push("--comments".to_string());
    }
    if let Some(output) = flags.output {
        lines.push(format!("--output {}", output.as_str()));
    }
    if let Some(values) = &flags.values {
        lines.push(format!("--values {}", values.display()));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        match token {
            "--watch" | "-w" => flags.watch = true,
            "--hide-text" => flags.hide_text = true,
            "--edit" => flags.edit = true,
            "--comments" => flags.comments = true,
            "--output" | "-o" => {
                if let Some(next) = tokens.get(i + 1) {
                    flags.output = parse_output(next);
                    i += 1;
                }
            }
            "--values" => {
                if let Some(next) = tokens.get(i + 1) {
                    flags.values = Some(PathBuf::from(next));
                    i += 1;
                }
            }
            _ => {
                if let Some(value) = token.strip_prefix("--output=") {
                    flags.output = parse_output(value);
                } else if let Some(value) = token.strip_prefix("--values=") {
                    flags.values = Some(PathBuf::from(value));
                }
            }
        }
        i += 1;
    }
    flags
}

fn parse_output(s: &str) -> Option<OutputMode> {
    match s {
        "plain" => Some(OutputMode::Plain),
        "form" => Some(OutputMode::Form),
        "content" => Some(OutputMode::Content),
        "values" => Some(OutputMode::Values),
        _ => None,
    }
}
