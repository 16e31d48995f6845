//! Configuration management for inputbar.
//!
//! Loads configuration from ${INPUTBAR_HOME}/config.toml with sensible defaults.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Returns the default config template with comments.
///
/// This is embedded from `default_config.toml` at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for inputbar configuration and data directories.
    //!
    //! INPUTBAR_HOME resolution order:
    //! 1. INPUTBAR_HOME environment variable (if set)
    //! 2. ~/.config/inputbar (default)
    //! 3. ./.inputbar when no home directory can be determined

    use std::path::PathBuf;

    /// Returns the inputbar home directory.
    pub fn inputbar_home() -> PathBuf {
        if let Ok(home) = std::env::var("INPUTBAR_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".inputbar"),
            |h| h.join(".config").join("inputbar"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        inputbar_home().join("config.toml")
    }

    /// Returns the directory that receives uploads when no endpoint is set.
    pub fn outbox_dir() -> PathBuf {
        inputbar_home().join("outbox")
    }

    /// Returns the directory for log files.
    pub fn logs_dir() -> PathBuf {
        inputbar_home().join("logs")
    }
}

/// Limits and thresholds for the input widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Longest question (trimmed, in characters) that may be submitted.
    pub max_text_length: usize,
    /// Line count at which typed text flips the widget into data mode.
    pub data_mode_line_threshold: usize,
    /// Largest accepted file, inclusive.
    pub max_file_size_bytes: u64,
    /// Accepted file extensions, compared case-insensitively without the dot.
    pub allowed_file_extensions: BTreeSet<String>,
    /// Expected MIME types. Advisory only.
    pub allowed_mime_types: BTreeSet<String>,
    pub min_textarea_rows: u16,
    pub max_textarea_rows: u16,
}

impl InputConfig {
    pub const DEFAULT_MAX_TEXT_LENGTH: usize = 4000;
    pub const DEFAULT_DATA_MODE_LINE_THRESHOLD: usize = 100;
    pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
    const DEFAULT_EXTENSIONS: &[&str] = &["csv", "html", "json", "md", "pdf", "tsv", "txt", "xml"];
    const DEFAULT_MIME_TYPES: &[&str] = &[
        "application/json",
        "application/pdf",
        "application/xml",
        "text/csv",
        "text/html",
        "text/markdown",
        "text/plain",
        "text/tab-separated-values",
        "text/xml",
    ];

    /// Returns true if `extension` (with or without a leading dot) is allowed.
    pub fn allows_extension(&self, extension: &str) -> bool {
        let wanted = normalize_extension(extension);
        !wanted.is_empty()
            && self
                .allowed_file_extensions
                .iter()
                .any(|allowed| normalize_extension(allowed) == wanted)
    }

    /// Returns true if `mime` is in the advisory allow-list.
    ///
    /// Parameters such as `; charset=utf-8` are ignored.
    pub fn allows_mime_type(&self, mime: &str) -> bool {
        let essence = mime.split(';').next().unwrap_or("").trim();
        self.allowed_mime_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(essence))
    }

    /// Character count at which the near-limit warning starts (90% of the cap).
    pub fn text_warning_threshold(&self) -> usize {
        self.max_text_length.saturating_mul(9) / 10
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            max_text_length: Self::DEFAULT_MAX_TEXT_LENGTH,
            data_mode_line_threshold: Self::DEFAULT_DATA_MODE_LINE_THRESHOLD,
            max_file_size_bytes: Self::DEFAULT_MAX_FILE_SIZE_BYTES,
            allowed_file_extensions: Self::DEFAULT_EXTENSIONS
                .iter()
                .map(ToString::to_string)
                .collect(),
            allowed_mime_types: Self::DEFAULT_MIME_TYPES
                .iter()
                .map(ToString::to_string)
                .collect(),
            min_textarea_rows: 1,
            max_textarea_rows: 8,
        }
    }
}

fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_ascii_lowercase()
}

/// Where data uploads are delivered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// HTTP endpoint receiving uploads. `None` writes to the outbox directory.
    pub endpoint: Option<String>,
    /// Override for the outbox directory.
    pub outbox_dir: Option<String>,
}

/// Page capture settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// HTTP timeout for capture requests in seconds (0 disables).
    pub timeout_secs: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self { timeout_secs: 20 }
    }
}

impl CaptureConfig {
    pub fn timeout(&self) -> Option<Duration> {
        if self.timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(u64::from(self.timeout_secs)))
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub upload: UploadConfig,
    pub capture: CaptureConfig,
}

/// Non-fatal problem found in a loaded config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// The offending key.
    pub field: &'static str,
    pub message: String,
}

impl Config {
    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
        }
        fs::write(path, default_config_template())
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    /// Checks for values that load fine but make the widget behave oddly.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        let input = &self.input;

        if input.data_mode_line_threshold < 2 {
            warnings.push(ConfigWarning {
                field: "input.data_mode_line_threshold",
                message: format!(
                    "Threshold {} puts every input in data mode. Use 2 or more.",
                    input.data_mode_line_threshold
                ),
            });
        }
        if input.max_text_length == 0 {
            warnings.push(ConfigWarning {
                field: "input.max_text_length",
                message: "A zero length cap rejects every question.".to_string(),
            });
        }
        if input.allowed_file_extensions.is_empty() {
            warnings.push(ConfigWarning {
                field: "input.allowed_file_extensions",
                message: "No extensions are allowed; every file will be rejected.".to_string(),
            });
        }
        if input.min_textarea_rows > input.max_textarea_rows {
            warnings.push(ConfigWarning {
                field: "input.min_textarea_rows",
                message: format!(
                    "min_textarea_rows ({}) exceeds max_textarea_rows ({}).",
                    input.min_textarea_rows, input.max_textarea_rows
                ),
            });
        }
        if let Some(endpoint) = &self.upload.endpoint
            && !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            warnings.push(ConfigWarning {
                field: "upload.endpoint",
                message: format!("Endpoint '{endpoint}' is not an http(s) URL."),
            });
        }

        warnings
    }
}
