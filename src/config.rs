use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{QuizError, Result};
use crate::extract::{Extractor, MarkerTable};

/// Default directory name for quizx settings.
const QUIZX_DIR: &str = ".quizx";
/// Config filename.
const CONFIG_FILE: &str = "config.toml";

/// Project-level configuration resolved from the working directory.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the `.quizx/` directory.
    pub quizx_dir: PathBuf,
    /// Path to the config file.
    pub config_path: PathBuf,
    /// User settings loaded from config.toml.
    pub settings: UserSettings,
}

/// User-configurable settings from .quizx/config.toml.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    /// Marker phrases delimiting question fields.
    pub markers: MarkerTable,
    /// Transcript discovery.
    pub scan: ScanSettings,
    /// Output configuration.
    pub output: OutputSettings,
    /// Extraction policy.
    pub extraction: ExtractionSettings,
}

/// Which files count as transcripts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanSettings {
    /// File extensions treated as transcripts (without the dot).
    pub extensions: Vec<String>,
    /// Substring patterns excluded from directory scans.
    pub exclude_patterns: Vec<String>,
    /// Maximum transcript size in MB (0 = unlimited).
    pub max_file_size_mb: u32,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            extensions: vec!["txt".into(), "text".into()],
            exclude_patterns: Vec::new(),
            max_file_size_mb: 50,
        }
    }
}

impl ScanSettings {
    #[must_use]
    pub fn max_file_size_bytes(&self) -> u64 {
        u64::from(self.max_file_size_mb) * 1024 * 1024
    }
}

/// Output-related settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Output format: "minified" (default) or "pretty".
    pub format: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: "minified".into(),
        }
    }
}

impl OutputSettings {
    #[must_use]
    pub fn is_pretty(&self) -> bool {
        self.format.eq_ignore_ascii_case("pretty")
    }
}

/// Extraction policy settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionSettings {
    /// Fail a document on its first malformed segment instead of dropping it.
    pub strict: bool,
}

impl Config {
    /// Create config for a given project root.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        let quizx_dir = project_root.join(QUIZX_DIR);
        let config_path = quizx_dir.join(CONFIG_FILE);

        let settings = Self::load_settings(&config_path).unwrap_or_default();

        Self {
            quizx_dir,
            config_path,
            settings,
        }
    }

    /// Create config from the current working directory.
    pub fn from_cwd() -> Result<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| QuizError::Config(format!("cannot get cwd: {e}")))?;
        Ok(Self::new(cwd))
    }

    /// Load settings from config.toml if it exists and parses.
    fn load_settings(config_path: &Path) -> Option<UserSettings> {
        if !config_path.exists() {
            return None;
        }
        let content = std::fs::read_to_string(config_path).ok()?;
        match toml::from_str(&content) {
            Ok(settings) => Some(settings),
            Err(e) => {
                tracing::warn!(path = %config_path.display(), "ignoring invalid config: {e}");
                None
            }
        }
    }

    /// Save current settings to config.toml.
    pub fn save_settings(&self) -> Result<()> {
        self.ensure_quizx_dir()?;
        let content = toml::to_string_pretty(&self.settings)
            .map_err(|e| QuizError::Config(format!("failed to serialize settings: {e}")))?;
        std::fs::write(&self.config_path, content)?;
        Ok(())
    }

    /// Ensure the `.quizx/` directory exists.
    pub fn ensure_quizx_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.quizx_dir)?;
        Ok(())
    }

    #[must_use]
    pub fn config_exists(&self) -> bool {
        self.config_path.exists()
    }

    /// Build an extractor from the configured marker table.
    pub fn extractor(&self) -> Result<Extractor> {
        Extractor::with_markers(self.settings.markers.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn config_new_sets_paths() {
        let cfg = Config::new("/tmp/project");
        assert_eq!(cfg.quizx_dir, PathBuf::from("/tmp/project/.quizx"));
        assert_eq!(
            cfg.config_path,
            PathBuf::from("/tmp/project/.quizx/config.toml")
        );
    }

    #[test]
    fn default_settings() {
        let settings = UserSettings::default();
        assert_eq!(settings.markers, MarkerTable::default());
        assert_eq!(settings.scan.extensions, vec!["txt", "text"]);
        assert_eq!(settings.scan.max_file_size_mb, 50);
        assert_eq!(settings.output.format, "minified");
        assert!(!settings.output.is_pretty());
        assert!(!settings.extraction.strict);
    }

    #[test]
    fn save_and_load_settings() {
        let tmp = TempDir::new().unwrap();
        let mut cfg = Config::new(tmp.path());
        assert!(!cfg.config_exists());

        cfg.settings.output.format = "pretty".into();
        cfg.settings.extraction.strict = true;
        cfg.settings.markers.select_one = "Chọn một".into();
        cfg.save_settings().unwrap();
        assert!(cfg.config_exists());

        let cfg2 = Config::new(tmp.path());
        assert!(cfg2.settings.output.is_pretty());
        assert!(cfg2.settings.extraction.strict);
        assert_eq!(cfg2.settings.markers.select_one, "Chọn một");
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join(".quizx");
        std::fs::create_dir_all(&dir).unwrap();
        let toml = "[markers]\nboundary = \"Question\"\n";
        std::fs::write(dir.join("config.toml"), toml).unwrap();

        let cfg = Config::new(tmp.path());
        assert_eq!(cfg.settings.markers.boundary, "Question");
        assert_eq!(cfg.settings.markers.select_one, "Select one");
        assert_eq!(cfg.settings.scan.max_file_size_mb, 50);
    }

    #[test]
    fn load_invalid_config_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join(".quizx");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("config.toml"), "invalid toml {{{{").unwrap();

        let cfg = Config::new(tmp.path());
        assert_eq!(cfg.settings, UserSettings::default());
    }

    #[test]
    fn extractor_rejects_bad_markers() {
        let mut cfg = Config::new("/tmp/project");
        cfg.settings.markers.options.pop();
        assert!(cfg.extractor().is_err());
    }
}
