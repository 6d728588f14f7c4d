use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default configuration file, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "seagrid.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ToolConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_format")]
    pub log_format: String,
    #[serde(default = "default_export_directory")]
    pub export_directory: String,
    #[serde(default)]
    pub default_author: Option<String>,
    #[serde(default = "default_pretty_json")]
    pub pretty_json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "text".to_string()
}
fn default_export_directory() -> String {
    "./maps".to_string()
}
fn default_pretty_json() -> bool {
    true
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
            export_directory: default_export_directory(),
            default_author: None,
            pretty_json: default_pretty_json(),
        }
    }
}

impl ToolConfig {
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
        Self::from_toml_str(&content, path)
    }

    pub fn from_toml_str(content: &str, source_path: &Path) -> Result<Self, String> {
        let config: ToolConfig =
            toml::from_str(content).map_err(|e| format!("{}: {}", source_path.display(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults. A file
    /// that exists but fails to parse or validate is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, String> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn export_dir(&self) -> PathBuf {
        PathBuf::from(&self.export_directory)
    }

    pub fn json_logs(&self) -> bool {
        self.log_format == "json"
    }

    pub fn validate(&self) -> Result<(), String> {
        let mut errors = Vec::new();

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            errors.push(format!(
                "log_level must be one of {:?}, got '{}'. Example: log_level = \"info\"",
                valid_levels, self.log_level
            ));
        }

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.log_format.as_str()) {
            errors.push(format!(
                "log_format must be one of {:?}, got '{}'. Example: log_format = \"json\"",
                valid_formats, self.log_format
            ));
        }

        if self.export_directory.trim().is_empty() {
            errors.push(
                "export_directory must not be empty. Example: export_directory = \"./maps\""
                    .to_string(),
            );
        }

        if self
            .default_author
            .as_deref()
            .is_some_and(|a| a.trim().is_empty())
        {
            errors.push(
                "default_author must not be blank when set. Example: default_author = \"Anne Bonny\""
                    .to_string(),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors.join("\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn test_path() -> PathBuf {
        PathBuf::from("test-seagrid.toml")
    }

    #[test]
    fn valid_config_loads_all_fields() {
        let toml = r#"
            log_level = "debug"
            log_format = "json"
            export_directory = "./data/maps"
            default_author = "Anne Bonny"
            pretty_json = false
        "#;
        let config = ToolConfig::from_toml_str(toml, &test_path()).unwrap();
        assert_eq!(config.log_level, "debug");
        assert!(config.json_logs());
        assert_eq!(config.export_dir(), PathBuf::from("./data/maps"));
        assert_eq!(config.default_author.as_deref(), Some("Anne Bonny"));
        assert!(!config.pretty_json);
    }

    #[test]
    fn defaults_applied_for_empty_config() {
        let config = ToolConfig::from_toml_str("", &test_path()).unwrap();
        assert_eq!(config, ToolConfig::default());
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, "text");
        assert_eq!(config.export_directory, "./maps");
        assert!(config.default_author.is_none());
        assert!(config.pretty_json);
    }

    #[test]
    fn invalid_log_level_rejected() {
        let err = ToolConfig::from_toml_str("log_level = \"loud\"", &test_path()).unwrap_err();
        assert!(err.contains("log_level"));
        assert!(err.contains("loud"));
    }

    #[test]
    fn all_errors_reported_together() {
        let toml = r#"
            log_level = "loud"
            log_format = "xml"
            export_directory = " "
            default_author = ""
        "#;
        let err = ToolConfig::from_toml_str(toml, &test_path()).unwrap_err();
        assert_eq!(err.lines().count(), 4, "{}", err);
    }

    #[test]
    fn malformed_toml_names_the_file() {
        let err = ToolConfig::from_toml_str("pretty_json = maybe", &test_path()).unwrap_err();
        assert!(err.starts_with("test-seagrid.toml"));
    }

    #[test]
    fn from_file_reads_disk() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "log_format = \"json\"").unwrap();
        let config = ToolConfig::from_file(file.path()).unwrap();
        assert!(config.json_logs());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = ToolConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, ToolConfig::default());
        assert!(ToolConfig::from_file(&dir.path().join("absent.toml")).is_err());
    }
}
