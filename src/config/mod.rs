//! Configuration loading and validation

mod schema;

pub use schema::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Annotated example configuration, written by `cadence init`
pub const EXAMPLE_CONFIG: &str = include_str!("../../cadence.example.yaml");

/// Load configuration from a YAML file
pub fn load_config(path: &Path) -> Result<EngineConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config: EngineConfig = serde_yaml::from_str(&contents)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid config file {}", path.display()))?;
    Ok(config)
}

/// Load a config file if given, otherwise the defaults
pub fn load_or_default(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => load_config(path),
        None => Ok(EngineConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_minimal_config() {
        let yaml = r#"
audio:
  sample_rate: 22050

master:
  volume: 0.7
"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.audio.sample_rate, 22050);
        assert_eq!(config.master.volume, 0.7);
        assert_eq!(config.generation.duration_seconds, 30.0);
    }

    #[test]
    fn test_example_config_matches_defaults() {
        let config: EngineConfig = serde_yaml::from_str(EXAMPLE_CONFIG).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"audio:\n  sample_rate: 1000\n").unwrap();

        let err = load_config(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("sample rate"));
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = load_config(Path::new("/nonexistent/cadence.yaml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }

    #[test]
    fn test_load_or_default() {
        assert_eq!(load_or_default(None).unwrap(), EngineConfig::default());
    }
}
