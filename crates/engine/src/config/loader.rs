use std::path::{Path, PathBuf};

use biaslens_common::config::SignalConfig;

use super::validation;

/// File name looked up inside the config directory.
pub const CONFIG_FILE_NAME: &str = "signals.toml";

/// Load the signal configuration from `{config_dir}/signals.toml`.
///
/// Fails loudly with the offending path on read or parse errors, and with
/// every range problem at once on validation failure.
pub fn load_config(config_dir: &Path) -> Result<SignalConfig, ConfigError> {
    tracing::info!(config_dir = %config_dir.display(), "Loading signal configuration");

    let path = config_dir.join(CONFIG_FILE_NAME);
    let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileRead {
        path: path.clone(),
        source: e,
    })?;

    let config = parse(&content, &path)?;

    tracing::info!(
        window_chars = config.omissions.window_chars,
        max_findings_per_detector = config.omissions.max_findings_per_detector,
        flag_causal_verb_phrase = config.claims.flag_causal_verb_phrase,
        "Signal configuration loaded successfully"
    );

    Ok(config)
}

/// Parse and validate an in-memory TOML document. Missing sections and
/// fields take their defaults.
pub fn load_config_str(content: &str) -> Result<SignalConfig, ConfigError> {
    parse(content, Path::new("<inline>"))
}

fn parse(content: &str, path: &Path) -> Result<SignalConfig, ConfigError> {
    let config: SignalConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;

    validation::validate(&config)?;
    Ok(config)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {detail}")]
    Parse { path: PathBuf, detail: String },

    #[error("Validation failed: {0}")]
    Validation(String),
}

impl From<ConfigError> for biaslens_common::BiasLensError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_yields_defaults() {
        let config = load_config_str("").unwrap();
        assert_eq!(config, SignalConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = load_config_str(
            r#"
            [claims]
            flag_causal_verb_phrase = true

            [timeline]
            large_gap_minutes = 240
            "#,
        )
        .unwrap();
        assert!(config.claims.flag_causal_verb_phrase);
        assert_eq!(config.claims.severity_weights.moderate, 10);
        assert_eq!(config.timeline.large_gap_minutes, 240);
        assert_eq!(config.timeline.cluster_window_minutes, 10);
    }

    #[test]
    fn test_rating_table_override_must_be_complete() {
        let err = load_config_str(
            r#"
            [[rating]]
            stars = 1
            label = "Bad"
            color = "red"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let dir = std::env::temp_dir().join("biaslens-missing-config-dir");
        let err = load_config(&dir).unwrap_err();
        assert!(err.to_string().contains(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_invalid_ranges_rejected() {
        let err = load_config_str(
            r#"
            [omissions]
            window_chars = 0
            max_findings_per_detector = 0
            "#,
        )
        .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("omissions.window_chars"));
        assert!(msg.contains("omissions.max_findings_per_detector"));
    }
}
