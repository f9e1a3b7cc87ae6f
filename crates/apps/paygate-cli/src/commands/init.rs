//! Write a starter configuration file.

use std::path::Path;

use colored::Colorize;

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::OutputFormat;

/// Execute the init command.
pub fn init(path: &Path, force: bool, format: OutputFormat) -> CliResult<String> {
    if path.exists() && !force {
        return Err(CliError::user(format!(
            "{} already exists. Pass --force to overwrite.",
            path.display()
        )));
    }

    let mut config = CliConfig::default();
    config.gateway.hash_key = "${PAYGATE_HASH_KEY}".to_string();
    config.gateway.password = "${PAYGATE_PASSWORD}".to_string();
    config.save(path)?;

    Ok(match format {
        OutputFormat::Human => format!(
            "{} {}",
            "Wrote configuration to".green(),
            path.display()
        ),
        OutputFormat::Json => serde_json::json!({ "config": path }).to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_loadable_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        init(&path, false, OutputFormat::Human).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("${PAYGATE_HASH_KEY}"));

        let config = CliConfig::load(&path).unwrap();
        assert_eq!(config.gateway.currency, "VND");
    }

    #[test]
    fn test_init_refuses_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "").unwrap();

        assert!(init(&path, false, OutputFormat::Human).is_err());
        assert!(init(&path, true, OutputFormat::Json).is_ok());
    }
}
