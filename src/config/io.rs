use super::models::AppConfig;
use super::tables::{ConfigTables, TABLE_NAMES};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Load configuration from the given path, falling back to defaults on error.
pub fn load_config(path: &Path) -> AppConfig {
    let contents = match fs::read_to_string(path) {
        Ok(data) => {
            info!(path = %path.display(), "Loaded base config");
            data
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                "Falling back to default config: {err}"
            );
            return AppConfig::default();
        }
    };

    match parse_config(&contents) {
        Ok(cfg) => {
            debug!("Parsed configuration from disk");
            cfg
        }
        Err(err) => {
            warn!(path = %path.display(), "Invalid config: {err:#}");
            AppConfig::default()
        }
    }
}

/// Parse either the sectioned layout or the legacy flat layout, then check
/// that the generation ranges are usable.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let raw: toml::Table = toml::from_str(contents).context("Config is not valid TOML")?;
    let sectioned = TABLE_NAMES
        .iter()
        .any(|name| raw.get(*name).is_some_and(toml::Value::is_table));

    let config = if sectioned {
        let tables: ConfigTables =
            toml::from_str(contents).context("Config tables have invalid values")?;
        AppConfig::from(tables)
    } else {
        toml::from_str::<AppConfig>(contents).context("Flat config has invalid values")?
    };

    config
        .generation_config()
        .validate()
        .context("Generation settings rejected")?;
    Ok(config)
}

/// Render the config in the sectioned layout.
pub fn serialize_config(config: &AppConfig) -> Result<String> {
    toml::to_string(&ConfigTables::from(config)).context("Failed to serialize config")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;
    use crate::text_generator::{CountRange, GenerationMode};

    #[test]
    fn empty_file_yields_defaults() {
        assert_eq!(parse_config("").expect("empty config"), AppConfig::default());
    }

    #[test]
    fn sectioned_layout_is_applied() {
        let config = parse_config(
            r#"
            [logging]
            log_level = "trace"

            [scroll]
            threshold = 70.0
            max_velocity = 5000.0

            [generation]
            seed = "custom-seed"
            mode = "structured"
            words_per_paragraph = { min = 10, max = 20 }

            [feed]
            scroll_generation_count = 4
            "#,
        )
        .expect("sectioned config");

        assert_eq!(config.log_level, LogLevel::Trace);
        assert_eq!(config.scroll_threshold, 70.0);
        assert_eq!(config.scroll_max_velocity, 5000.0);
        assert_eq!(config.scroll_debounce_ms, 16, "unset keys keep defaults");
        assert_eq!(config.seed, "custom-seed");
        assert_eq!(config.generation_mode, GenerationMode::Structured);
        assert_eq!(config.words_per_paragraph, CountRange::new(10, 20));
        assert_eq!(config.scroll_generation_count, 4);
        assert_eq!(config.generation_config().scroll_threshold, 70.0);
    }

    #[test]
    fn flat_layout_is_still_accepted() {
        let config = parse_config(
            r#"
            log_level = "warn"
            seed = "flat"
            max_paragraphs = 12
            "#,
        )
        .expect("flat config");
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.seed, "flat");
        assert_eq!(config.max_paragraphs, 12);
    }

    #[test]
    fn inverted_ranges_are_rejected() {
        let err = parse_config(
            r#"
            [generation]
            sentences_per_paragraph = { min = 9, max = 2 }
            "#,
        )
        .expect_err("inverted range");
        assert!(format!("{err:#}").contains("sentences_per_paragraph"));
    }

    #[test]
    fn serialized_config_parses_back() {
        let mut config = AppConfig::default();
        config.seed = "round-trip".to_string();
        config.generation_mode = GenerationMode::Structured;
        let rendered = serialize_config(&config).expect("serialize");
        assert!(rendered.contains("[generation]"));
        assert_eq!(parse_config(&rendered).expect("parse back"), config);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join(format!(
            "lorem-scroll-missing-{}/config.toml",
            std::process::id()
        ));
        assert_eq!(load_config(&path), AppConfig::default());
    }

    #[test]
    fn invalid_toml_falls_back_to_defaults() {
        let dir = std::env::temp_dir().join(format!("lorem-scroll-bad-{}", std::process::id()));
        fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join("config.toml");
        fs::write(&path, "seed = [unterminated").expect("write config");
        assert_eq!(load_config(&path), AppConfig::default());
        let _ = fs::remove_dir_all(&dir);
    }
}
