use crate::scroll::ScrollDetectionConfig;
use crate::telemetry::PerformanceConfig;
use crate::text_generator::{CountRange, GenerationConfig, GenerationMode};
use crate::viewport::ViewportConfig;
use serde::Deserialize;

/// High-level app configuration; deserializable from TOML.
#[derive(Debug, Clone, PartialEq, Deserialize, serde::Serialize)]
pub struct AppConfig {
    #[serde(default = "crate::config::defaults::default_log_level")]
    pub log_level: LogLevel,
    #[serde(default = "crate::config::defaults::default_scroll_threshold")]
    pub scroll_threshold: f64,
    #[serde(default = "crate::config::defaults::default_scroll_debounce_ms")]
    pub scroll_debounce_ms: u64,
    #[serde(default = "crate::config::defaults::default_scroll_max_velocity")]
    pub scroll_max_velocity: f64,
    #[serde(default = "crate::config::defaults::default_seed")]
    pub seed: String,
    #[serde(default = "crate::config::defaults::default_generation_mode")]
    pub generation_mode: GenerationMode,
    #[serde(default = "crate::config::defaults::default_words_per_paragraph")]
    pub words_per_paragraph: CountRange,
    #[serde(default = "crate::config::defaults::default_sentences_per_paragraph")]
    pub sentences_per_paragraph: CountRange,
    #[serde(default = "crate::config::defaults::default_words_per_sentence")]
    pub words_per_sentence: CountRange,
    #[serde(default = "crate::config::defaults::default_chunk_size")]
    pub chunk_size: usize,
    #[serde(default = "crate::config::defaults::default_max_paragraphs")]
    pub max_paragraphs: usize,
    #[serde(default = "crate::config::defaults::default_scroll_generation_count")]
    pub scroll_generation_count: usize,
    #[serde(default = "crate::config::defaults::default_button_generation_count")]
    pub button_generation_count: usize,
    #[serde(default = "crate::config::defaults::default_min_generation_count")]
    pub min_generation_count: usize,
    #[serde(default = "crate::config::defaults::default_target_fps")]
    pub target_fps: f64,
    #[serde(default = "crate::config::defaults::default_max_memory_mb")]
    pub max_memory_mb: f64,
    #[serde(default = "crate::config::defaults::default_cleanup_interval_ms")]
    pub cleanup_interval_ms: u64,
    #[serde(default = "crate::config::defaults::default_viewport_buffer_size")]
    pub viewport_buffer_size: usize,
    #[serde(default = "crate::config::defaults::default_viewport_item_height")]
    pub viewport_item_height: f64,
    #[serde(default = "crate::config::defaults::default_viewport_visibility_threshold")]
    pub viewport_visibility_threshold: f64,
    #[serde(default = "crate::config::defaults::default_viewport_client_height")]
    pub viewport_client_height: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            log_level: crate::config::defaults::default_log_level(),
            scroll_threshold: crate::config::defaults::default_scroll_threshold(),
            scroll_debounce_ms: crate::config::defaults::default_scroll_debounce_ms(),
            scroll_max_velocity: crate::config::defaults::default_scroll_max_velocity(),
            seed: crate::config::defaults::default_seed(),
            generation_mode: crate::config::defaults::default_generation_mode(),
            words_per_paragraph: crate::config::defaults::default_words_per_paragraph(),
            sentences_per_paragraph: crate::config::defaults::default_sentences_per_paragraph(),
            words_per_sentence: crate::config::defaults::default_words_per_sentence(),
            chunk_size: crate::config::defaults::default_chunk_size(),
            max_paragraphs: crate::config::defaults::default_max_paragraphs(),
            scroll_generation_count: crate::config::defaults::default_scroll_generation_count(),
            button_generation_count: crate::config::defaults::default_button_generation_count(),
            min_generation_count: crate::config::defaults::default_min_generation_count(),
            target_fps: crate::config::defaults::default_target_fps(),
            max_memory_mb: crate::config::defaults::default_max_memory_mb(),
            cleanup_interval_ms: crate::config::defaults::default_cleanup_interval_ms(),
            viewport_buffer_size: crate::config::defaults::default_viewport_buffer_size(),
            viewport_item_height: crate::config::defaults::default_viewport_item_height(),
            viewport_visibility_threshold:
                crate::config::defaults::default_viewport_visibility_threshold(),
            viewport_client_height: crate::config::defaults::default_viewport_client_height(),
        }
    }
}

impl AppConfig {
    pub fn generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            seed: self.seed.clone(),
            mode: self.generation_mode,
            words_per_paragraph: self.words_per_paragraph,
            sentences_per_paragraph: self.sentences_per_paragraph,
            words_per_sentence: self.words_per_sentence,
            chunk_size: self.chunk_size,
            max_paragraphs: self.max_paragraphs,
            scroll_threshold: self.scroll_threshold,
        }
    }

    pub fn scroll_config(&self) -> ScrollDetectionConfig {
        ScrollDetectionConfig {
            threshold: self.scroll_threshold,
            debounce_ms: self.scroll_debounce_ms.max(1),
            max_velocity: self.scroll_max_velocity,
        }
    }

    pub fn viewport_config(&self) -> ViewportConfig {
        ViewportConfig {
            buffer_size: self.viewport_buffer_size,
            item_height: self.viewport_item_height,
            visibility_threshold: self.viewport_visibility_threshold,
            client_height: self.viewport_client_height,
        }
    }

    pub fn performance_config(&self) -> PerformanceConfig {
        PerformanceConfig {
            target_fps: self.target_fps,
            max_memory_mb: self.max_memory_mb,
            cleanup_interval_ms: self.cleanup_interval_ms,
        }
    }
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Default, Deserialize, serde::Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
