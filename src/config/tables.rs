use super::defaults;
use super::models::{AppConfig, LogLevel};
use crate::text_generator::{CountRange, GenerationMode};
use serde::Deserialize;

/// Table names that mark a file as using the sectioned layout.
pub(super) const TABLE_NAMES: &[&str] = &[
    "logging",
    "scroll",
    "generation",
    "feed",
    "performance",
    "viewport",
];

#[derive(Debug, Clone, Default, Deserialize, serde::Serialize)]
pub(super) struct ConfigTables {
    #[serde(default)]
    logging: LoggingConfig,
    #[serde(default)]
    scroll: ScrollConfig,
    #[serde(default)]
    generation: GenerationTable,
    #[serde(default)]
    feed: FeedConfig,
    #[serde(default)]
    performance: PerformanceTable,
    #[serde(default)]
    viewport: ViewportTable,
}

impl From<ConfigTables> for AppConfig {
    fn from(tables: ConfigTables) -> Self {
        AppConfig {
            log_level: tables.logging.log_level,
            scroll_threshold: tables.scroll.threshold,
            scroll_debounce_ms: tables.scroll.debounce_ms,
            scroll_max_velocity: tables.scroll.max_velocity,
            seed: tables.generation.seed,
            generation_mode: tables.generation.mode,
            words_per_paragraph: tables.generation.words_per_paragraph,
            sentences_per_paragraph: tables.generation.sentences_per_paragraph,
            words_per_sentence: tables.generation.words_per_sentence,
            chunk_size: tables.generation.chunk_size,
            max_paragraphs: tables.generation.max_paragraphs,
            scroll_generation_count: tables.feed.scroll_generation_count,
            button_generation_count: tables.feed.button_generation_count,
            min_generation_count: tables.feed.min_generation_count,
            target_fps: tables.performance.target_fps,
            max_memory_mb: tables.performance.max_memory_mb,
            cleanup_interval_ms: tables.performance.cleanup_interval_ms,
            viewport_buffer_size: tables.viewport.buffer_size,
            viewport_item_height: tables.viewport.item_height,
            viewport_visibility_threshold: tables.viewport.visibility_threshold,
            viewport_client_height: tables.viewport.client_height,
        }
    }
}

impl From<&AppConfig> for ConfigTables {
    fn from(config: &AppConfig) -> Self {
        ConfigTables {
            logging: LoggingConfig {
                log_level: config.log_level,
            },
            scroll: ScrollConfig {
                threshold: config.scroll_threshold,
                debounce_ms: config.scroll_debounce_ms,
                max_velocity: config.scroll_max_velocity,
            },
            generation: GenerationTable {
                seed: config.seed.clone(),
                mode: config.generation_mode,
                words_per_paragraph: config.words_per_paragraph,
                sentences_per_paragraph: config.sentences_per_paragraph,
                words_per_sentence: config.words_per_sentence,
                chunk_size: config.chunk_size,
                max_paragraphs: config.max_paragraphs,
            },
            feed: FeedConfig {
                scroll_generation_count: config.scroll_generation_count,
                button_generation_count: config.button_generation_count,
                min_generation_count: config.min_generation_count,
            },
            performance: PerformanceTable {
                target_fps: config.target_fps,
                max_memory_mb: config.max_memory_mb,
                cleanup_interval_ms: config.cleanup_interval_ms,
            },
            viewport: ViewportTable {
                buffer_size: config.viewport_buffer_size,
                item_height: config.viewport_item_height,
                visibility_threshold: config.viewport_visibility_threshold,
                client_height: config.viewport_client_height,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct LoggingConfig {
    #[serde(default = "defaults::default_log_level")]
    log_level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            log_level: defaults::default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct ScrollConfig {
    #[serde(default = "defaults::default_scroll_threshold")]
    threshold: f64,
    #[serde(default = "defaults::default_scroll_debounce_ms")]
    debounce_ms: u64,
    #[serde(default = "defaults::default_scroll_max_velocity")]
    max_velocity: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        ScrollConfig {
            threshold: defaults::default_scroll_threshold(),
            debounce_ms: defaults::default_scroll_debounce_ms(),
            max_velocity: defaults::default_scroll_max_velocity(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct GenerationTable {
    #[serde(default = "defaults::default_seed")]
    seed: String,
    #[serde(default = "defaults::default_generation_mode")]
    mode: GenerationMode,
    #[serde(default = "defaults::default_words_per_paragraph")]
    words_per_paragraph: CountRange,
    #[serde(default = "defaults::default_sentences_per_paragraph")]
    sentences_per_paragraph: CountRange,
    #[serde(default = "defaults::default_words_per_sentence")]
    words_per_sentence: CountRange,
    #[serde(default = "defaults::default_chunk_size")]
    chunk_size: usize,
    #[serde(default = "defaults::default_max_paragraphs")]
    max_paragraphs: usize,
}

impl Default for GenerationTable {
    fn default() -> Self {
        GenerationTable {
            seed: defaults::default_seed(),
            mode: defaults::default_generation_mode(),
            words_per_paragraph: defaults::default_words_per_paragraph(),
            sentences_per_paragraph: defaults::default_sentences_per_paragraph(),
            words_per_sentence: defaults::default_words_per_sentence(),
            chunk_size: defaults::default_chunk_size(),
            max_paragraphs: defaults::default_max_paragraphs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct FeedConfig {
    #[serde(default = "defaults::default_scroll_generation_count")]
    scroll_generation_count: usize,
    #[serde(default = "defaults::default_button_generation_count")]
    button_generation_count: usize,
    #[serde(default = "defaults::default_min_generation_count")]
    min_generation_count: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        FeedConfig {
            scroll_generation_count: defaults::default_scroll_generation_count(),
            button_generation_count: defaults::default_button_generation_count(),
            min_generation_count: defaults::default_min_generation_count(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct PerformanceTable {
    #[serde(default = "defaults::default_target_fps")]
    target_fps: f64,
    #[serde(default = "defaults::default_max_memory_mb")]
    max_memory_mb: f64,
    #[serde(default = "defaults::default_cleanup_interval_ms")]
    cleanup_interval_ms: u64,
}

impl Default for PerformanceTable {
    fn default() -> Self {
        PerformanceTable {
            target_fps: defaults::default_target_fps(),
            max_memory_mb: defaults::default_max_memory_mb(),
            cleanup_interval_ms: defaults::default_cleanup_interval_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct ViewportTable {
    #[serde(default = "defaults::default_viewport_buffer_size")]
    buffer_size: usize,
    #[serde(default = "defaults::default_viewport_item_height")]
    item_height: f64,
    #[serde(default = "defaults::default_viewport_visibility_threshold")]
    visibility_threshold: f64,
    #[serde(default = "defaults::default_viewport_client_height")]
    client_height: f64,
}

impl Default for ViewportTable {
    fn default() -> Self {
        ViewportTable {
            buffer_size: defaults::default_viewport_buffer_size(),
            item_height: defaults::default_viewport_item_height(),
            visibility_threshold: defaults::default_viewport_visibility_threshold(),
            client_height: defaults::default_viewport_client_height(),
        }
    }
}
