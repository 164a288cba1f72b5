use crate::text_generator::{CountRange, GenerationMode};

pub(crate) fn default_log_level() -> crate::config::LogLevel {
    crate::config::LogLevel::Info
}

pub(crate) fn default_scroll_threshold() -> f64 {
    85.0
}

pub(crate) fn default_scroll_debounce_ms() -> u64 {
    16
}

pub(crate) fn default_scroll_max_velocity() -> f64 {
    10_000.0
}

pub(crate) fn default_seed() -> String {
    "lorem-ipsum-2026".to_string()
}

pub(crate) fn default_generation_mode() -> GenerationMode {
    GenerationMode::Uniform
}

pub(crate) fn default_words_per_paragraph() -> CountRange {
    CountRange::new(30, 100)
}

pub(crate) fn default_sentences_per_paragraph() -> CountRange {
    CountRange::new(3, 8)
}

pub(crate) fn default_words_per_sentence() -> CountRange {
    CountRange::new(5, 15)
}

pub(crate) fn default_chunk_size() -> usize {
    50
}

pub(crate) fn default_max_paragraphs() -> usize {
    100
}

pub(crate) fn default_scroll_generation_count() -> usize {
    2
}

pub(crate) fn default_button_generation_count() -> usize {
    3
}

pub(crate) fn default_min_generation_count() -> usize {
    2
}

pub(crate) fn default_target_fps() -> f64 {
    60.0
}

pub(crate) fn default_max_memory_mb() -> f64 {
    100.0
}

pub(crate) fn default_cleanup_interval_ms() -> u64 {
    30_000
}

pub(crate) fn default_viewport_buffer_size() -> usize {
    2
}

pub(crate) fn default_viewport_item_height() -> f64 {
    120.0
}

pub(crate) fn default_viewport_visibility_threshold() -> f64 {
    0.1
}

pub(crate) fn default_viewport_client_height() -> f64 {
    800.0
}
