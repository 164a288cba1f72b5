//! Seeded lorem ipsum synthesis.
//!
//! A [`TextGenerator`] owns one [`SeededRandom`] stream plus the position and
//! paragraph counters for the paragraphs it hands out. The stream can be
//! replaced with [`TextGenerator::reseed`]; the counters never rewind, so ids
//! stay unique for the lifetime of the generator.

use crate::error::{LoremError, Result};
use crate::random::SeededRandom;
use crate::scroll::ScrollPosition;
use crate::word_bank::{ORIGINAL_LOREM_TEXT, SENTENCE_PATTERNS, WORD_BANK, WORD_CATEGORIES};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

pub const ORIGINAL_TEXT_ID: &str = "original-lorem-ipsum";

/// Whether a paragraph is the fixed opener or was synthesized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextKind {
    Original,
    Generated,
}

/// One paragraph of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoremText {
    pub id: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: TextKind,
    pub position: usize,
    pub paragraph_index: usize,
}

/// Inclusive `{min, max}` bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRange {
    pub min: i64,
    pub max: i64,
}

impl CountRange {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    fn validate(self, name: &str, floor: i64) -> Result<()> {
        if self.min > self.max {
            return Err(LoremError::InvalidConfig {
                message: format!("{name}: min {} exceeds max {}", self.min, self.max),
            });
        }
        if self.min < floor {
            return Err(LoremError::InvalidConfig {
                message: format!("{name}: min {} is below {floor}", self.min),
            });
        }
        Ok(())
    }

    fn sample(self, random: &mut SeededRandom) -> Result<i64> {
        random.next_int(self.min, self.max)
    }
}

/// How paragraphs are assembled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    /// Words drawn uniformly from the flat word bank.
    #[default]
    Uniform,
    /// Sentences built from grammatical patterns over the word categories.
    Structured,
}

impl std::fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            GenerationMode::Uniform => "uniform",
            GenerationMode::Structured => "structured",
        };
        write!(f, "{}", label)
    }
}

/// Settings fixed at generator construction.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    pub seed: String,
    pub mode: GenerationMode,
    /// Target length of structured paragraphs.
    pub words_per_paragraph: CountRange,
    pub sentences_per_paragraph: CountRange,
    pub words_per_sentence: CountRange,
    /// Words emitted by [`TextGenerator::generate_chunk`].
    pub chunk_size: usize,
    /// Upper bound on generated paragraphs held by a feed.
    pub max_paragraphs: usize,
    /// Percentage of the scrollable distance that triggers generation.
    pub scroll_threshold: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            seed: "lorem-ipsum-2026".to_string(),
            mode: GenerationMode::Uniform,
            words_per_paragraph: CountRange::new(30, 100),
            sentences_per_paragraph: CountRange::new(3, 8),
            words_per_sentence: CountRange::new(5, 15),
            chunk_size: 50,
            max_paragraphs: 100,
            scroll_threshold: 85.0,
        }
    }
}

impl GenerationConfig {
    pub fn validate(&self) -> Result<()> {
        self.words_per_paragraph.validate("words_per_paragraph", 1)?;
        self.sentences_per_paragraph
            .validate("sentences_per_paragraph", 1)?;
        self.words_per_sentence.validate("words_per_sentence", 1)?;
        if !(0.0..=100.0).contains(&self.scroll_threshold) {
            return Err(LoremError::InvalidConfig {
                message: format!(
                    "scroll_threshold {} is outside 0-100",
                    self.scroll_threshold
                ),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct TextGenerator {
    config: GenerationConfig,
    random: SeededRandom,
    next_position: usize,
    next_paragraph_index: usize,
}

impl TextGenerator {
    pub fn new(config: GenerationConfig) -> Result<Self> {
        config.validate()?;
        let random = SeededRandom::new(&config.seed);
        Ok(Self {
            config,
            random,
            // Position 0 and paragraph 1 belong to the original text.
            next_position: 1,
            next_paragraph_index: 2,
        })
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn original_text(&self) -> LoremText {
        LoremText {
            id: ORIGINAL_TEXT_ID.to_string(),
            content: ORIGINAL_LOREM_TEXT.to_string(),
            kind: TextKind::Original,
            position: 0,
            paragraph_index: 1,
        }
    }

    /// Replace the random stream. Position and paragraph counters are kept.
    pub fn reseed(&mut self, seed: &str) {
        debug!(seed, next_position = self.next_position, "Reseeding text generator");
        self.random = SeededRandom::new(seed);
    }

    /// Build one sentence of `word_count` words; non-positive counts yield `""`.
    ///
    /// A `seed` reseeds the generator first, exactly like [`Self::reseed`].
    pub fn generate_sentence(&mut self, word_count: i64, seed: Option<&str>) -> Result<String> {
        if let Some(seed) = seed {
            self.reseed(seed);
        }
        let words = self.draw_words(word_count)?;
        Ok(format_sentence(words))
    }

    /// Produce `count` new paragraphs, continuing this generator's counters.
    pub fn generate_paragraphs(&mut self, count: usize, seed: Option<&str>) -> Result<Vec<LoremText>> {
        if let Some(seed) = seed {
            self.reseed(seed);
        }
        let mut paragraphs = Vec::with_capacity(count);
        for _ in 0..count {
            let content = match self.config.mode {
                GenerationMode::Uniform => self.uniform_paragraph()?,
                GenerationMode::Structured => self.structured_paragraph()?,
            };
            paragraphs.push(self.wrap_paragraph(content));
        }
        debug!(
            count,
            next_position = self.next_position,
            mode = %self.config.mode,
            "Generated paragraphs"
        );
        Ok(paragraphs)
    }

    /// One run-on sentence of exactly `chunk_size` words.
    pub fn generate_chunk(&mut self) -> Result<String> {
        let words = self.draw_words(self.config.chunk_size as i64)?;
        Ok(format_sentence(words))
    }

    pub fn should_generate(&self, position: &ScrollPosition) -> bool {
        position.is_near_bottom
    }

    fn uniform_paragraph(&mut self) -> Result<String> {
        let sentence_count = self.config.sentences_per_paragraph.sample(&mut self.random)?;
        let mut sentences = Vec::with_capacity(sentence_count.max(0) as usize);
        for _ in 0..sentence_count {
            let word_count = self.config.words_per_sentence.sample(&mut self.random)?;
            sentences.push(self.generate_sentence(word_count, None)?);
        }
        Ok(sentences.join(" "))
    }

    fn structured_paragraph(&mut self) -> Result<String> {
        let target = self.config.words_per_paragraph.sample(&mut self.random)?;
        let mut sentences = Vec::new();
        let mut written = 0i64;
        while written < target {
            let pattern = *self.random.next_element(SENTENCE_PATTERNS)?;
            let mut words = Vec::with_capacity(pattern.len());
            for part in pattern {
                let word = self.random.next_element(WORD_CATEGORIES.words_for(*part))?;
                words.push(*word);
            }
            written += words.len() as i64;
            sentences.push(format_sentence(words));
        }
        Ok(sentences.join(" "))
    }

    fn wrap_paragraph(&mut self, content: String) -> LoremText {
        let position = self.next_position;
        let paragraph_index = self.next_paragraph_index;
        self.next_position += 1;
        self.next_paragraph_index += 1;
        trace!(position, paragraph_index, chars = content.len(), "Wrapped paragraph");
        LoremText {
            id: format!("generated-{position}"),
            content,
            kind: TextKind::Generated,
            position,
            paragraph_index,
        }
    }

    fn draw_words(&mut self, count: i64) -> Result<Vec<&'static str>> {
        let count = count.max(0) as usize;
        let mut words = Vec::with_capacity(count);
        for _ in 0..count {
            words.push(*self.random.next_element(WORD_BANK)?);
        }
        Ok(words)
    }
}

/// Capitalize the first word and make sure the sentence ends with a period.
fn format_sentence(words: Vec<&str>) -> String {
    let Some((first, rest)) = words.split_first() else {
        return String::new();
    };
    let mut sentence = capitalize(first);
    for word in rest {
        sentence.push(' ');
        sentence.push_str(word);
    }
    if !sentence.ends_with('.') {
        sentence.push('.');
    }
    sentence
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Build a generator with `config`, or the defaults when `None`.
pub fn create_text_generator(config: Option<GenerationConfig>) -> Result<TextGenerator> {
    TextGenerator::new(config.unwrap_or_default())
}

/// Fresh generator, `count` paragraphs.
pub fn generate_lorem_text(count: usize, config: Option<GenerationConfig>) -> Result<Vec<LoremText>> {
    create_text_generator(config)?.generate_paragraphs(count, None)
}

pub fn generate_lorem_sentence(word_count: i64, seed: Option<&str>) -> Result<String> {
    create_text_generator(None)?.generate_sentence(word_count, seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;
    use regex::Regex;

    static SENTENCE_SHAPE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^[A-Z].*\.$").expect("static regex"));

    fn seeded_generator(seed: &str) -> TextGenerator {
        TextGenerator::new(GenerationConfig {
            seed: seed.to_string(),
            ..GenerationConfig::default()
        })
        .expect("default ranges are valid")
    }

    #[test]
    fn original_text_is_fixed() {
        let original = seeded_generator("any").original_text();
        assert_eq!(original.id, "original-lorem-ipsum");
        assert_eq!(original.kind, TextKind::Original);
        assert_eq!(original.position, 0);
        assert_eq!(original.paragraph_index, 1);
        assert!(original.content.starts_with("Lorem ipsum dolor sit amet"));
    }

    #[test]
    fn sentences_are_capitalized_and_terminated() {
        let mut generator = seeded_generator("format");
        for word_count in 1..=40 {
            let sentence = generator
                .generate_sentence(word_count, None)
                .expect("sentence");
            assert!(SENTENCE_SHAPE.is_match(&sentence), "bad sentence: {sentence}");
            assert_eq!(sentence.split(' ').count() as i64, word_count);
        }
    }

    #[test]
    fn non_positive_word_counts_are_empty() {
        let mut generator = seeded_generator("empty");
        assert_eq!(generator.generate_sentence(0, None).expect("zero"), "");
        assert_eq!(generator.generate_sentence(-5, None).expect("negative"), "");
    }

    #[test]
    fn identical_call_sequences_are_reproducible() {
        let run = || {
            let mut generator = seeded_generator("determinism");
            let mut out = Vec::new();
            out.push(generator.generate_sentence(7, None).expect("sentence"));
            for paragraph in generator.generate_paragraphs(3, None).expect("paragraphs") {
                out.push(paragraph.content);
            }
            out.push(generator.generate_chunk().expect("chunk"));
            out
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn positions_continue_across_calls_without_gaps() {
        let mut generator = seeded_generator("positions");
        let mut positions = Vec::new();
        for count in [1usize, 0, 4, 2, 3] {
            for paragraph in generator.generate_paragraphs(count, None).expect("paragraphs") {
                assert_eq!(paragraph.id, format!("generated-{}", paragraph.position));
                assert_eq!(paragraph.paragraph_index, paragraph.position + 1);
                positions.push(paragraph.position);
            }
        }
        let expected: Vec<usize> = (1..=10).collect();
        assert_eq!(positions, expected);
    }

    #[test]
    fn reseed_resets_stream_but_not_counters() {
        let mut generator = seeded_generator("first");
        generator.generate_paragraphs(2, None).expect("warmup");

        let reseeded = generator
            .generate_paragraphs(1, Some("second"))
            .expect("reseeded");
        let fresh = seeded_generator("second")
            .generate_paragraphs(1, None)
            .expect("fresh");

        assert_eq!(reseeded[0].content, fresh[0].content);
        assert_eq!(reseeded[0].position, 3);
        assert_eq!(fresh[0].position, 1);
    }

    #[test]
    fn sentence_seed_matches_explicit_reseed() {
        let mut via_argument = seeded_generator("base");
        let mut via_reseed = seeded_generator("base");
        via_reseed.reseed("override");
        assert_eq!(
            via_argument
                .generate_sentence(12, Some("override"))
                .expect("seeded"),
            via_reseed.generate_sentence(12, None).expect("reseeded"),
        );
    }

    #[test]
    fn paragraph_sentence_counts_follow_config() {
        let mut generator = seeded_generator("ranges");
        for paragraph in generator.generate_paragraphs(25, None).expect("paragraphs") {
            let sentences: Vec<&str> = paragraph
                .content
                .split_inclusive('.')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect();
            assert!(
                (3..=8).contains(&sentences.len()),
                "{} sentences in {}",
                sentences.len(),
                paragraph.id
            );
            for sentence in sentences {
                let words = sentence.split(' ').count();
                assert!((5..=15).contains(&words), "{words} words in '{sentence}'");
            }
        }
    }

    #[test]
    fn end_to_end_seed_produces_two_reproducible_paragraphs() {
        let config = GenerationConfig {
            seed: "lorem-ipsum-2026".to_string(),
            ..GenerationConfig::default()
        };
        let first = generate_lorem_text(2, Some(config.clone())).expect("first run");
        let second = generate_lorem_text(2, Some(config)).expect("second run");

        assert_eq!(first.len(), 2);
        assert_eq!(
            first.iter().map(|p| p.position).collect::<Vec<_>>(),
            vec![1, 2]
        );
        for paragraph in &first {
            assert_eq!(paragraph.kind, TextKind::Generated);
            assert!(!paragraph.content.is_empty());
        }
        let contents = |texts: &[LoremText]| texts.iter().map(|p| p.content.clone()).collect::<Vec<_>>();
        assert_eq!(contents(&first), contents(&second));
    }

    #[test]
    fn structured_paragraphs_reach_word_target() {
        let mut generator = TextGenerator::new(GenerationConfig {
            seed: "structured".to_string(),
            mode: GenerationMode::Structured,
            words_per_paragraph: CountRange::new(20, 30),
            ..GenerationConfig::default()
        })
        .expect("valid config");
        for paragraph in generator.generate_paragraphs(10, None).expect("paragraphs") {
            let words = paragraph.content.split_whitespace().count();
            // The last pattern may overshoot by at most its own length.
            assert!((20..30 + 7).contains(&words), "{words} words");
            assert!(paragraph.content.ends_with('.'));
        }
    }

    #[test]
    fn chunk_has_configured_word_count() {
        let mut generator = TextGenerator::new(GenerationConfig {
            chunk_size: 17,
            ..GenerationConfig::default()
        })
        .expect("valid config");
        let chunk = generator.generate_chunk().expect("chunk");
        assert_eq!(chunk.split(' ').count(), 17);
    }

    #[test]
    fn inverted_ranges_are_rejected() {
        let err = TextGenerator::new(GenerationConfig {
            sentences_per_paragraph: CountRange::new(8, 3),
            ..GenerationConfig::default()
        })
        .expect_err("inverted range");
        assert!(matches!(err, LoremError::InvalidConfig { .. }));
    }

    #[test]
    fn should_generate_mirrors_near_bottom_flag() {
        let generator = seeded_generator("predicate");
        let mut position = ScrollPosition::default();
        assert!(!generator.should_generate(&position));
        position.is_near_bottom = true;
        assert!(generator.should_generate(&position));
    }

    #[test]
    fn lorem_text_serializes_with_wire_names() {
        let original = seeded_generator("json").original_text();
        let value = serde_json::to_value(&original).expect("serialize");
        assert_eq!(value["type"], "original");
        assert_eq!(value["paragraphIndex"], 1);
        assert_eq!(value["position"], 0);
    }

    #[test]
    fn convenience_sentence_uses_default_generator() {
        let a = generate_lorem_sentence(9, Some("shared")).expect("sentence");
        let b = generate_lorem_sentence(9, Some("shared")).expect("sentence");
        assert_eq!(a, b);
        assert_eq!(a.split(' ').count(), 9);
    }
}
