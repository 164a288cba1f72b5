//! Ordered document of lorem paragraphs that grows on request.
//!
//! Requests are deferred: [`LoremFeed::generate_more`] only records the batch
//! and flips the in-flight flag, and the host runs [`LoremFeed::run_pending`]
//! on its next tick. A second request while one is in flight is ignored.

use crate::text_generator::{GenerationConfig, LoremText, TextGenerator};
use anyhow::{Context, Result};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Outcome of a generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateRequest {
    /// A batch of this many paragraphs will be produced on the next tick.
    Scheduled(usize),
    /// Another batch is still in flight; the request was dropped.
    AlreadyGenerating,
    /// The paragraph budget is spent.
    Exhausted,
}

/// Result of running a deferred batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratedBatch {
    pub appended: usize,
    pub elapsed: Duration,
}

#[derive(Debug)]
pub struct LoremFeed {
    generator: TextGenerator,
    texts: Vec<LoremText>,
    pending: Option<usize>,
    min_batch: usize,
    generated: usize,
}

impl LoremFeed {
    pub fn new(config: GenerationConfig, min_batch: usize) -> Result<Self> {
        let generator = TextGenerator::new(config).context("Invalid generation settings")?;
        let texts = vec![generator.original_text()];
        Ok(Self {
            generator,
            texts,
            pending: None,
            min_batch,
            generated: 0,
        })
    }

    /// Every paragraph so far, original first, ordered by position.
    pub fn texts(&self) -> &[LoremText] {
        &self.texts
    }

    pub fn original_text(&self) -> &LoremText {
        &self.texts[0]
    }

    pub fn generator(&self) -> &TextGenerator {
        &self.generator
    }

    pub fn is_generating(&self) -> bool {
        self.pending.is_some()
    }

    pub fn generated_count(&self) -> usize {
        self.generated
    }

    pub fn remaining_budget(&self) -> usize {
        self.generator
            .config()
            .max_paragraphs
            .saturating_sub(self.generated)
    }

    /// Ask for at least `count` more paragraphs on the next tick.
    pub fn generate_more(&mut self, count: usize) -> GenerateRequest {
        if self.pending.is_some() {
            debug!(count, "Generation already in flight; ignoring request");
            return GenerateRequest::AlreadyGenerating;
        }
        let batch = count.max(self.min_batch).min(self.remaining_budget());
        if batch == 0 {
            debug!(generated = self.generated, "Paragraph budget exhausted");
            return GenerateRequest::Exhausted;
        }
        self.pending = Some(batch);
        debug!(batch, "Generation scheduled");
        GenerateRequest::Scheduled(batch)
    }

    /// Run the deferred batch, if any. The in-flight flag clears even when
    /// generation fails.
    pub fn run_pending(&mut self) -> Result<Option<GeneratedBatch>> {
        let Some(batch) = self.pending.take() else {
            return Ok(None);
        };
        let started = Instant::now();
        let paragraphs = self
            .generator
            .generate_paragraphs(batch, None)
            .context("Failed to generate paragraphs")?;
        let appended = paragraphs.len();
        self.generated += appended;
        self.texts.extend(paragraphs);
        let elapsed = started.elapsed();
        info!(
            appended,
            total = self.texts.len(),
            elapsed_us = elapsed.as_micros() as u64,
            "Appended generated paragraphs"
        );
        Ok(Some(GeneratedBatch { appended, elapsed }))
    }
}
