//! Text measuring helpers for generated documents.

use crate::text_generator::LoremText;
use serde::Serialize;

/// Sentence splitter based on terminal punctuation. Pieces are trimmed and
/// blank pieces dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for (idx, ch) in text.char_indices() {
        if matches!(ch, '.' | '!' | '?') {
            let end = idx + ch.len_utf8();
            let piece = text[start..end].trim();
            if !piece.is_empty() {
                sentences.push(piece);
            }
            start = end;
        }
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }

    sentences
}

/// Totals across a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TextStats {
    pub paragraphs: usize,
    pub sentences: usize,
    pub words: usize,
    pub bytes: usize,
}

pub fn text_stats(texts: &[LoremText]) -> TextStats {
    texts.iter().fold(TextStats::default(), |mut stats, text| {
        stats.paragraphs += 1;
        stats.sentences += split_sentences(&text.content).len();
        stats.words += text.content.split_whitespace().count();
        stats.bytes += text.content.len();
        stats
    })
}
