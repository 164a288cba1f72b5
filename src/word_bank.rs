//! Static word tables used by the text generator.
//!
//! `WORD_BANK` is the flat list used for uniform sentence synthesis. It keeps
//! the traditional passage order and is allowed to contain duplicates, which
//! weights the common words. The category tables drive structured sentences.

/// Canonical opening paragraph shown before any generated text.
pub const ORIGINAL_LOREM_TEXT: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do \
eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, quis nostrud \
exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat. Duis aute irure dolor in \
reprehenderit in voluptate velit esse cillum dolore eu fugiat nulla pariatur. Excepteur sint \
occaecat cupidatat non proident, sunt in culpa qui officia deserunt mollit anim id est laborum.";

pub static WORD_BANK: &[&str] = &[
    // Classic passage.
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua", "ut",
    "enim", "ad", "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris",
    "nisi", "ut", "aliquip", "ex", "ea", "commodo", "consequat", "duis", "aute", "irure", "dolor",
    "in", "reprehenderit", "in", "voluptate", "velit", "esse", "cillum", "dolore", "eu", "fugiat",
    "nulla", "pariatur", "excepteur", "sint", "occaecat", "cupidatat", "non", "proident", "sunt",
    "in", "culpa", "qui", "officia", "deserunt", "mollit", "anim", "id", "est", "laborum",
    // De finibus, 1.10.33.
    "at", "vero", "eos", "et", "accusamus", "et", "iusto", "odio", "dignissimos", "ducimus", "qui",
    "blanditiis", "praesentium", "voluptatum", "deleniti", "atque", "corrupti", "quos", "dolores",
    "et", "quas", "molestias", "excepturi", "sint", "occaecati", "cupiditate", "non", "provident",
    "similique", "sunt", "in", "culpa", "qui", "officia", "deserunt", "mollitia", "animi", "id",
    "est", "laborum", "et", "dolorum", "fuga", "et", "harum", "quidem", "rerum", "facilis", "est",
    "et", "expedita", "distinctio", "nam", "libero", "tempore", "cum", "soluta", "nobis", "est",
    "eligendi", "optio", "cumque", "nihil", "impedit", "quo", "minus", "id", "quod", "maxime",
    "placeat", "facere", "possimus", "omnis", "voluptas", "assumenda", "est", "omnis", "dolor",
    "repellendus", "temporibus", "autem", "quibusdam", "et", "aut", "officiis", "debitis", "aut",
    "rerum", "necessitatibus", "saepe", "eveniet", "ut", "et", "voluptates", "repudiandae", "sint",
    "et", "molestiae", "non", "recusandae", "itaque", "earum", "rerum", "hic", "tenetur", "a",
    "sapiente", "delectus", "ut", "aut", "reiciendis", "voluptatibus", "maiores", "alias",
    "consequatur", "aut", "perferendis", "doloribus", "asperiores", "repellat",
    // De finibus, 1.10.32.
    "sed", "ut", "perspiciatis", "unde", "omnis", "iste", "natus", "error", "sit", "voluptatem",
    "accusantium", "doloremque", "laudantium", "totam", "rem", "aperiam", "eaque", "ipsa", "quae",
    "ab", "illo", "inventore", "veritatis", "et", "quasi", "architecto", "beatae", "vitae", "dicta",
    "sunt", "explicabo", "nemo", "ipsam", "quia", "voluptas", "aspernatur", "odit", "fugit",
    "magnam", "aliquam", "quaerat",
];

pub const SUBJECTS: &[&str] = &[
    "lorem", "ipsum", "dolor", "tempor", "labore", "veniam", "exercitation", "laboris", "culpa",
    "officia", "animi", "voluptas", "dolores", "rerum", "natus", "error", "architecto", "vitae",
    "dolor", "voluptatem",
];

pub const VERBS: &[&str] = &[
    "sit", "amet", "consectetur", "adipiscing", "elit", "fugiat", "occaecat", "deserunt",
    "mollit", "consequat", "accusamus", "impedit", "repellat", "eveniet", "explicabo", "quaerat",
    "sit",
];

pub const ADJECTIVES: &[&str] = &[
    "magna", "aliqua", "minim", "nostrud", "magnam", "facilis", "similique", "libera", "beatae",
    "ipsa", "totam", "maxime", "magna",
];

pub const ADVERBS: &[&str] = &[
    "saepe", "itaque", "quidem", "quasi", "maxime", "nihil", "tempore", "autem", "vero", "iusto",
];

pub const CONJUNCTIONS: &[&str] = &[
    "et", "sed", "aut", "atque", "neque", "quia", "nam", "ut", "et", "sed",
];

pub const PREPOSITIONS: &[&str] = &[
    "in", "ad", "ex", "ab", "cum", "de", "per", "sine", "pro", "sub", "in",
];

/// Grammatical slot in a structured sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartOfSpeech {
    Subject,
    Verb,
    Object,
    Adjective,
    Adverb,
    Conjunction,
    Preposition,
}

impl std::fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PartOfSpeech::Subject => "subject",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Object => "object",
            PartOfSpeech::Adjective => "adjective",
            PartOfSpeech::Adverb => "adverb",
            PartOfSpeech::Conjunction => "conjunction",
            PartOfSpeech::Preposition => "preposition",
        };
        write!(f, "{}", label)
    }
}

use PartOfSpeech::{
    Adjective as Adj, Adverb as Adv, Conjunction as Conj, Object as Obj, Preposition as Prep,
    Subject as Subj, Verb,
};

pub static SENTENCE_PATTERNS: &[&[PartOfSpeech]] = &[
    &[Subj, Verb],
    &[Subj, Verb, Obj],
    &[Adj, Subj, Verb],
    &[Subj, Adv, Verb, Obj],
    &[Adj, Subj, Verb, Adj, Obj],
    &[Subj, Verb, Prep, Obj],
    &[Subj, Verb, Conj, Subj, Verb],
    &[Adv, Subj, Verb, Prep, Adj, Obj],
    &[Prep, Obj, Subj, Verb],
    &[Subj, Verb, Obj, Conj, Adv, Verb],
    &[Adj, Subj, Adv, Verb, Prep, Adj, Obj],
];

/// Category tables keyed by part of speech.
#[derive(Debug)]
pub struct WordCategories {
    pub subjects: &'static [&'static str],
    pub verbs: &'static [&'static str],
    pub adjectives: &'static [&'static str],
    pub adverbs: &'static [&'static str],
    pub conjunctions: &'static [&'static str],
    pub prepositions: &'static [&'static str],
}

impl WordCategories {
    /// Words eligible for the given slot. Objects reuse the subject nouns.
    pub fn words_for(&self, part: PartOfSpeech) -> &'static [&'static str] {
        match part {
            PartOfSpeech::Subject | PartOfSpeech::Object => self.subjects,
            PartOfSpeech::Verb => self.verbs,
            PartOfSpeech::Adjective => self.adjectives,
            PartOfSpeech::Adverb => self.adverbs,
            PartOfSpeech::Conjunction => self.conjunctions,
            PartOfSpeech::Preposition => self.prepositions,
        }
    }
}

pub static WORD_CATEGORIES: WordCategories = WordCategories {
    subjects: SUBJECTS,
    verbs: VERBS,
    adjectives: ADJECTIVES,
    adverbs: ADVERBS,
    conjunctions: CONJUNCTIONS,
    prepositions: PREPOSITIONS,
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn original_text_reads_like_lorem_ipsum() {
        assert!(ORIGINAL_LOREM_TEXT.starts_with("Lorem ipsum"));
        assert!(ORIGINAL_LOREM_TEXT.contains("dolor sit amet"));
        assert!(ORIGINAL_LOREM_TEXT.contains("consectetur adipiscing elit"));
        assert!(ORIGINAL_LOREM_TEXT.contains(','));
        assert!(ORIGINAL_LOREM_TEXT.ends_with('.'));
        assert!(!ORIGINAL_LOREM_TEXT.contains("  "), "no doubled spaces");
    }

    #[test]
    fn word_bank_has_classic_and_extended_words() {
        for word in ["lorem", "ipsum", "dolor", "sit", "amet", "at", "vero", "eos", "accusamus"] {
            assert!(WORD_BANK.contains(&word), "missing {word}");
        }
        assert!(WORD_BANK.len() > 50 && WORD_BANK.len() < 1000);
    }

    #[test]
    fn word_bank_keeps_duplicates_and_no_blanks() {
        let unique: HashSet<_> = WORD_BANK.iter().collect();
        assert!(unique.len() < WORD_BANK.len(), "duplicates weight common words");
        assert!(WORD_BANK.iter().all(|word| !word.trim().is_empty()));
        assert!(WORD_BANK.iter().all(|word| !word.contains(' ')));
    }

    #[test]
    fn categories_are_populated() {
        let parts = [
            PartOfSpeech::Subject,
            PartOfSpeech::Verb,
            PartOfSpeech::Adjective,
            PartOfSpeech::Adverb,
            PartOfSpeech::Conjunction,
            PartOfSpeech::Preposition,
        ];
        for part in parts {
            let words = WORD_CATEGORIES.words_for(part);
            assert!(words.len() > 5, "{part} list is too small");
            assert!(words.iter().all(|word| !word.trim().is_empty()), "{part} list has blanks");
        }
        assert!(WORD_CATEGORIES.subjects.contains(&"lorem"));
        assert!(WORD_CATEGORIES.verbs.contains(&"consectetur"));
        assert!(WORD_CATEGORIES.adjectives.contains(&"minim"));
    }

    #[test]
    fn patterns_are_unique_and_bounded() {
        let rendered: HashSet<String> = SENTENCE_PATTERNS
            .iter()
            .map(|pattern| {
                pattern
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("-")
            })
            .collect();
        assert_eq!(rendered.len(), SENTENCE_PATTERNS.len());
        assert!(SENTENCE_PATTERNS.iter().all(|p| !p.is_empty() && p.len() < 10));
    }

    #[test]
    fn object_slot_draws_from_subjects() {
        assert_eq!(
            WORD_CATEGORIES.words_for(PartOfSpeech::Object),
            WORD_CATEGORIES.subjects
        );
    }
}
