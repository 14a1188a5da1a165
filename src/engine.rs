//! The capability the formatting layer needs from a segmentation engine.

use crate::error::Result;
use crate::format::{format_keywords, format_segmentation, FormatOptions, Keyword, Token};

/// A segmentation engine that answers in NLPIR's output conventions.
///
/// Both calls block until the engine answers. Implementations own whatever
/// session state the engine needs; callers only see strings.
pub trait Engine {
    /// Segments `text`, returning space separated fields, each `word/code`
    /// when `pos_tagging` is set.
    fn paragraph_process(&self, text: &str, pos_tagging: bool) -> Result<String>;

    /// Finds up to `max_words` keywords, returned `#` separated; each entry is
    /// `word/pos/weight` when `weighted` is set.
    fn get_key_words(&self, text: &str, max_words: usize, weighted: bool) -> Result<String>;
}

impl<E: Engine + ?Sized> Engine for &E {
    fn paragraph_process(&self, text: &str, pos_tagging: bool) -> Result<String> {
        (**self).paragraph_process(text, pos_tagging)
    }

    fn get_key_words(&self, text: &str, max_words: usize, weighted: bool) -> Result<String> {
        (**self).get_key_words(text, max_words, weighted)
    }
}

impl<E: Engine + ?Sized> Engine for Box<E> {
    fn paragraph_process(&self, text: &str, pos_tagging: bool) -> Result<String> {
        (**self).paragraph_process(text, pos_tagging)
    }

    fn get_key_words(&self, text: &str, max_words: usize, weighted: bool) -> Result<String> {
        (**self).get_key_words(text, max_words, weighted)
    }
}

/// Segmentation and keyword extraction with formatted results.
pub struct Nlpir<E> {
    engine: E,
}

impl<E: Engine> Nlpir<E> {
    pub fn new(engine: E) -> Self {
        Nlpir { engine }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn into_inner(self) -> E {
        self.engine
    }

    /// Segments `text` into tokens.
    ///
    /// `options.pos_tagging` decides whether the engine is asked for codes.
    /// Words the tagger does not recognise (a literal space, for one) come
    /// back with `tag: None`.
    pub fn segment(&self, text: &str, options: &FormatOptions<'_>) -> Result<Vec<Token>> {
        let text = text.trim();
        tracing::debug!(
            "Segmenting text with{} POS tagging: {}.",
            if options.pos_tagging { "" } else { "out" },
            text
        );
        let raw = self.engine.paragraph_process(text, options.pos_tagging)?;
        tracing::debug!("Finished segmenting text: {}.", raw);
        Ok(format_segmentation(&raw, options))
    }

    /// Finds up to `max_words` keywords in `text`.
    pub fn get_key_words(&self, text: &str, max_words: usize, weighted: bool) -> Result<Vec<Keyword>> {
        tracing::debug!(
            "Searching for up to {}{} key words in: {}.",
            max_words,
            if weighted { " weighted" } else { "" },
            text
        );
        let raw = self.engine.get_key_words(text, max_words, weighted)?;
        tracing::debug!("Finished key word search: {}.", raw);
        Ok(format_keywords(&raw, weighted))
    }
}
