//! An [`Engine`] backed by jieba-rs, for machines without the NLPIR library.
//!
//! Output follows NLPIR's conventions so the same formatters apply. jieba's
//! tags are close to the ICTCLAS ones; the few that differ are translated.

use jieba_rs::{Jieba, KeywordExtract, TextRank, TfIdf};

use crate::engine::Engine;
use crate::error::{NlpirError, Result};

/// Which keyword ranking jieba should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeywordAlgorithm {
    #[default]
    TfIdf,
    TextRank,
}

impl TryFrom<&str> for KeywordAlgorithm {
    type Error = NlpirError;

    fn try_from(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "tfidf" | "tf-idf" => Ok(Self::TfIdf),
            "textrank" => Ok(Self::TextRank),
            _ => Err(NlpirError::InvalidArgument(format!(
                "keyword algorithm must be 'tfidf' or 'textrank'; not '{s}'"
            ))),
        }
    }
}

/// Segments with jieba and answers in NLPIR's string formats.
///
/// NLPIR marks whitespace in the input with an empty field, and the
/// formatters turn any run of empty fields into one `" "` token. Runs of
/// whitespace therefore come back as a single space: `"有  空格"` segments to
/// `有`, `" "`, `空格`.
pub struct JiebaEngine {
    jieba: Jieba,
    algorithm: KeywordAlgorithm,
    hmm: bool,
}

impl Default for JiebaEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl JiebaEngine {
    /// Loads jieba's bundled dictionary.
    pub fn new() -> Self {
        JiebaEngine {
            jieba: Jieba::new(),
            algorithm: KeywordAlgorithm::default(),
            hmm: true,
        }
    }

    pub fn with_algorithm(mut self, algorithm: KeywordAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Whether unknown words are discovered with jieba's HMM.
    pub fn with_hmm(mut self, hmm: bool) -> Self {
        self.hmm = hmm;
        self
    }

    /// Adds a word to the dictionary, returning its frequency.
    pub fn add_word(&mut self, word: &str, freq: Option<usize>, tag: Option<&str>) -> usize {
        self.jieba.add_word(word, freq, tag)
    }

    pub fn jieba(&self) -> &Jieba {
        &self.jieba
    }

    fn keywords(&self, text: &str, max_words: usize) -> Vec<jieba_rs::Keyword> {
        let text = text.replace(|c| c == '\n' || c == '\r', "");
        match self.algorithm {
            KeywordAlgorithm::TfIdf => {
                TfIdf::default().extract_keywords(&self.jieba, &text, max_words, vec![])
            }
            KeywordAlgorithm::TextRank => {
                TextRank::default().extract_keywords(&self.jieba, &text, max_words, vec![])
            }
        }
    }

    fn code_for(&self, word: &str) -> &'static str {
        self.jieba
            .tag(word, false)
            .first()
            .map(|tag| ictpos_code(tag.word, tag.tag))
            .unwrap_or("n")
    }
}

impl Engine for JiebaEngine {
    fn paragraph_process(&self, text: &str, pos_tagging: bool) -> Result<String> {
        let fields: Vec<String> = if pos_tagging {
            self.jieba
                .tag(text, self.hmm)
                .into_iter()
                .map(|tag| {
                    if tag.word.trim().is_empty() {
                        String::new()
                    } else {
                        format!("{}/{}", tag.word, ictpos_code(tag.word, tag.tag))
                    }
                })
                .collect()
        } else {
            self.jieba
                .cut(text, self.hmm)
                .into_iter()
                .map(|word| {
                    if word.trim().is_empty() {
                        String::new()
                    } else {
                        word.to_string()
                    }
                })
                .collect()
        };
        Ok(fields.join(" "))
    }

    fn get_key_words(&self, text: &str, max_words: usize, weighted: bool) -> Result<String> {
        let mut out = String::new();
        for keyword in self.keywords(text, max_words) {
            if weighted {
                let code = self.code_for(&keyword.keyword);
                out.push_str(&format!("{}/{}/{}#", keyword.keyword, code, keyword.weight));
            } else {
                out.push_str(&keyword.keyword);
                out.push('#');
            }
        }
        Ok(out)
    }
}

/// Translates a jieba tag to the nearest ICTCLAS code.
fn ictpos_code(word: &str, tag: &str) -> &'static str {
    match tag {
        "x" if word.chars().all(|c| !c.is_alphanumeric()) => "w",
        "x" | "eng" => "x",
        "uj" => "ude1",
        "ud" => "ude3",
        "uv" => "ude2",
        "ul" => "ule",
        "uz" => "uzhe",
        "ug" => "uguo",
        "zg" => "z",
        "df" | "dg" => "d",
        "yg" => "y",
        "mq" => "mq",
        "nrt" | "nrfg" => "nr",
        "i" | "l" => "nl",
        "j" => "nz",
        "g" => "n",
        _ => shared_code(tag),
    }
}

// Tags both tag sets use; anything else falls back to noun.
fn shared_code(tag: &str) -> &'static str {
    const SHARED: &[&str] = &[
        "a", "ad", "ag", "an", "b", "c", "d", "e", "f", "h", "k", "m", "n", "ng", "nr", "ns",
        "nt", "nz", "o", "p", "q", "r", "rg", "s", "t", "tg", "u", "v", "vd", "vg", "vi", "vn",
        "y", "z",
    ];
    SHARED
        .iter()
        .copied()
        .find(|shared| *shared == tag)
        .unwrap_or("n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jieba_tags_map_to_ictpos() {
        assert_eq!(ictpos_code("，", "x"), "w");
        assert_eq!(ictpos_code("abc", "eng"), "x");
        assert_eq!(ictpos_code("的", "uj"), "ude1");
        assert_eq!(ictpos_code("北京", "ns"), "ns");
        assert_eq!(ictpos_code("???", "zz"), "n");
    }

    #[test]
    fn weights_pass_through_unrounded() {
        let engine = JiebaEngine::new();
        let text = "今天纽约的天气真好啊，京华大酒店的张尧经理吃了一只北京烤鸭。";
        let expected: Vec<f64> = TfIdf::default()
            .extract_keywords(engine.jieba(), text, 3, vec![])
            .into_iter()
            .map(|keyword| keyword.weight)
            .collect();
        let raw = engine.get_key_words(text, 3, true).unwrap();
        let weights: Vec<f64> = crate::format::format_keywords(&raw, true)
            .into_iter()
            .map(|keyword| keyword.weight.unwrap())
            .collect();
        assert!(!weights.is_empty());
        assert_eq!(weights, expected);
    }

    #[test]
    fn whitespace_run_is_one_empty_field() {
        let engine = JiebaEngine::new();
        let raw = engine.paragraph_process("有  空格", false).unwrap();
        let fields = crate::format::split_fields(&raw);
        assert_eq!(fields.first(), Some(&"有"));
        assert_eq!(fields.last(), Some(&"空格"));
        assert_eq!(fields.iter().filter(|field| **field == " ").count(), 1);
    }

    #[test]
    fn algorithm_labels() {
        assert_eq!(
            KeywordAlgorithm::try_from("TextRank").unwrap(),
            KeywordAlgorithm::TextRank
        );
        assert!(KeywordAlgorithm::try_from("lda").is_err());
    }
}
