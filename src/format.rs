//! Turns the strings NLPIR returns into tokens and keywords.
//!
//! Segmentation output is a single line of space separated fields. A tagged
//! field is `surface/code`; a literal space in the input shows up as an empty
//! field (two or more separators in a row). Keyword output is `#` separated,
//! each weighted entry being `word/pos/weight`.

use serde::{Deserialize, Serialize};

use crate::pos_map::{get_pos_name, Granularity, PosMap, PosName, ICTPOS};

const FIELD_SEPARATOR: char = ' ';
const CODE_SEPARATOR: char = '/';
const KEYWORD_SEPARATOR: char = '#';

/// One segmented word and its part of speech.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The text as it appeared in the input.
    pub surface: String,
    /// The raw code emitted by the engine, if any.
    pub code: Option<String>,
    /// The display tag: a resolved name, or the raw code when names are not
    /// requested. `None` for untagged words and unrecognised codes.
    pub tag: Option<PosName>,
}

impl Token {
    pub fn untagged(surface: impl Into<String>) -> Self {
        Token {
            surface: surface.into(),
            code: None,
            tag: None,
        }
    }

    /// The tag as a display string, paths joined with `:`.
    pub fn tag_str(&self) -> Option<String> {
        self.tag.as_ref().map(|tag| tag.join(":"))
    }
}

/// A keyword reported by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub word: String,
    /// `None` unless weights were requested.
    pub weight: Option<f64>,
}

/// What to put in [`Token::tag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagNames {
    /// Keep the engine's raw code.
    Code,
    /// Resolve the code to a name at the given granularity.
    Resolved(Granularity),
}

impl Default for TagNames {
    fn default() -> Self {
        TagNames::Resolved(Granularity::Parent)
    }
}

impl TryFrom<&str> for TagNames {
    type Error = crate::NlpirError;

    /// `code` (or `raw`) keeps raw codes; anything else is parsed as a
    /// [`Granularity`].
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.to_ascii_lowercase().as_str() {
            "code" | "raw" => Ok(TagNames::Code),
            other => Granularity::try_from(other).map(TagNames::Resolved),
        }
    }
}

/// Formatting configuration for segmentation output.
///
/// Passed to every call instead of living in process-wide state, so callers
/// with different settings do not interfere.
#[derive(Debug, Clone)]
pub struct FormatOptions<'a> {
    /// Whether the engine output carries `/code` suffixes.
    pub pos_tagging: bool,
    pub names: TagNames,
    /// English names when `true`, Chinese names otherwise.
    pub english: bool,
    /// Joins `All` paths into one string. `None` keeps them as
    /// [`PosName::Path`].
    pub delimiter: Option<String>,
    pub pos_map: &'a PosMap,
}

impl Default for FormatOptions<'static> {
    fn default() -> Self {
        FormatOptions {
            pos_tagging: true,
            names: TagNames::default(),
            english: true,
            delimiter: Some(":".to_string()),
            pos_map: &ICTPOS,
        }
    }
}

impl FormatOptions<'static> {
    /// Options for output produced without part of speech tagging.
    pub fn untagged() -> Self {
        FormatOptions {
            pos_tagging: false,
            ..FormatOptions::default()
        }
    }
}

impl<'a> FormatOptions<'a> {
    pub fn with_names(mut self, names: TagNames) -> Self {
        self.names = names;
        self
    }

    pub fn with_english(mut self, english: bool) -> Self {
        self.english = english;
        self
    }

    pub fn with_delimiter(mut self, delimiter: Option<&str>) -> Self {
        self.delimiter = delimiter.map(str::to_owned);
        self
    }

    pub fn with_pos_map<'b>(self, pos_map: &'b PosMap) -> FormatOptions<'b> {
        FormatOptions {
            pos_tagging: self.pos_tagging,
            names: self.names,
            english: self.english,
            delimiter: self.delimiter,
            pos_map,
        }
    }
}

/// Splits raw segmentation output into fields.
///
/// Each run of consecutive separators beyond the first stands for a literal
/// space in the source text and becomes a single `" "` field.
pub fn split_fields(raw: &str) -> Vec<&str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Vec::new();
    }

    let mut fields = Vec::new();
    let mut in_blank_run = false;
    for field in raw.split(FIELD_SEPARATOR) {
        if field.is_empty() {
            if !in_blank_run {
                fields.push(" ");
                in_blank_run = true;
            }
        } else {
            fields.push(field);
            in_blank_run = false;
        }
    }
    fields
}

/// Formats one segmentation result into tokens, in engine order.
pub fn format_segmentation(raw: &str, options: &FormatOptions<'_>) -> Vec<Token> {
    tracing::debug!("Formatting segmented text: {}.", raw);
    let tokens: Vec<Token> = split_fields(raw)
        .into_iter()
        .map(|field| {
            if options.pos_tagging {
                tagged_token(field, options)
            } else {
                Token::untagged(field)
            }
        })
        .collect();
    tracing::debug!("Formatted segmented text into {} tokens.", tokens.len());
    tokens
}

fn tagged_token(field: &str, options: &FormatOptions<'_>) -> Token {
    // The surface may itself contain '/', e.g. "//@user/n".
    let Some((surface, code)) = field.rsplit_once(CODE_SEPARATOR) else {
        return Token::untagged(field);
    };
    if surface.is_empty() || code.is_empty() {
        tracing::warn!("Unexpected segmentation field '{}'; keeping it untagged.", field);
        return Token::untagged(field);
    }

    let tag = match options.names {
        TagNames::Code => Some(PosName::Name(code.to_owned())),
        TagNames::Resolved(granularity) => {
            get_pos_name(code, granularity, options.english, options.pos_map).map(|name| {
                match options.delimiter.as_deref() {
                    Some(delimiter) if name.as_path().is_some() => {
                        PosName::Name(name.join(delimiter))
                    }
                    _ => name,
                }
            })
        }
    };

    Token {
        surface: surface.to_owned(),
        code: Some(code.to_owned()),
        tag,
    }
}

/// Formats a `#` separated keyword result.
///
/// A weight field that is not a number (the engine emits sentinels for
/// degenerate input) becomes `0.0`.
pub fn format_keywords(raw: &str, weighted: bool) -> Vec<Keyword> {
    tracing::debug!("Formatting key word search results: {}.", raw);
    let trimmed = raw.trim().trim_matches(KEYWORD_SEPARATOR);
    if trimmed.is_empty() {
        return Vec::new();
    }

    trimmed
        .split(KEYWORD_SEPARATOR)
        .filter(|entry| !entry.trim().is_empty())
        .map(|entry| {
            if weighted {
                weighted_keyword(entry.trim())
            } else {
                Keyword {
                    word: entry.trim().to_owned(),
                    weight: None,
                }
            }
        })
        .collect()
}

fn weighted_keyword(entry: &str) -> Keyword {
    let fields: Vec<&str> = entry.split(CODE_SEPARATOR).collect();
    let weight = match fields.get(2) {
        Some(weight) => weight.trim().parse::<f64>().unwrap_or(0.0),
        None => {
            tracing::warn!("Key word entry '{}' has no weight field.", entry);
            0.0
        }
    };
    Keyword {
        word: fields[0].to_owned(),
        weight: Some(weight),
    }
}
