//! Part of speech codes and their human-readable names.
//!
//! NLPIR tags each segmented word with a short code such as `nsf`. Codes are
//! hierarchical: every child code begins with its parent's code, so `nsf`
//! (transcribed toponym) sits below `ns` (toponym), which sits below `n`
//! (noun). [`get_pos_name`] walks that hierarchy and returns the most
//! generic name, the most specific name, or the whole path.

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{NlpirError, Result};

mod ictpos;

/// The ICTCLAS tag set NLPIR uses by default.
pub static ICTPOS: Lazy<PosMap> = Lazy::new(|| {
    let pos_map = PosMap::from_entries(ictpos::ENTRIES);
    if let Err(e) = pos_map.validate() {
        tracing::error!("Built-in POS map failed validation: {}", e);
    }
    pos_map
});

static CODE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z][a-z0-9]*$").unwrap());

/// One part of speech: its names and the more specific codes below it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PosNode {
    #[serde(rename = "zh")]
    pub name_zh: String,
    #[serde(rename = "en")]
    pub name_en: String,
    #[serde(default, skip_serializing_if = "PosMap::is_empty")]
    pub children: PosMap,
}

impl PosNode {
    pub fn new(name_zh: impl Into<String>, name_en: impl Into<String>) -> Self {
        PosNode {
            name_zh: name_zh.into(),
            name_en: name_en.into(),
            children: PosMap::new(),
        }
    }

    /// Adds a child code, builder style.
    pub fn with_child(mut self, code: impl Into<String>, child: PosNode) -> Self {
        self.children.insert(code, child);
        self
    }

    #[inline]
    pub fn name(&self, english: bool) -> &str {
        if english {
            &self.name_en
        } else {
            &self.name_zh
        }
    }
}

/// A mapping from part of speech codes to [`PosNode`]s, one level of the
/// taxonomy.
///
/// Serialized as a JSON object keyed by code:
/// `{"n": {"zh": "名词", "en": "noun", "children": {...}}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PosMap {
    nodes: BTreeMap<String, PosNode>,
}

impl PosMap {
    pub fn new() -> Self {
        PosMap::default()
    }

    pub fn insert(&mut self, code: impl Into<String>, node: PosNode) -> Option<PosNode> {
        self.nodes.insert(code.into(), node)
    }

    pub fn get(&self, code: &str) -> Option<&PosNode> {
        self.nodes.get(code)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PosNode)> {
        self.nodes.iter().map(|(code, node)| (code.as_str(), node))
    }

    /// Parses a custom taxonomy from JSON and validates it.
    pub fn from_json(json: &str) -> Result<Self> {
        let pos_map: PosMap = serde_json::from_str(json)?;
        pos_map.validate()?;
        Ok(pos_map)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks the structural rules lookups rely on.
    ///
    /// Codes are lowercase ASCII alphanumerics starting with a letter, a child
    /// code extends its parent's code, names are non-empty, and no code is a
    /// prefix of one of its siblings. The last rule matters because lookups
    /// try the shortest prefix first: a sibling `gr` would hide `grjyy`.
    pub fn validate(&self) -> Result<()> {
        self.validate_level(None)
    }

    fn validate_level(&self, parent: Option<&str>) -> Result<()> {
        for (code, node) in &self.nodes {
            if !CODE_REGEX.is_match(code) {
                return Err(NlpirError::Taxonomy(format!(
                    "code '{code}' must be lowercase ASCII letters or digits"
                )));
            }
            if let Some(parent) = parent {
                if !code.starts_with(parent) || code.len() == parent.len() {
                    return Err(NlpirError::Taxonomy(format!(
                        "child code '{code}' does not extend parent code '{parent}'"
                    )));
                }
            }
            if node.name_zh.trim().is_empty() || node.name_en.trim().is_empty() {
                return Err(NlpirError::Taxonomy(format!(
                    "code '{code}' has an empty name"
                )));
            }
            node.children.validate_level(Some(code))?;
        }

        // Keys are sorted, so a prefix always sorts directly before a code it prefixes.
        let codes: Vec<&String> = self.nodes.keys().collect();
        for pair in codes.windows(2) {
            if pair[1].starts_with(pair[0].as_str()) {
                return Err(NlpirError::Taxonomy(format!(
                    "sibling code '{}' is a prefix of '{}'",
                    pair[0], pair[1]
                )));
            }
        }
        Ok(())
    }

    fn from_entries(entries: &[ictpos::Entry]) -> Self {
        let nodes = entries
            .iter()
            .map(|entry| {
                let node = PosNode {
                    name_zh: entry.zh.to_owned(),
                    name_en: entry.en.to_owned(),
                    children: PosMap::from_entries(entry.children),
                };
                (entry.code.to_owned(), node)
            })
            .collect();
        PosMap { nodes }
    }

    /// Finds the entry whose code is the shortest prefix of `code`.
    ///
    /// Returns the matched prefix length in bytes alongside the node.
    fn match_prefix(&self, code: &str) -> Option<(usize, &PosNode)> {
        code.char_indices()
            .map(|(i, ch)| i + ch.len_utf8())
            .find_map(|end| self.nodes.get(&code[..end]).map(|node| (end, node)))
    }
}

impl FromIterator<(String, PosNode)> for PosMap {
    fn from_iter<I: IntoIterator<Item = (String, PosNode)>>(iter: I) -> Self {
        PosMap {
            nodes: iter.into_iter().collect(),
        }
    }
}

/// How much of the resolved name path to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// The most generic name only, e.g. `noun` for `nsf`.
    #[default]
    Parent,
    /// The most specific name found, e.g. `transcribed toponym` for `nsf`.
    Child,
    /// Every name from the top level down, e.g.
    /// `noun`, `toponym`, `transcribed toponym` for `nsf`.
    All,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Parent => "parent",
            Granularity::Child => "child",
            Granularity::All => "all",
        }
    }
}

impl TryFrom<&str> for Granularity {
    type Error = NlpirError;

    /// Accepts `parent`, `child` and `all` (or `most-generic`,
    /// `most-specific` and `full-path`), case-insensitively.
    fn try_from(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "parent" | "most-generic" => Ok(Granularity::Parent),
            "child" | "most-specific" => Ok(Granularity::Child),
            "all" | "full-path" => Ok(Granularity::All),
            _ => Err(NlpirError::InvalidArgument(format!(
                "names must be one of 'parent', 'child', or 'all'; not '{s}'"
            ))),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved part of speech name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PosName {
    /// A single name (`Parent` / `Child` granularity, or a joined path).
    Name(String),
    /// Names from the top level down (`All` granularity).
    Path(Vec<String>),
}

impl PosName {
    /// Flattens a path into one string, e.g. `noun:toponym` with `":"`.
    pub fn join(&self, delimiter: &str) -> String {
        match self {
            PosName::Name(name) => name.clone(),
            PosName::Path(names) => names.join(delimiter),
        }
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            PosName::Name(name) => Some(name),
            PosName::Path(_) => None,
        }
    }

    pub fn as_path(&self) -> Option<&[String]> {
        match self {
            PosName::Name(_) => None,
            PosName::Path(names) => Some(names),
        }
    }
}

impl fmt::Display for PosName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join(":"))
    }
}

/// Gets the part of speech name for `code`.
///
/// Codes are case-insensitive. At each level of `pos_map` the prefixes of
/// `code` are tried from shortest to longest and the first match wins; the
/// search descends into that entry's children while the matched prefix is
/// shorter than `code`.
///
/// Returns `None` when nothing at the top level matches. When a code matches
/// a parent but none of its children (`nx`), `Parent` still gives the parent
/// name and `All` the names found so far, while `Child` gives `None`. Engines
/// emit codes that no taxonomy lists, so neither case is an error.
///
/// ```rust
/// use nlpir_rs::pos_map::{get_pos_name, Granularity, PosName, ICTPOS};
///
/// let name = get_pos_name("nsf", Granularity::Child, true, &ICTPOS);
/// assert_eq!(name, Some(PosName::Name("transcribed toponym".to_string())));
/// assert_eq!(get_pos_name("gms", Granularity::All, true, &ICTPOS), None);
/// ```
pub fn get_pos_name(
    code: &str,
    granularity: Granularity,
    english: bool,
    pos_map: &PosMap,
) -> Option<PosName> {
    let code = code.to_lowercase();
    tracing::debug!(
        "Getting {} POS name for '{}' formatted as '{}'.",
        if english { "English" } else { "Chinese" },
        code,
        granularity
    );

    let (mut names, dead_end) = resolve_names(&code, english, pos_map);
    if names.is_empty() {
        tracing::warn!("part of speech not recognized: '{}'", code);
        return None;
    }

    let name = match granularity {
        Granularity::Parent => PosName::Name(names.swap_remove(0)),
        Granularity::Child if dead_end => {
            tracing::debug!("No child part of speech name found for '{}'.", code);
            return None;
        }
        Granularity::Child => PosName::Name(names.pop()?),
        Granularity::All => PosName::Path(names),
    };
    tracing::debug!("Part of speech name found: '{}'", name);
    Some(name)
}

/// Like [`get_pos_name`], with the granularity given by name.
///
/// Fails with [`NlpirError::InvalidArgument`] if `names` is not a
/// recognised granularity.
pub fn get_pos_name_str(
    code: &str,
    names: &str,
    english: bool,
    pos_map: &PosMap,
) -> Result<Option<PosName>> {
    let granularity = Granularity::try_from(names)?;
    Ok(get_pos_name(code, granularity, english, pos_map))
}

// Names along the matched path, top level first, and whether the walk ended
// at a level below the top where no prefix matched.
fn resolve_names(code: &str, english: bool, pos_map: &PosMap) -> (Vec<String>, bool) {
    let mut names = Vec::new();
    let mut level = pos_map;
    loop {
        let Some((matched_len, node)) = level.match_prefix(code) else {
            let dead_end = !names.is_empty();
            return (names, dead_end);
        };
        names.push(node.name(english).to_owned());
        if matched_len == code.len() || node.children.is_empty() {
            return (names, false);
        }
        tracing::debug!(
            "Found parent part of speech name '{}'. Descending to look for child name for '{}'",
            node.name_en,
            code
        );
        level = &node.children;
    }
}
