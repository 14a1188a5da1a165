//! Chinese word segmentation and keyword extraction on top of NLPIR/ICTCLAS.
//!
//! NLPIR answers in compact strings such as `"美国/nsf 人/n"`. This crate
//! turns them into [`Token`]s and [`Keyword`]s and resolves part of speech
//! codes to names through a hierarchical taxonomy ([`ICTPOS`] by default).
//!
//! ```no_run
//! use nlpir_rs::native::{NlpirLibrary, NlpirOptions};
//! use nlpir_rs::{FormatOptions, Nlpir};
//!
//! let library = NlpirLibrary::open(&NlpirOptions::from_env())?;
//! let nlpir = Nlpir::new(library);
//! for token in nlpir.segment("我们都是美国人。", &FormatOptions::default())? {
//!     println!("{} {:?}", token.surface, token.tag_str());
//! }
//! # Ok::<(), nlpir_rs::NlpirError>(())
//! ```
//!
//! With the default `jieba` feature, [`JiebaEngine`] stands in for the native
//! library.

pub mod engine;
pub mod error;
pub mod format;
#[cfg(feature = "jieba")]
pub mod jieba_engine;
pub mod license;
pub mod native;
pub mod pos_map;

pub use crate::engine::{Engine, Nlpir};
pub use crate::error::{NlpirError, Result};
pub use crate::format::{
    format_keywords, format_segmentation, FormatOptions, Keyword, TagNames, Token,
};
#[cfg(feature = "jieba")]
pub use crate::jieba_engine::{JiebaEngine, KeywordAlgorithm};
pub use crate::pos_map::{
    get_pos_name, get_pos_name_str, Granularity, PosMap, PosName, PosNode, ICTPOS,
};
