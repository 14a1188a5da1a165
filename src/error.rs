use std::path::PathBuf;

/// Result type used throughout the crate, with [`NlpirError`] as the default error.
pub type Result<T, E = NlpirError> = std::result::Result<T, E>;

/// Errors raised by the binding and its formatting layer.
///
/// Unrecognised part-of-speech codes and malformed engine output are not
/// errors; they resolve to `None` or degrade to a best-effort result.
#[derive(Debug, thiserror::Error)]
pub enum NlpirError {
    /// A caller supplied an argument outside its accepted set
    /// (granularity, encoding label, POS tag set name, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A part-of-speech taxonomy failed validation.
    #[error("invalid part of speech map: {0}")]
    Taxonomy(String),

    /// The NLPIR dynamic library or one of its symbols could not be loaded.
    #[error("failed to load NLPIR library '{path}': {message}")]
    LibraryLoad { path: PathBuf, message: String },

    /// No NLPIR build exists for the current platform.
    #[error("platform '{0}' is not supported by NLPIR")]
    UnsupportedPlatform(String),

    /// The engine keeps one global session per process.
    #[error("an NLPIR session is already open in this process")]
    AlreadyOpen,

    /// `NLPIR_Init` returned failure.
    #[error("NLPIR function 'NLPIR_Init' failed: {0}")]
    Init(String),

    /// The engine reported a missing or expired license.
    #[error("{0}")]
    License(String),

    /// Text could not be converted to or from the engine encoding.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// The engine call itself failed (null result, interior NUL, ...).
    #[error("engine error: {0}")]
    Engine(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
