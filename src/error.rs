//! Error types.
//!
//! [`Error`] covers caller-visible failures (lexicon unavailable, unreadable
//! input, bad configuration). [`ChordIssue`] covers per-token problems that the
//! analysis logs and skips without aborting the page.

use thiserror::Error;

/// Crate result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Caller-visible errors with enough context to act on.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<std::path::PathBuf>,
    },

    /// The chord lexicon could not be loaded or violates its schema
    #[error("Chord lexicon unavailable: {message}")]
    Lexicon {
        /// Description of the problem.
        message: String,
        /// Lexicon file, if it came from disk.
        path: Option<std::path::PathBuf>,
    },

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },

    /// OCR input parsing error
    #[error("Parse error in {file:?}: {message}")]
    Parse {
        /// File that failed to parse, if known.
        file: Option<std::path::PathBuf>,
        /// Description of the parse failure.
        message: String,
    },

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an IO error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// Create a lexicon error, optionally tied to the file it came from
    pub fn lexicon(message: impl Into<String>, path: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Lexicon { message: message.into(), path: path.into() }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }

    /// Create a parse error with file context
    pub fn parse(message: impl Into<String>, file: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Parse { file: file.into(), message: message.into() }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io { source: e, path: None }
    }
}

/// Why a single chord could not be annotated.
///
/// None of these abort a page; the chord is left out of the result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChordIssue {
    /// The requested key is not in the lexicon
    #[error("key {0:?} is not in the chord lexicon")]
    UnrecognizedKey(String),

    /// The token does not start with a chord root
    #[error("{0:?} is not a parseable chord")]
    UnparseableChord(String),

    /// The chord is not one of the key's seven diatonic chords
    #[error("{chord:?} is not diatonic to {key}")]
    ChordNotInKey {
        /// Chord base as parsed (root, accidental, minor marker).
        chord: String,
        /// Key the chord was looked up in.
        key: String,
    },

    /// The chord sits at or left of its reference lyric start
    #[error("chord at x={chord_x:.1} is not right of lyric start x={start_x:.1}")]
    NegativeAlignment {
        /// Horizontal center of the chord token.
        chord_x: f64,
        /// Left edge of the reference lyric geometry.
        start_x: f64,
    },

    /// The reference lyric geometry has no width
    #[error("reference lyric span has zero width")]
    ZeroWidth,

    /// There is no lyric text to place the chord in
    #[error("lyric line is empty")]
    EmptyLyrics,
}
