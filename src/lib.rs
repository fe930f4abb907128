//! `leadsheet` - chord chart extraction from OCR output.
//!
//! Turns the text boxes an OCR engine finds on a scanned lead sheet into
//! lyric lines with chords placed at character offsets, numbered in the
//! Nashville system relative to the song key.

pub mod analysis;
pub mod chart;
pub mod chords;
pub mod config;
pub mod constants;
pub mod error;
pub mod layout;
pub mod ocr;
pub mod types;

pub use analysis::{analyze_section, analyze_sections, AnalysisOptions, SectionRequest};
pub use chart::{ChartHeader, SongChart};
pub use chords::ChordLexicon;
pub use error::{ChordIssue, Error, Result};
pub use types::{BoundingBox, ChartLine, NashvilleChord, OcrPage, OcrToken, Point, SectionResult, TokenId};
