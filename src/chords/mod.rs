//! Chord symbol recognition and Nashville numbering.
//!
//! Provides the key → degree lexicon, the chord-vs-lyric token test and the
//! chord → scale-degree normalizer used by the line classifier.

/// Chord symbol vs lyric word
pub mod classify;
/// Key → diatonic chord table
pub mod lexicon;
/// Chord symbol → Nashville number
pub mod normalize;

pub use classify::is_chord;
pub use lexicon::ChordLexicon;
pub use normalize::{normalize, parse_chord, try_normalize, ParsedChord};
