//! Chord line vs lyric line, and the geometry each kind needs for alignment.

use serde::Serialize;

use crate::chords::{is_chord, normalize, ChordLexicon};
use crate::types::{NashvilleChord, OcrPage, TokenId};

use super::cluster::Line;

/// What a clustered line holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    /// Every token is a chord symbol.
    Chords,
    /// Anything else.
    Lyrics,
}

/// A chord token reduced to its horizontal center and Nashville number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChordSlot {
    /// Source token.
    pub id: TokenId,
    /// Raw OCR text.
    pub text: String,
    /// Mean x of the bounding box.
    pub avg_x: f64,
    /// Nashville number, `None` when the chord could not be placed in the key.
    pub chord: Option<NashvilleChord>,
}

/// A lyric token reduced to its left edge, width and text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LyricSlot {
    /// Source token.
    pub id: TokenId,
    /// Left-most x of the bounding box.
    pub start_x: f64,
    /// Mean of the top and bottom edge lengths.
    pub avg_width: f64,
    /// Trimmed OCR text.
    pub text: String,
}

/// Chord tokens of a chord line, left to right.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ChordLine {
    /// Chord slots sorted by `avg_x`.
    pub chords: Vec<ChordSlot>,
}

/// Word tokens of a lyric line, left to right.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LyricLine {
    /// Word slots sorted by `start_x`; tokens with blank text are dropped.
    pub words: Vec<LyricSlot>,
}

impl LyricLine {
    /// Words joined by single spaces.
    #[must_use]
    pub fn text(&self) -> String {
        self.words.iter().map(|w| w.text.as_str()).collect::<Vec<_>>().join(" ")
    }

    /// Whether there are no words.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// A line tagged with its kind and carrying the matching geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum ClassifiedLine {
    /// Chord line.
    Chords(ChordLine),
    /// Lyric line.
    Lyrics(LyricLine),
}

impl ClassifiedLine {
    /// The tag without the data.
    #[must_use]
    pub const fn kind(&self) -> LineKind {
        match self {
            Self::Chords(_) => LineKind::Chords,
            Self::Lyrics(_) => LineKind::Lyrics,
        }
    }
}

/// A line is a chord line only if every one of its tokens is a chord.
///
/// A single lyric-looking token demotes the whole line, so annotation lines
/// such as "Capo 3 G" come out as lyrics.
pub fn line_kind(line: &Line, page: &OcrPage) -> LineKind {
    let all_chords = !line.is_empty()
        && line
            .tokens
            .iter()
            .all(|&id| page.get(id).is_some_and(|token| is_chord(&token.text)));
    if all_chords { LineKind::Chords } else { LineKind::Lyrics }
}

/// Classify a line and extract the geometry its kind needs.
pub fn classify(line: &Line, page: &OcrPage, key: &str, lexicon: &ChordLexicon) -> ClassifiedLine {
    let tokens = line.tokens.iter().filter_map(|&id| page.get(id).map(|t| (id, t)));

    match line_kind(line, page) {
        LineKind::Chords => {
            let mut chords: Vec<ChordSlot> = tokens
                .map(|(id, token)| ChordSlot {
                    id,
                    text: token.text.trim().to_string(),
                    avg_x: token.bbox.center_x(),
                    chord: normalize(&token.text, key, lexicon),
                })
                .collect();
            chords.sort_by(|a, b| a.avg_x.total_cmp(&b.avg_x));
            ClassifiedLine::Chords(ChordLine { chords })
        }
        LineKind::Lyrics => {
            let mut words: Vec<LyricSlot> = tokens
                .filter(|(_, token)| !token.text.trim().is_empty())
                .map(|(id, token)| LyricSlot {
                    id,
                    start_x: token.bbox.min_x(),
                    avg_width: token.bbox.avg_width(),
                    text: token.text.trim().to_string(),
                })
                .collect();
            words.sort_by(|a, b| a.start_x.total_cmp(&b.start_x));
            ClassifiedLine::Lyrics(LyricLine { words })
        }
    }
}
