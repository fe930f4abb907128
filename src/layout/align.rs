//! Placing chords onto character offsets of the lyric line beneath them.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChordIssue, Error};
use crate::types::NashvilleChord;

use super::classify::{ChordLine, LyricLine};

/// Which lyric geometry a chord's position is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlignmentStrategy {
    /// All words of the line merged into one span covering the whole text.
    #[default]
    LineSpan,
    /// The word whose left edge is closest to the left of the chord.
    NearestToken,
}

impl AlignmentStrategy {
    /// Short name used in configuration.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::LineSpan => "line",
            Self::NearestToken => "nearest",
        }
    }
}

impl fmt::Display for AlignmentStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AlignmentStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "line" | "line-span" | "span" => Ok(Self::LineSpan),
            "nearest" | "nearest-token" | "token" => Ok(Self::NearestToken),
            other => Err(Error::config(
                format!("unknown alignment strategy {other:?}"),
                "Use \"line\" or \"nearest\"",
            )),
        }
    }
}

/// Character offset of a chord within a reference span of lyric text.
///
/// `offset = floor((chord_x - start_x) / avg_width * length)`, clamped to
/// the last character. Fails when the chord is not right of `start_x`, the
/// span has no width or there is no text.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn chord_offset(chord_x: f64, start_x: f64, avg_width: f64, length: usize) -> Result<usize, ChordIssue> {
    let relative_x = chord_x - start_x;
    if relative_x.is_nan() || relative_x <= 0.0 {
        return Err(ChordIssue::NegativeAlignment { chord_x, start_x });
    }
    if avg_width.is_nan() || avg_width <= 0.0 {
        return Err(ChordIssue::ZeroWidth);
    }
    if length == 0 {
        return Err(ChordIssue::EmptyLyrics);
    }

    let offset = ((relative_x / avg_width) * length as f64).floor() as usize;
    Ok(offset.min(length - 1))
}

/// Map every normalized chord of `chords` onto a character offset of `lyrics`.
///
/// Chords are placed left to right; two chords landing on the same offset
/// keep the right-most one. Chords without a Nashville number and chords that
/// cannot be aligned are left out and logged.
pub fn align(chords: &ChordLine, lyrics: &LyricLine, strategy: AlignmentStrategy) -> BTreeMap<usize, NashvilleChord> {
    let mut placed = BTreeMap::new();

    for slot in &chords.chords {
        let Some(chord) = slot.chord else {
            tracing::debug!("Skipping chord {:?} ({}): no Nashville number", slot.text, slot.id);
            continue;
        };

        let offset = match strategy {
            AlignmentStrategy::LineSpan => line_span_offset(slot.avg_x, lyrics),
            AlignmentStrategy::NearestToken => nearest_token_offset(slot.avg_x, lyrics),
        };

        match offset {
            Ok(offset) => {
                placed.insert(offset, chord);
            }
            Err(issue) => tracing::warn!("Chord {:?} ({}) not aligned: {issue}", slot.text, slot.id),
        }
    }

    placed
}

fn line_span_offset(chord_x: f64, lyrics: &LyricLine) -> Result<usize, ChordIssue> {
    if lyrics.is_empty() {
        return Err(ChordIssue::EmptyLyrics);
    }
    let start_x = lyrics.words.iter().map(|w| w.start_x).fold(f64::INFINITY, f64::min);
    let end_x = lyrics
        .words
        .iter()
        .map(|w| w.start_x + w.avg_width)
        .fold(f64::NEG_INFINITY, f64::max);
    chord_offset(chord_x, start_x, end_x - start_x, lyrics.text().chars().count())
}

fn nearest_token_offset(chord_x: f64, lyrics: &LyricLine) -> Result<usize, ChordIssue> {
    let mut char_start = 0;
    let mut nearest = None;
    for word in &lyrics.words {
        if word.start_x >= chord_x {
            break;
        }
        nearest = Some((char_start, word));
        char_start += word.text.chars().count() + 1;
    }

    match nearest {
        Some((char_start, word)) => {
            chord_offset(chord_x, word.start_x, word.avg_width, word.text.chars().count()).map(|o| char_start + o)
        }
        None => match lyrics.words.first() {
            Some(first) => Err(ChordIssue::NegativeAlignment { chord_x, start_x: first.start_x }),
            None => Err(ChordIssue::EmptyLyrics),
        },
    }
}
