//! Chord symbol vs lyric word.

use crate::constants::chords::{MAX_CHORD_LEN, NOTE_LETTERS, QUALITY_MARKERS};

/// Whether an OCR token looks like a chord symbol.
///
/// One-letter tokens must be a note letter (`H` counts as the regional name
/// for B). Two to four characters need a quality or accidental marker such as
/// `m`, `7`, `sus` or `#`. Anything longer is a lyric word.
///
/// A lone lyric "A" passes this test; lines mixing such words with real lyrics
/// are filtered by the line classifier. Surrounding whitespace is ignored.
pub fn is_chord(text: &str) -> bool {
    let text = text.trim();
    let len = text.chars().count();
    match len {
        1 => text
            .chars()
            .flat_map(char::to_uppercase)
            .all(|c| NOTE_LETTERS.contains(&c)),
        2..=MAX_CHORD_LEN => QUALITY_MARKERS.iter().any(|marker| text.contains(marker)),
        _ => false,
    }
}
