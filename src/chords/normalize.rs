//! Chord symbol → Nashville number.

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::chords::NOISE_CHARS;
use crate::error::ChordIssue;
use crate::types::NashvilleChord;

use super::lexicon::ChordLexicon;

/// Root letter (or the regional `H`), optional accidental, then everything else.
#[allow(clippy::expect_used)]
static RE_CHORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-GH])([#b]?)(.*)$").expect("valid regex: RE_CHORD")
});

/// Diminished markers; they count as minor quality and stay in the extension.
const DIMINISHED_PREFIXES: &[&str] = &["dim", "°", "ø"];

/// A chord symbol split into the parts that decide its degree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedChord {
    /// Root letter plus accidental, e.g. `F#`.
    pub root: String,
    /// Minor (or diminished) quality.
    pub minor: bool,
    /// Everything after the quality marker, e.g. `7`, `maj7`, `sus4`, `/B`.
    pub extension: String,
}

impl ParsedChord {
    /// Root with its minor marker, e.g. `F#m`.
    #[must_use]
    pub fn base(&self) -> String {
        if self.minor {
            format!("{}m", self.root)
        } else {
            self.root.clone()
        }
    }
}

/// Split a chord symbol into root, quality and extension.
///
/// Returns `None` when the text does not start with a note root.
pub fn parse_chord(text: &str) -> Option<ParsedChord> {
    let caps = RE_CHORD.captures(text)?;
    let letter = match caps.get(1)?.as_str() {
        "H" => "B",
        other => other,
    };
    let root = format!("{letter}{}", caps.get(2).map_or("", |m| m.as_str()));
    let rest = caps.get(3).map_or("", |m| m.as_str());

    let (minor, extension) = if rest.starts_with("maj") {
        (false, rest)
    } else if let Some(ext) = rest.strip_prefix('m') {
        (true, ext)
    } else {
        (DIMINISHED_PREFIXES.iter().any(|p| rest.starts_with(p)), rest)
    };

    Some(ParsedChord { root, minor, extension: extension.to_string() })
}

/// Nashville number of `token` in `key`, explaining any failure.
///
/// Scans the key's degrees 1..=7 and returns the first match: a minor chord
/// whose root equals a degree's root gets that degree with the minor sign;
/// a major chord equal to a degree's chord gets that degree. Extensions such
/// as `7` or `sus4` never affect the result.
pub fn try_normalize(token: &str, key: &str, lexicon: &ChordLexicon) -> Result<NashvilleChord, ChordIssue> {
    let cleaned: String = token.trim().chars().filter(|c| !NOISE_CHARS.contains(c)).collect();
    let parsed = parse_chord(&cleaned).ok_or_else(|| ChordIssue::UnparseableChord(cleaned.clone()))?;
    let chords = lexicon
        .chords_for(key)
        .ok_or_else(|| ChordIssue::UnrecognizedKey(key.to_string()))?;

    let base = parsed.base();
    for (slot, name) in chords.iter().enumerate() {
        let degree = u8::try_from(slot + 1).unwrap_or(u8::MAX);
        let matches = if parsed.minor {
            parse_chord(name).is_some_and(|scale| scale.root == parsed.root)
        } else {
            *name == base
        };
        if matches {
            if let Some(chord) = NashvilleChord::new(degree, parsed.minor) {
                return Ok(chord);
            }
        }
    }

    Err(ChordIssue::ChordNotInKey { chord: base, key: key.to_string() })
}

/// Nashville number of `token` in `key`, or `None` if it cannot be placed.
pub fn normalize(token: &str, key: &str, lexicon: &ChordLexicon) -> Option<NashvilleChord> {
    try_normalize(token, key, lexicon)
        .inspect_err(|issue| tracing::debug!("Chord {token:?} not normalized: {issue}"))
        .ok()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn nash(token: &str, key: &str) -> Option<String> {
        normalize(token, key, ChordLexicon::bundled()).map(|c| c.to_string())
    }

    #[test]
    fn diatonic_chords_in_c() {
        assert_eq!(nash("C", "C").as_deref(), Some("1"));
        assert_eq!(nash("Am", "C").as_deref(), Some("-6"));
        assert_eq!(nash("Dm", "C").as_deref(), Some("-2"));
        assert_eq!(nash("F", "C").as_deref(), Some("4"));
    }

    #[test]
    fn extensions_are_ignored() {
        assert_eq!(nash("G7", "C").as_deref(), Some("5"));
        assert_eq!(nash("Gsus4", "C").as_deref(), Some("5"));
        assert_eq!(nash("G/B", "C").as_deref(), Some("5"));
        assert_eq!(nash("Am7", "C").as_deref(), Some("-6"));
    }

    #[test]
    fn maj_is_not_a_minor_marker() {
        assert_eq!(nash("Cmaj7", "C").as_deref(), Some("1"));
        assert_eq!(nash("Fmaj", "C").as_deref(), Some("4"));
    }

    #[test]
    fn minor_on_a_major_degree_gets_minor_sign() {
        assert_eq!(nash("Cm", "C").as_deref(), Some("-1"));
        assert_eq!(nash("Bdim", "C").as_deref(), Some("-7"));
        assert_eq!(nash("Bm", "C").as_deref(), Some("-7"));
        assert_eq!(nash("F#dim", "G").as_deref(), Some("-7"));
        assert_eq!(nash("F#°", "G").as_deref(), Some("-7"));
        assert_eq!(nash("B", "C"), None);
    }

    #[test]
    fn minor_root_must_match_exactly() {
        // C#m is degree 3 in A; Cm must not match it by prefix.
        assert_eq!(nash("C#m", "A").as_deref(), Some("-3"));
        assert_eq!(nash("Cm", "A"), None);
    }

    #[test]
    fn chromatic_chords_are_not_in_key() {
        assert_eq!(nash("F#", "C"), None);
        assert_eq!(nash("D", "C"), None);
        assert_eq!(
            try_normalize("F#", "C", ChordLexicon::bundled()),
            Err(ChordIssue::ChordNotInKey { chord: "F#".into(), key: "C".into() })
        );
    }

    #[test]
    fn flat_keys() {
        assert_eq!(nash("Bb", "F").as_deref(), Some("4"));
        assert_eq!(nash("Ebm", "Db").as_deref(), Some("-2"));
    }

    #[test]
    fn regional_h_is_b() {
        assert_eq!(nash("H7", "E").as_deref(), Some("5"));
        assert_eq!(nash("Hm", "G").as_deref(), Some("-3"));
    }

    #[test]
    fn noise_characters_are_stripped() {
        assert_eq!(nash("G?", "G").as_deref(), Some("1"));
        assert_eq!(nash("_Em", "G").as_deref(), Some("-6"));
        assert_eq!(nash(" D ", "G").as_deref(), Some("5"));
    }

    #[test]
    fn unknown_key_fails_every_chord() {
        assert_eq!(
            try_normalize("C", "X", ChordLexicon::bundled()),
            Err(ChordIssue::UnrecognizedKey("X".into()))
        );
    }

    #[test]
    fn unparseable_tokens() {
        assert_eq!(
            try_normalize("xyz", "C", ChordLexicon::bundled()),
            Err(ChordIssue::UnparseableChord("xyz".into()))
        );
        assert_eq!(nash("a", "C"), None);
    }

    #[test]
    fn normalization_is_idempotent() {
        let lexicon = ChordLexicon::bundled();
        for token in ["Em7", "C", "F#", "Bdim"] {
            assert_eq!(normalize(token, "G", lexicon), normalize(token, "G", lexicon));
        }
    }

    #[test]
    fn parse_splits_extension() {
        let parsed = parse_chord("F#m7").unwrap();
        assert_eq!(parsed.root, "F#");
        assert!(parsed.minor);
        assert_eq!(parsed.extension, "7");
        assert_eq!(parsed.base(), "F#m");
    }
}
