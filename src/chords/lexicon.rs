//! Key → diatonic chord table.
//!
//! The lexicon maps a key name to the chords on its seven scale degrees. It is
//! parsed once into an immutable structure and passed by reference to every
//! normalization, so concurrent analyses share it without locking.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::LazyLock;

use crate::constants::chords::DEGREES_PER_KEY;
use crate::error::{Error, Result};

use super::normalize::parse_chord;

/// Lexicon compiled into the crate: the 12 major keys and their relative minors.
const BUNDLED_JSON: &str = include_str!("../../assets/nashville_system.json");

#[allow(clippy::expect_used)]
static BUNDLED: LazyLock<ChordLexicon> = LazyLock::new(|| {
    ChordLexicon::from_json_str(BUNDLED_JSON).expect("valid bundled lexicon: nashville_system.json")
});

/// Chords of one key, indexed by scale degree minus one.
pub type KeyChords = [String; DEGREES_PER_KEY];

/// Immutable key → scale-degree chord table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordLexicon {
    keys: HashMap<String, KeyChords>,
}

impl ChordLexicon {
    /// The lexicon shipped with the crate, parsed on first use.
    pub fn bundled() -> &'static Self {
        &BUNDLED
    }

    /// Parse a lexicon from JSON text of the form
    /// `{ "<key>": { "1": "<chord>", ..., "7": "<chord>" } }`.
    ///
    /// Every key must define degrees 1 through 7 exactly once, and every
    /// chord name must start with a note root.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_json_inner(json, None)
    }

    /// Load a lexicon file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs_err::read_to_string(path).map_err(|e| Error::io(e, path.to_path_buf()))?;
        let lexicon = Self::from_json_inner(&json, Some(path))?;
        tracing::info!("Loaded chord lexicon with {} keys from {}", lexicon.len(), path.display());
        Ok(lexicon)
    }

    fn from_json_inner(json: &str, path: Option<&Path>) -> Result<Self> {
        let origin = path.map(Path::to_path_buf);
        let raw: HashMap<String, BTreeMap<String, String>> = serde_json::from_str(json)
            .map_err(|e| Error::lexicon(format!("invalid JSON: {e}"), origin.clone()))?;

        let mut keys = HashMap::with_capacity(raw.len());
        for (key, degrees) in raw {
            let chords = key_chords(&key, &degrees)
                .map_err(|message| Error::lexicon(message, origin.clone()))?;
            keys.insert(key, chords);
        }

        Ok(Self { keys })
    }

    /// Chords of `key` in degree order 1..=7, if the key is known.
    #[must_use]
    pub fn chords_for(&self, key: &str) -> Option<&KeyChords> {
        self.keys.get(key)
    }

    /// Whether `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.keys.contains_key(key)
    }

    /// All key names, sorted.
    #[must_use]
    pub fn key_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.keys.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the lexicon has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Validate one key's degree table and order it by degree.
fn key_chords(key: &str, degrees: &BTreeMap<String, String>) -> std::result::Result<KeyChords, String> {
    if degrees.len() != DEGREES_PER_KEY {
        return Err(format!(
            "key {key:?} has {} entries, expected {DEGREES_PER_KEY}",
            degrees.len()
        ));
    }

    let mut chords: [Option<String>; DEGREES_PER_KEY] = Default::default();
    for (degree, chord) in degrees {
        let slot = degree
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|d| (1..=DEGREES_PER_KEY).contains(d))
            .ok_or_else(|| format!("key {key:?} has invalid degree {degree:?}"))?;
        if parse_chord(chord).is_none() {
            return Err(format!("key {key:?} degree {slot} has invalid chord {chord:?}"));
        }
        if chords[slot - 1].replace(chord.clone()).is_some() {
            return Err(format!("key {key:?} defines degree {slot} twice"));
        }
    }

    // Seven distinct slots out of seven: every degree is filled.
    Ok(chords.map(Option::unwrap_or_default))
}
