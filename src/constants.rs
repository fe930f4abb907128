//! Analysis constants.
//!
//! Centralizes thresholds and marker tables used across the pipeline.

/// Line clustering constants.
pub mod layout {
    /// Default vertical distance (pixels) at which a token starts a new line.
    pub const DEFAULT_Y_THRESHOLD: f64 = 10.0;
}

/// Chord recognition constants.
pub mod chords {
    /// Natural note letters accepted as one-letter chords, plus the regional `H`.
    pub const NOTE_LETTERS: &[char] = &['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H'];

    /// Longest token (in characters) that can still be a chord symbol.
    pub const MAX_CHORD_LEN: usize = 4;

    /// Quality and accidental markers; a 2-4 character token needs one of these.
    pub const QUALITY_MARKERS: &[&str] = &[
        "6", "7", "9", "m", "M", "maj", "dim", "aug", "sus", "add", "°", "ø", "b", "#", "/",
    ];

    /// OCR noise characters stripped before normalization.
    pub const NOISE_CHARS: &[char] = &['?', '_'];

    /// Number of diatonic degrees every lexicon key must define.
    pub const DEGREES_PER_KEY: usize = 7;
}

/// Section header words that label a part instead of belonging to it.
pub const SECTION_MARKERS: &[&str] = &[
    "VERSE",
    "CHORUS",
    "PRE-CHORUS",
    "BRIDGE",
    "INTRO",
    "OUTRO",
    "TAG",
    "INTERLUDE",
];

/// Environment variable names read by [`crate::config::Config::load`].
pub mod env {
    /// Clustering threshold in pixels.
    pub const Y_THRESHOLD: &str = "LEADSHEET_Y_THRESHOLD";
    /// Alignment strategy (`line` or `nearest`).
    pub const ALIGNMENT: &str = "LEADSHEET_ALIGNMENT";
    /// Path to a lexicon JSON overriding the bundled one.
    pub const LEXICON: &str = "LEADSHEET_LEXICON";
    /// Set to `0`/`false` to keep section marker tokens.
    pub const SKIP_MARKERS: &str = "LEADSHEET_SKIP_MARKERS";
}
