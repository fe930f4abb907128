//! Core type definitions.
//!
//! OCR geometry, the per-page token arena, Nashville numbers and the section
//! records handed back to callers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A pixel coordinate on the scanned page.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position, growing to the right.
    pub x: f64,
    /// Vertical position, growing downwards.
    pub y: f64,
}

impl Point {
    /// Create a point from its coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

/// Quadrilateral around an OCR token: top-left, top-right, bottom-right, bottom-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox(pub [Point; 4]);

impl BoundingBox {
    /// Build an axis-aligned box from its left/top/right/bottom edges.
    #[must_use]
    pub const fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self([
            Point::new(left, top),
            Point::new(right, top),
            Point::new(right, bottom),
            Point::new(left, bottom),
        ])
    }

    /// The four corner points.
    #[must_use]
    pub const fn points(&self) -> &[Point; 4] {
        &self.0
    }

    /// Mean of the four y-coordinates.
    #[must_use]
    pub fn center_y(&self) -> f64 {
        self.0.iter().map(|p| p.y).sum::<f64>() / 4.0
    }

    /// Mean of the four x-coordinates.
    #[must_use]
    pub fn center_x(&self) -> f64 {
        self.0.iter().map(|p| p.x).sum::<f64>() / 4.0
    }

    /// Left-most x-coordinate.
    #[must_use]
    pub fn min_x(&self) -> f64 {
        self.0.iter().map(|p| p.x).fold(f64::INFINITY, f64::min)
    }

    /// Mean length of the top and bottom edges.
    #[must_use]
    pub fn avg_width(&self) -> f64 {
        let [p0, p1, p2, p3] = self.0;
        ((p1.x - p0.x).abs() + (p3.x - p2.x).abs()) / 2.0
    }
}

impl From<[[f64; 2]; 4]> for BoundingBox {
    fn from(points: [[f64; 2]; 4]) -> Self {
        Self(points.map(Point::from))
    }
}

/// One recognized text box as produced by the OCR engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrToken {
    /// Where the text sits on the page.
    pub bbox: BoundingBox,
    /// Recognized text.
    pub text: String,
    /// Engine confidence; carried along but not used by the analysis.
    pub confidence: f64,
}

impl OcrToken {
    /// Create a token.
    pub fn new(bbox: impl Into<BoundingBox>, text: impl Into<String>, confidence: f64) -> Self {
        Self { bbox: bbox.into(), text: text.into(), confidence }
    }
}

/// Stable identifier of a token within its [`OcrPage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenId(usize);

impl TokenId {
    /// Position of the token in the OCR engine's output.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Arena owning the tokens of one page (or one selected region of it).
///
/// Tokens never move once pushed, so a [`TokenId`] stays valid for the life of
/// the page no matter how the analysis filters or reorders its views.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OcrPage {
    tokens: Vec<OcrToken>,
}

impl OcrPage {
    /// Create an empty page.
    #[must_use]
    pub const fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Add a token, returning its identifier.
    pub fn push(&mut self, token: OcrToken) -> TokenId {
        self.tokens.push(token);
        TokenId(self.tokens.len() - 1)
    }

    /// Resolve an identifier.
    #[must_use]
    pub fn get(&self, id: TokenId) -> Option<&OcrToken> {
        self.tokens.get(id.0)
    }

    /// Tokens with their identifiers, in OCR output order.
    pub fn iter(&self) -> impl Iterator<Item = (TokenId, &OcrToken)> + '_ {
        self.tokens.iter().enumerate().map(|(i, t)| (TokenId(i), t))
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the page has no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl FromIterator<OcrToken> for OcrPage {
    fn from_iter<I: IntoIterator<Item = OcrToken>>(iter: I) -> Self {
        Self { tokens: iter.into_iter().collect() }
    }
}

impl From<Vec<OcrToken>> for OcrPage {
    fn from(tokens: Vec<OcrToken>) -> Self {
        Self { tokens }
    }
}

/// A scale degree in the Nashville number system.
///
/// Renders as `"N"` for the chord on degree `N` and `"-N"` for the minor chord
/// built on that slot. The sign is a quality flag, not arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct NashvilleChord {
    degree: u8,
    minor: bool,
}

impl NashvilleChord {
    /// Create a chord on `degree` (1..=7); `None` outside that range.
    #[must_use]
    pub const fn new(degree: u8, minor: bool) -> Option<Self> {
        if degree >= 1 && degree <= 7 {
            Some(Self { degree, minor })
        } else {
            None
        }
    }

    /// Scale position, 1..=7.
    #[must_use]
    pub const fn degree(self) -> u8 {
        self.degree
    }

    /// Whether the chord carries the minor sign.
    #[must_use]
    pub const fn is_minor(self) -> bool {
        self.minor
    }

    /// Signed form: positive for major, negative for minor.
    #[must_use]
    pub fn signed(self) -> i8 {
        let degree = i8::try_from(self.degree).unwrap_or(i8::MAX);
        if self.minor { -degree } else { degree }
    }
}

impl fmt::Display for NashvilleChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.signed())
    }
}

impl From<NashvilleChord> for String {
    fn from(chord: NashvilleChord) -> Self {
        chord.to_string()
    }
}

impl TryFrom<String> for NashvilleChord {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        let value: i8 = s.trim().parse().map_err(|_| format!("invalid Nashville number {s:?}"))?;
        Self::new(value.unsigned_abs(), value < 0).ok_or_else(|| format!("Nashville degree out of range: {s:?}"))
    }
}

/// One output line: lyric text plus chords keyed by character offset.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChartLine {
    /// Trimmed lyric text; empty for chord-only lines.
    pub lyrics: String,
    /// Character offset into `lyrics` → chord sitting above it.
    pub chords: BTreeMap<usize, NashvilleChord>,
}

/// Analysis result for one named part of a song.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SectionResult {
    /// Caller-supplied label such as "Verse 1", passed through unchanged.
    pub name: String,
    /// Lines in top-to-bottom order.
    pub lines: Vec<ChartLine>,
}
