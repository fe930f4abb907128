//! Section analysis pipeline.
//!
//! Turns the OCR tokens of one selected region into a [`SectionResult`]:
//! cluster into lines, classify each line, normalize chord lines and attach
//! each chord line to the lyric line directly below it.
//!
//! Every call is a pure function of its inputs. The only shared state is the
//! read-only [`ChordLexicon`], so [`analyze_sections`] runs regions in parallel.

use std::sync::LazyLock;

use rayon::prelude::*;
use regex::Regex;

use crate::chords::ChordLexicon;
use crate::constants::{layout::DEFAULT_Y_THRESHOLD, SECTION_MARKERS};
use crate::layout::{align, classify, cluster, AlignmentStrategy, ChordLine, ClassifiedLine, Line};
use crate::types::{ChartLine, OcrPage, SectionResult};

/// Section header words, optionally numbered ("VERSE 2") or followed by a colon.
#[allow(clippy::expect_used)]
static RE_SECTION_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    let alternatives = SECTION_MARKERS.iter().map(|m| regex::escape(m)).collect::<Vec<_>>().join("|");
    Regex::new(&format!(r"^(?:{alternatives})(?:\s*\d+)?:?$")).expect("valid regex: RE_SECTION_MARKER")
});

/// Tunables for one analysis run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisOptions {
    /// Vertical distance (pixels) at which a token starts a new line.
    pub y_threshold: f64,
    /// Reference geometry for chord placement.
    pub alignment: AlignmentStrategy,
    /// Drop section header tokens such as `VERSE` or `CHORUS` before clustering.
    pub skip_section_markers: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            y_threshold: DEFAULT_Y_THRESHOLD,
            alignment: AlignmentStrategy::default(),
            skip_section_markers: true,
        }
    }
}

/// One region to analyze: its tokens, the song key and the part's label.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionRequest {
    /// Label passed through to the result, e.g. "Verse 1".
    pub name: String,
    /// Key name as found in the lexicon, e.g. "G" or "F#m".
    pub key: String,
    /// OCR tokens of the region.
    pub page: OcrPage,
}

impl SectionRequest {
    /// Create a request.
    pub fn new(name: impl Into<String>, key: impl Into<String>, page: OcrPage) -> Self {
        Self { name: name.into(), key: key.into(), page }
    }
}

/// Whether a token is a section header rather than song content.
///
/// Case-insensitive, so sheets printing "Verse" or "Chorus 2" match too.
pub fn is_section_marker(text: &str) -> bool {
    RE_SECTION_MARKER.is_match(&text.trim().to_uppercase())
}

/// Cluster a region into lines, leaving out section headers when `options` ask for it.
pub fn section_lines(page: &OcrPage, options: &AnalysisOptions) -> Vec<Line> {
    let tokens = page
        .iter()
        .filter(|(_, token)| !(options.skip_section_markers && is_section_marker(&token.text)));
    cluster(tokens, options.y_threshold)
}

/// Analyze one region.
///
/// Never fails: chords that cannot be normalized or aligned are left out and
/// logged, so the result is always a best-effort chart of the region.
pub fn analyze_section(
    page: &OcrPage,
    key: &str,
    name: &str,
    lexicon: &ChordLexicon,
    options: &AnalysisOptions,
) -> SectionResult {
    if !lexicon.contains_key(key) {
        tracing::warn!("Key {key:?} is not in the chord lexicon; chords in {name:?} will not be numbered");
    }

    let lines = section_lines(page, options);
    tracing::debug!("Section {name:?}: {} tokens in {} lines", page.len(), lines.len());

    let mut result = SectionResult { name: name.to_string(), lines: Vec::with_capacity(lines.len()) };
    let mut pending: Option<ChordLine> = None;

    for line in &lines {
        match classify(line, page, key, lexicon) {
            ClassifiedLine::Chords(chords) => {
                if let Some(unattached) = pending.replace(chords) {
                    drop_unattached(&unattached, name);
                }
            }
            ClassifiedLine::Lyrics(lyrics) if lyrics.is_empty() => {}
            ClassifiedLine::Lyrics(lyrics) => {
                let chords = pending
                    .take()
                    .map(|chords| align(&chords, &lyrics, options.alignment))
                    .unwrap_or_default();
                result.lines.push(ChartLine { lyrics: lyrics.text(), chords });
            }
        }
    }

    if let Some(unattached) = pending {
        drop_unattached(&unattached, name);
    }

    result
}

/// Analyze many independent regions in parallel, preserving request order.
pub fn analyze_sections(
    requests: &[SectionRequest],
    lexicon: &ChordLexicon,
    options: &AnalysisOptions,
) -> Vec<SectionResult> {
    requests
        .par_iter()
        .map(|req| analyze_section(&req.page, &req.key, &req.name, lexicon, options))
        .collect()
}

/// A chord line with no lyric line under it has no text to carry offsets into.
fn drop_unattached(chords: &ChordLine, name: &str) {
    let symbols: Vec<&str> = chords.chords.iter().map(|slot| slot.text.as_str()).collect();
    tracing::warn!("Section {name:?}: chords {symbols:?} have no lyric line below and were dropped");
}
