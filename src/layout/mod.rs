//! Page layout analysis.
//!
//! Clusters OCR tokens into lines, tags each line as chords or lyrics, and
//! maps chord positions onto lyric character offsets.

/// Chord → lyric character offset
pub mod align;
/// Chord line vs lyric line
pub mod classify;
/// Token → line clustering
pub mod cluster;

pub use align::{align, chord_offset, AlignmentStrategy};
pub use classify::{classify, line_kind, ChordLine, ChordSlot, ClassifiedLine, LineKind, LyricLine, LyricSlot};
pub use cluster::{cluster, cluster_page, Line};
