//! Song-level chart document.
//!
//! Collects the analyzed sections of one song under a header and serializes
//! them as `{"header": {...}, "data": {"<section>": [lines...]}}`, keeping the
//! order in which sections were added.

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

use crate::error::Result;
use crate::types::SectionResult;

/// Song metadata written ahead of the sections.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChartHeader {
    /// Song title; serialized as "Untitled" when unset.
    pub name: Option<String>,
    /// Song key; serialized as "Unknown" when unset.
    pub key: Option<String>,
    /// Song authors.
    pub authors: Vec<String>,
}

impl Serialize for ChartHeader {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ChartHeader", 3)?;
        state.serialize_field("name", self.name.as_deref().unwrap_or("Untitled"))?;
        state.serialize_field("key", self.key.as_deref().unwrap_or("Unknown"))?;
        state.serialize_field("authors", &self.authors)?;
        state.end()
    }
}

/// A song: header plus named sections in page order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SongChart {
    /// Song metadata.
    pub header: ChartHeader,
    sections: Vec<SectionResult>,
}

impl SongChart {
    /// Create an empty chart.
    #[must_use]
    pub fn new(header: ChartHeader) -> Self {
        Self { header, sections: Vec::new() }
    }

    /// Add a section. A section with the same name is replaced in place.
    pub fn push_section(&mut self, section: SectionResult) {
        if let Some(existing) = self.sections.iter_mut().find(|s| s.name == section.name) {
            tracing::debug!("Replacing section {:?}", section.name);
            *existing = section;
        } else {
            self.sections.push(section);
        }
    }

    /// Sections in insertion order.
    #[must_use]
    pub fn sections(&self) -> &[SectionResult] {
        &self.sections
    }

    /// Pretty-printed JSON document.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Extend<SectionResult> for SongChart {
    fn extend<I: IntoIterator<Item = SectionResult>>(&mut self, iter: I) {
        for section in iter {
            self.push_section(section);
        }
    }
}

/// Section name → lines, in insertion order.
struct SectionData<'a>(&'a [SectionResult]);

impl Serialize for SectionData<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for section in self.0 {
            map.serialize_entry(&section.name, &section.lines)?;
        }
        map.end()
    }
}

impl Serialize for SongChart {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SongChart", 2)?;
        state.serialize_field("header", &self.header)?;
        state.serialize_field("data", &SectionData(&self.sections))?;
        state.end()
    }
}
