//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use std::borrow::Cow;
use std::env;
use std::path::PathBuf;

use dotenv::dotenv;

use crate::analysis::AnalysisOptions;
use crate::chords::ChordLexicon;
use crate::constants::{env as vars, layout::DEFAULT_Y_THRESHOLD};
use crate::error::{Error, Result};
use crate::layout::AlignmentStrategy;

/// Configuration for the analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// The application name
    app_name: String,
    /// The application version
    app_version: String,
    /// Line clustering threshold in pixels
    pub y_threshold: f64,
    /// Chord placement strategy
    pub alignment: AlignmentStrategy,
    /// Lexicon file replacing the bundled one
    pub lexicon_path: Option<PathBuf>,
    /// Drop `VERSE`/`CHORUS` style header tokens
    pub skip_section_markers: bool,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            y_threshold: DEFAULT_Y_THRESHOLD,
            alignment: AlignmentStrategy::default(),
            lexicon_path: None,
            skip_section_markers: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(value) = lookup(vars::Y_THRESHOLD) {
            config.y_threshold = parse_threshold(&value)?;
        }

        if let Some(value) = lookup(vars::ALIGNMENT) {
            config.alignment = value.parse()?;
        }

        if let Some(path) = lookup(vars::LEXICON).filter(|p| !p.trim().is_empty()) {
            config.lexicon_path = Some(PathBuf::from(shellexpand::tilde(path.trim()).to_string()));
        }

        if let Some(value) = lookup(vars::SKIP_MARKERS) {
            config.skip_section_markers = parse_flag(&value)?;
        }

        Ok(config)
    }

    /// Analysis options derived from this configuration.
    #[must_use]
    pub const fn analysis_options(&self) -> AnalysisOptions {
        AnalysisOptions {
            y_threshold: self.y_threshold,
            alignment: self.alignment,
            skip_section_markers: self.skip_section_markers,
        }
    }

    /// The configured lexicon file, or the bundled lexicon when none is set.
    pub fn lexicon(&self) -> Result<Cow<'static, ChordLexicon>> {
        match &self.lexicon_path {
            Some(path) => ChordLexicon::load(path).map(Cow::Owned),
            None => Ok(Cow::Borrowed(ChordLexicon::bundled())),
        }
    }
}

/// Parse a clustering threshold; must be a positive, finite pixel distance.
pub fn parse_threshold(value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|t| t.is_finite() && *t > 0.0)
        .ok_or_else(|| {
            Error::config(
                format!("{}={value:?} is not a valid threshold", vars::Y_THRESHOLD),
                "Use a positive number of pixels, e.g. 10",
            )
        })
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::config(
            format!("{}={value:?} is not a boolean", vars::SKIP_MARKERS),
            "Use 1/0 or true/false",
        )),
    }
}
