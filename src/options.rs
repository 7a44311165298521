//! Page layout options module
//!
//! Provides the closed unit/format enumerations and the page-layout
//! configuration that is serialized across the renderer process boundary.
//!
//! # Features
//!
//! - Closed sets of CSS length units and paper-size names
//! - Strongly-typed [`PageOptions`] serialized to the renderer's JSON shape
//! - Atomic [`Margins`] with `"<number><unit>"` tokens
//!
//! # Example
//!
//! ```rust
//! use playwright_pdf::{Margins, PageOptions, PaperFormat, Unit};
//!
//! let mut options = PageOptions::default();
//! options.set_format(PaperFormat::A4);
//! options.set_width(210.0, Unit::Millimeter);
//!
//! let margins = Margins::uniform(10.0, Unit::Millimeter);
//! assert_eq!(margins.top, "10mm");
//! ```

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Options error types
#[derive(Debug, Error, PartialEq)]
pub enum OptionsError {
    #[error("Invalid unit [{0}]. Expected one of: [{list}]", list = expected_units())]
    InvalidUnit(String),

    #[error("Invalid format [{0}]. Expected one of: [{list}]", list = expected_formats())]
    InvalidFormat(String),

    #[error("Scale must be a positive number between 0.1 and 2.")]
    ScaleOutOfRange(f64),

    #[error("Page ranges cannot be empty.")]
    EmptyPageRanges,
}

pub type Result<T> = std::result::Result<T, OptionsError>;

fn expected_units() -> String {
    Unit::ALL.map(Unit::as_str).join(", ")
}

fn expected_formats() -> String {
    PaperFormat::ALL.map(PaperFormat::name).join(", ")
}

/// CSS length units accepted for page dimensions and margins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Pixel,
    Inch,
    Centimeter,
    Millimeter,
}

impl Unit {
    /// All valid units
    pub const ALL: [Unit; 4] = [Unit::Pixel, Unit::Inch, Unit::Centimeter, Unit::Millimeter];

    /// The lower-cased CSS suffix for this unit
    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Pixel => "px",
            Unit::Inch => "in",
            Unit::Centimeter => "cm",
            Unit::Millimeter => "mm",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = OptionsError;

    /// Parse a unit name case-insensitively
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "px" => Ok(Unit::Pixel),
            "in" => Ok(Unit::Inch),
            "cm" => Ok(Unit::Centimeter),
            "mm" => Ok(Unit::Millimeter),
            _ => Err(OptionsError::InvalidUnit(s.to_string())),
        }
    }
}

/// Paper size names understood by the renderer
///
/// If a format is set it takes priority over explicit `width`/`height`
/// options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaperFormat {
    Letter,
    Legal,
    Tabloid,
    Ledger,
    A0,
    A1,
    A2,
    A3,
    A4,
    A5,
    A6,
}

impl PaperFormat {
    /// All valid formats
    pub const ALL: [PaperFormat; 11] = [
        PaperFormat::Letter,
        PaperFormat::Legal,
        PaperFormat::Tabloid,
        PaperFormat::Ledger,
        PaperFormat::A0,
        PaperFormat::A1,
        PaperFormat::A2,
        PaperFormat::A3,
        PaperFormat::A4,
        PaperFormat::A5,
        PaperFormat::A6,
    ];

    /// The upper-cased name passed to the renderer
    pub fn name(self) -> &'static str {
        match self {
            PaperFormat::Letter => "LETTER",
            PaperFormat::Legal => "LEGAL",
            PaperFormat::Tabloid => "TABLOID",
            PaperFormat::Ledger => "LEDGER",
            PaperFormat::A0 => "A0",
            PaperFormat::A1 => "A1",
            PaperFormat::A2 => "A2",
            PaperFormat::A3 => "A3",
            PaperFormat::A4 => "A4",
            PaperFormat::A5 => "A5",
            PaperFormat::A6 => "A6",
        }
    }
}

impl fmt::Display for PaperFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PaperFormat {
    type Err = OptionsError;

    /// Parse a format name case-insensitively
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "LETTER" => Ok(PaperFormat::Letter),
            "LEGAL" => Ok(PaperFormat::Legal),
            "TABLOID" => Ok(PaperFormat::Tabloid),
            "LEDGER" => Ok(PaperFormat::Ledger),
            "A0" => Ok(PaperFormat::A0),
            "A1" => Ok(PaperFormat::A1),
            "A2" => Ok(PaperFormat::A2),
            "A3" => Ok(PaperFormat::A3),
            "A4" => Ok(PaperFormat::A4),
            "A5" => Ok(PaperFormat::A5),
            "A6" => Ok(PaperFormat::A6),
            _ => Err(OptionsError::InvalidFormat(s.to_string())),
        }
    }
}

/// Format a numeric value and unit into a single `"<number><unit>"` token
pub(crate) fn dimension_token(value: f64, unit: Unit) -> String {
    format!("{}{}", value, unit.as_str())
}

/// Page layout options serialized to the renderer as a JSON object
///
/// Only options that were explicitly set appear in the serialized output;
/// every boolean defaults to absent (`false` on the renderer side).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageOptions {
    /// Paper format name, upper-cased
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Paper width as a dimension token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,

    /// Paper height as a dimension token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,

    /// Landscape orientation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landscape: Option<bool>,

    /// Embed the document outline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline: Option<bool>,

    /// Give CSS `@page` size priority over width/height/format
    #[serde(rename = "preferCSSPageSize", skip_serializing_if = "Option::is_none")]
    pub prefer_css_page_size: Option<bool>,

    /// Print background graphics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print_background: Option<bool>,

    /// Display header and footer templates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_header_footer: Option<bool>,

    /// Webpage rendering scale, within [0.1, 2.0]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,

    /// Generate a tagged (accessible) PDF
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagged: Option<bool>,

    /// Paper ranges to print, e.g. `"1-5, 8, 11-13"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_ranges: Option<String>,
}

impl PageOptions {
    /// Set the paper format
    ///
    /// Takes priority over [`set_width`](Self::set_width) and
    /// [`set_height`](Self::set_height) when both are present.
    pub fn set_format(&mut self, format: PaperFormat) {
        self.format = Some(format.name().to_string());
    }

    /// Set the paper width
    pub fn set_width(&mut self, width: f64, unit: Unit) {
        self.width = Some(dimension_token(width, unit));
    }

    /// Set the paper height
    pub fn set_height(&mut self, height: f64, unit: Unit) {
        self.height = Some(dimension_token(height, unit));
    }

    /// Set the rendering scale
    ///
    /// Fails when the value lies outside [0.1, 2.0].
    pub fn set_scale(&mut self, scale: f64) -> Result<()> {
        if !(0.1..=2.0).contains(&scale) {
            return Err(OptionsError::ScaleOutOfRange(scale));
        }

        self.scale = Some(scale);
        Ok(())
    }

    /// Set the page ranges to print
    ///
    /// Fails when the string is empty; any non-empty string is stored
    /// verbatim.
    pub fn set_page_ranges(&mut self, ranges: &str) -> Result<()> {
        if ranges.is_empty() {
            return Err(OptionsError::EmptyPageRanges);
        }

        self.page_ranges = Some(ranges.to_string());
        Ok(())
    }

    /// Serialize to the JSON object the renderer expects
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("PageOptions serialization cannot fail")
    }
}

/// Paper margins as four dimension tokens
///
/// Defaults to zero millimeters on all sides. Margins are always replaced
/// as a whole; there is no per-side update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Margins {
    pub top: String,
    pub right: String,
    pub bottom: String,
    pub left: String,
}

impl Default for Margins {
    fn default() -> Self {
        Margins::new(0.0, 0.0, 0.0, 0.0, Unit::Millimeter)
    }
}

impl Margins {
    /// Create margins from four values in a single unit
    pub fn new(top: f64, right: f64, bottom: f64, left: f64, unit: Unit) -> Self {
        Self {
            top: dimension_token(top, unit),
            right: dimension_token(right, unit),
            bottom: dimension_token(bottom, unit),
            left: dimension_token(left, unit),
        }
    }

    /// Create uniform margins
    pub fn uniform(value: f64, unit: Unit) -> Self {
        Margins::new(value, value, value, value, unit)
    }

    /// Serialize to the JSON object the renderer expects
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("Margins serialization cannot fail")
    }
}
