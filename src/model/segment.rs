//! Segment — one drawn line between two (possibly named) endpoints.

use serde::{Deserialize, Deserializer, Serialize};

/// A point on the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// What sits at the end of a segment.
///
/// The aliases accept the spellings found in saved drawing files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EndpointKind {
    #[default]
    #[serde(alias = "Ninguno")]
    None,
    #[serde(alias = "Conector")]
    Connector,
    #[serde(alias = "BRK")]
    Breakout,
    #[serde(alias = "SPL")]
    Splice,
}

/// Which end of a segment an operation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentEnd {
    A,
    B,
}

/// A drawn line segment.
///
/// Identical names on different segments denote the same logical node.
/// A segment only becomes a graph edge when [`Segment::is_routable`] holds.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Segment {
    #[serde(alias = "p1")]
    pub a: Point,
    #[serde(alias = "p2")]
    pub b: Point,
    #[serde(default, alias = "obj1")]
    pub kind_a: EndpointKind,
    #[serde(default, alias = "obj2")]
    pub kind_b: EndpointKind,
    #[serde(default, alias = "nombre_obj1")]
    pub name_a: String,
    #[serde(default, alias = "nombre_obj2")]
    pub name_b: String,
    /// Length in millimeters. `None` until the user annotates the line.
    #[serde(default, alias = "dimension_mm", deserialize_with = "lenient_length")]
    pub length_mm: Option<f64>,
}

impl Segment {
    pub fn new(a: Point, b: Point) -> Self {
        Self { a, b, ..Self::default() }
    }

    /// Shorthand for an annotated segment whose geometry is irrelevant.
    pub fn named(name_a: impl Into<String>, name_b: impl Into<String>, length_mm: f64) -> Self {
        Self {
            name_a: name_a.into(),
            name_b: name_b.into(),
            length_mm: Some(length_mm),
            ..Self::default()
        }
    }

    pub fn with_names(mut self, name_a: impl Into<String>, name_b: impl Into<String>) -> Self {
        self.name_a = name_a.into();
        self.name_b = name_b.into();
        self
    }

    pub fn with_length(mut self, length_mm: f64) -> Self {
        self.length_mm = Some(length_mm);
        self
    }

    pub fn with_kinds(mut self, kind_a: EndpointKind, kind_b: EndpointKind) -> Self {
        self.kind_a = kind_a;
        self.kind_b = kind_b;
        self
    }

    /// Both endpoints named and a positive, finite length.
    pub fn is_routable(&self) -> bool {
        !self.name_a.is_empty()
            && !self.name_b.is_empty()
            && self.length_mm.is_some_and(|len| len.is_finite() && len > 0.0)
    }

    pub fn name(&self, end: SegmentEnd) -> &str {
        match end {
            SegmentEnd::A => &self.name_a,
            SegmentEnd::B => &self.name_b,
        }
    }

    pub fn kind(&self, end: SegmentEnd) -> EndpointKind {
        match end {
            SegmentEnd::A => self.kind_a,
            SegmentEnd::B => self.kind_b,
        }
    }

    pub fn set_kind(&mut self, end: SegmentEnd, kind: EndpointKind) {
        match end {
            SegmentEnd::A => self.kind_a = kind,
            SegmentEnd::B => self.kind_b = kind,
        }
    }

    /// Shallow-merge a patch: every field present in the patch replaces ours.
    pub fn apply(&mut self, patch: SegmentPatch) {
        if let Some(a) = patch.a { self.a = a; }
        if let Some(b) = patch.b { self.b = b; }
        if let Some(kind) = patch.kind_a { self.kind_a = kind; }
        if let Some(kind) = patch.kind_b { self.kind_b = kind; }
        if let Some(name) = patch.name_a { self.name_a = name; }
        if let Some(name) = patch.name_b { self.name_b = name; }
        if let Some(length) = patch.length_mm { self.length_mm = length; }
    }
}

/// Partial update of a [`Segment`].
///
/// `length_mm: Some(None)` clears the length.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SegmentPatch {
    pub a: Option<Point>,
    pub b: Option<Point>,
    pub kind_a: Option<EndpointKind>,
    pub kind_b: Option<EndpointKind>,
    pub name_a: Option<String>,
    pub name_b: Option<String>,
    pub length_mm: Option<Option<f64>>,
}

impl SegmentPatch {
    pub fn names(name_a: impl Into<String>, name_b: impl Into<String>) -> Self {
        Self {
            name_a: Some(name_a.into()),
            name_b: Some(name_b.into()),
            ..Self::default()
        }
    }

    pub fn length(length_mm: Option<f64>) -> Self {
        Self { length_mm: Some(length_mm), ..Self::default() }
    }
}

// ============================================================================
// Lenient length decoding
// ============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLength {
    Number(f64),
    Text(String),
}

/// Lengths typed into the UI arrive as strings. Anything that is not a
/// number decodes as "no length" so the segment is skipped at build time.
fn lenient_length<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawLength>::deserialize(deserializer).unwrap_or(None);
    Ok(match raw {
        Some(RawLength::Number(n)) => Some(n),
        Some(RawLength::Text(s)) => s.trim().parse::<f64>().ok(),
        None => None,
    })
}

// ============================================================================
// Tests
// ============================================================================
