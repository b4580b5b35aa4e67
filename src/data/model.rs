use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// SwitchKind – classification of the free-form type column
// ---------------------------------------------------------------------------

/// Switch family as recorded in `switchmeta.csv`.
/// Ordered so it can live in a `BTreeSet` for filter selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwitchKind {
    Linear,
    Tactile,
    Clicky,
    /// Missing or unrecognised type.
    Unknown,
}

impl SwitchKind {
    /// Case-insensitive parse; anything unrecognised is `Unknown`.
    pub fn from_type(s: Option<&str>) -> Self {
        match s.map(|t| t.trim().to_ascii_lowercase()).as_deref() {
            Some("linear") => SwitchKind::Linear,
            Some("tactile") => SwitchKind::Tactile,
            Some("clicky") => SwitchKind::Clicky,
            _ => SwitchKind::Unknown,
        }
    }
}

impl fmt::Display for SwitchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SwitchKind::Linear => "linear",
            SwitchKind::Tactile => "tactile",
            SwitchKind::Clicky => "clicky",
            SwitchKind::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// SwitchMeta – one row of switchmeta.csv
// ---------------------------------------------------------------------------

/// Name and (optional) type of a measured switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchMeta {
    pub name: String,
    /// Only present when the source row had a second, non-empty column.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub switch_type: Option<String>,
}

impl SwitchMeta {
    pub fn new(name: impl Into<String>, switch_type: Option<String>) -> Self {
        Self {
            name: name.into(),
            switch_type: switch_type.filter(|t| !t.is_empty()),
        }
    }

    pub fn kind(&self) -> SwitchKind {
        SwitchKind::from_type(self.switch_type.as_deref())
    }
}

// ---------------------------------------------------------------------------
// Curves
// ---------------------------------------------------------------------------

/// One sample: stroke position (mm) against force (gf).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub x: f64,
    pub y: f64,
}

/// An ordered force-displacement curve. Order is the file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwitchCurve {
    pub data: Vec<CurvePoint>,
}

impl SwitchCurve {
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        Self {
            data: points
                .into_iter()
                .map(|(x, y)| CurvePoint { x, y })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn last(&self) -> Option<&CurvePoint> {
        self.data.last()
    }
}

/// Everything the front-end draws for one switch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchCurves {
    pub name: String,
    pub downstroke: SwitchCurve,
    /// `None` unless the upstroke was requested.
    pub upstroke: Option<SwitchCurve>,
}
