//! Structuring Element (SEL) for layer-stack dilation
//!
//! A structuring element here is an ordered list of non-zero pixel
//! offsets. One dilation step places a copy of the layer at each offset
//! and merges them all with the unshifted layer, so the occupied region
//! grows by the union of the offsets.
//!
//! The order matters for color: each copy is made from the previous one
//! and stacked above it, so where copies overlap the later offsets win.

use crate::{MorphError, MorphResult};
use std::fmt;
use std::str::FromStr;

/// The 4-connected cross, in the order down, right, up, left.
const CROSS: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// The 8-connected square, walking the ring clockwise from below.
const SQUARE: [(i32, i32); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Structuring Element (SEL)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sel {
    offsets: Vec<(i32, i32)>,
    name: Option<String>,
}

impl Sel {
    /// The 4-connected cross: grows by one pixel in the Manhattan metric.
    pub fn cross() -> Self {
        Self {
            offsets: CROSS.to_vec(),
            name: Some("cross".to_string()),
        }
    }

    /// The 8-connected square: grows by one pixel in the chessboard metric.
    pub fn square() -> Self {
        Self {
            offsets: SQUARE.to_vec(),
            name: Some("square".to_string()),
        }
    }

    /// Create a structuring element from `(dx, dy)` offsets.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::InvalidSel`] if the list is empty, contains
    /// `(0, 0)`, or repeats an offset.
    pub fn from_offsets(offsets: &[(i32, i32)]) -> MorphResult<Self> {
        if offsets.is_empty() {
            return Err(MorphError::InvalidSel("no offsets".to_string()));
        }
        for (i, &off) in offsets.iter().enumerate() {
            if off == (0, 0) {
                return Err(MorphError::InvalidSel(
                    "offset (0, 0) is the layer itself".to_string(),
                ));
            }
            if offsets[..i].contains(&off) {
                return Err(MorphError::InvalidSel(format!(
                    "offset ({}, {}) repeated",
                    off.0, off.1
                )));
            }
        }
        Ok(Self {
            offsets: offsets.to_vec(),
            name: None,
        })
    }

    /// Get the offsets, in stacking order.
    pub fn offsets(&self) -> &[(i32, i32)] {
        &self.offsets
    }

    /// Number of copies one dilation step makes.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Whether there are no offsets. Every constructor rejects an empty
    /// offset list, so a built `Sel` never is.
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Get the name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set the name
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Translations taking each copy from the previous one's position
    /// (the first from the origin) to its own offset.
    pub fn steps(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let prev = std::iter::once((0, 0)).chain(self.offsets.iter().copied());
        self.offsets
            .iter()
            .zip(prev)
            .map(|(&(x, y), (px, py))| (x - px, y - py))
    }

    /// Largest reach of any offset along either axis.
    pub fn reach(&self) -> u32 {
        self.offsets
            .iter()
            .map(|&(x, y)| x.unsigned_abs().max(y.unsigned_abs()))
            .max()
            .unwrap_or(0)
    }
}

impl Default for Sel {
    fn default() -> Self {
        Self::cross()
    }
}

impl fmt::Display for Sel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            return f.write_str(name);
        }
        let parts: Vec<String> = self
            .offsets
            .iter()
            .map(|(x, y)| format!("({x}, {y})"))
            .collect();
        write!(f, "[{}]", parts.join(", "))
    }
}

impl FromStr for Sel {
    type Err = MorphError;

    /// Parse `cross` or `square`.
    fn from_str(s: &str) -> MorphResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cross" => Ok(Self::cross()),
            "square" => Ok(Self::square()),
            other => Err(MorphError::InvalidSel(format!(
                "unknown kernel '{other}', expected 'cross' or 'square'"
            ))),
        }
    }
}
