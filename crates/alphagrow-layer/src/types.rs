//! Handles and parameter types shared by every substrate

use std::fmt;

macro_rules! handle {
    ($(#[$doc:meta])* $name:ident, $label:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u32);

        impl $name {
            /// Wrap a raw handle value.
            pub const fn from_raw(raw: u32) -> Self {
                Self(raw)
            }

            /// Get the raw handle value.
            pub const fn raw(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, " #{}"), self.0)
            }
        }
    };
}

handle!(
    /// Handle to a layer, whether or not it is in the stack.
    LayerId,
    "layer"
);
handle!(
    /// Handle to a single-channel image owned by the surface.
    ChannelId,
    "channel"
);
handle!(
    /// Handle to a layer mask.
    MaskId,
    "mask"
);
handle!(
    /// Handle to a named copy of a layer's pixels.
    BufferId,
    "buffer"
);
handle!(
    /// Handle to a pasted, not yet anchored, selection.
    FloatingId,
    "floating selection"
);

/// Axis-aligned rectangle in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Bounds {
    /// Create a rectangle.
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i64 {
        self.x as i64 + self.w as i64
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.h as i64
    }

    /// Smallest rectangle containing both.
    pub fn union(&self, other: &Bounds) -> Bounds {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let r = self.right().max(other.right());
        let b = self.bottom().max(other.bottom());
        Bounds::new(x, y, (r - x as i64) as u32, (b - y as i64) as u32)
    }
}

/// How the extent of a merged layer is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeMode {
    /// Grow to the union of all merged layers' extents
    #[default]
    ExpandAsNecessary,
}

/// Pixel type of a new layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    /// Opaque color, no alpha channel
    Rgb,
    /// Color with alpha channel
    Rgba,
}

/// Initial content of a new layer mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskInit {
    /// Copy of the surface's active channel
    ActiveChannel,
}

/// Parameters for creating a layer.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLayer {
    pub width: u32,
    pub height: u32,
    pub kind: LayerKind,
    pub name: String,
    /// Opacity in `[0.0, 1.0]`
    pub opacity: f32,
}

impl NewLayer {
    /// A fully opaque layer.
    pub fn new(width: u32, height: u32, kind: LayerKind, name: impl Into<String>) -> Self {
        Self {
            width,
            height,
            kind,
            name: name.into(),
            opacity: 1.0,
        }
    }
}
