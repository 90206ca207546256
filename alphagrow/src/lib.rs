//! alphagrow - Texture bleed for sprites and textures
//!
//! Grows the colors of an image's opaque pixels outward into its
//! transparent area, one pixel per iteration along a 4-connected cross,
//! fills whatever is still uncovered with a background color, and hides
//! the grown border again behind a layer mask rebuilt from the original
//! alpha. Filtering or mipmapping the result no longer pulls in the
//! background color at sprite edges.
//!
//! # Example
//!
//! ```
//! use alphagrow::layer::Surface;
//! use alphagrow::{Pix, PixelDepth, RgbColor};
//!
//! let mut pm = Pix::new(8, 8, PixelDepth::Bit32).unwrap().to_mut();
//! pm.set_rgba(4, 4, 200, 40, 40, 255).unwrap();
//! let (mut surface, layer) = Surface::from_pix(pm.into(), "sprite").unwrap();
//!
//! let out = alphagrow::morph::run(&mut surface, layer, RgbColor::BLACK, 2).unwrap();
//! let pix = surface.export_layer(out).unwrap();
//! assert_eq!(pix.get_rgba(4, 4), Some((200, 40, 40, 255)));
//! assert_eq!(pix.get_rgba(4, 6), Some((200, 40, 40, 0)));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use alphagrow_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use alphagrow_filter as filter;
pub use alphagrow_io as io;
pub use alphagrow_layer as layer;
pub use alphagrow_morph as morph;
