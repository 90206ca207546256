//! alphagrow-layer - Layer stack substrate
//!
//! The dilation pipeline is written against [`RasterSubstrate`], a small
//! capability interface over a layered canvas: duplicate, translate,
//! merge, fill, paste, flatten and mask operations addressed by explicit
//! handles. [`Surface`] implements it in memory on top of
//! [`alphagrow_core::Pix`].
//!
//! # Examples
//!
//! ```
//! use alphagrow_core::{Pix, PixelDepth};
//! use alphagrow_layer::{MergeMode, RasterSubstrate, Surface};
//!
//! let pix = Pix::new(4, 4, PixelDepth::Bit32).unwrap();
//! let (mut surface, layer) = Surface::from_pix(pix, "texture").unwrap();
//! let copy = surface.duplicate_layer(layer).unwrap();
//! surface.insert_layer(copy, 1).unwrap();
//! surface.translate_layer(copy, 1, 0).unwrap();
//! let merged = surface.merge_visible_layers(MergeMode::ExpandAsNecessary).unwrap();
//! assert_eq!(surface.layer(merged).unwrap().width(), 5);
//! ```

mod error;
pub mod substrate;
pub mod surface;
pub mod types;

pub use error::{LayerError, LayerResult};
pub use substrate::RasterSubstrate;
pub use surface::{Channel, Layer, Surface};
pub use types::{
    Bounds, BufferId, ChannelId, FloatingId, LayerId, LayerKind, MaskId, MaskInit, MergeMode,
    NewLayer,
};
