//! alphagrow-morph - Alpha dilation over a layer stack
//!
//! This crate provides:
//!
//! - Structuring elements ([`Sel`]) as ordered offset lists
//! - Dilation by duplicate, translate and merge ([`dilate_once`], [`dilate`])
//! - The texture bleed fix pipeline ([`run`], [`run_with`]) and its stages
//!
//! Everything is generic over [`alphagrow_layer::RasterSubstrate`].
//!
//! # Examples
//!
//! ```
//! use alphagrow_core::{Pix, PixelDepth, RgbColor};
//! use alphagrow_layer::Surface;
//!
//! let mut pm = Pix::new(16, 16, PixelDepth::Bit32).unwrap().to_mut();
//! pm.set_rgba(8, 8, 200, 40, 40, 255).unwrap();
//! let (mut surface, layer) = Surface::from_pix(pm.into(), "sprite").unwrap();
//!
//! let out = alphagrow_morph::run(&mut surface, layer, RgbColor::BLACK, 4).unwrap();
//! let pix = surface.layer(out).unwrap().pix().clone();
//! assert_eq!(pix.get_rgba(8, 12), Some((200, 40, 40, 255)));
//! assert_eq!(pix.get_rgba(8, 13), Some((0, 0, 0, 255)));
//! ```

pub mod dilate;
mod error;
pub mod pipeline;
pub mod sel;

pub use dilate::{dilate, dilate_once};
pub use error::{MorphError, MorphResult};
pub use pipeline::{
    AlphaSnapshot, DEFAULT_RADIUS, DilateParams, SUGGESTED_MAX_RADIUS, add_background,
    reconstruct_mask, restore_original, run, run_with, snapshot_alpha,
};
pub use sel::Sel;
