//! Surface - An in-memory layered canvas
//!
//! `Surface` is the reference [`RasterSubstrate`](crate::RasterSubstrate):
//! a canvas with a layer stack, a channel list, named buffers, at most one
//! floating selection, layer masks, and grouped undo.
//!
//! Layers are 32 bpp [`Pix`] images placed at an integer offset on the
//! canvas; they may extend past the canvas edges. Channels are 8 bpp and
//! always canvas-sized. Masks are 8 bpp and sized to their layer.
//!
//! # Examples
//!
//! ```
//! use alphagrow_core::{Pix, PixelDepth};
//! use alphagrow_layer::{RasterSubstrate, Surface};
//!
//! let pix = Pix::new(8, 8, PixelDepth::Bit32).unwrap();
//! let (mut surface, layer) = Surface::from_pix(pix, "texture").unwrap();
//! let copy = surface.duplicate_layer(layer).unwrap();
//! surface.insert_layer(copy, 0).unwrap();
//! assert_eq!(surface.layer_count(), 2);
//! ```

mod composite;
mod history;
mod ops;

use crate::error::{LayerError, LayerResult};
use crate::types::{Bounds, BufferId, ChannelId, FloatingId, LayerId, MaskId};
use alphagrow_core::{Pix, PixelDepth, RgbColor, RgbComponent};
use std::collections::HashMap;

/// A layer: positioned 32 bpp pixels plus compositing attributes
#[derive(Debug, Clone)]
pub struct Layer {
    name: String,
    pix: Pix,
    x: i32,
    y: i32,
    visible: bool,
    opacity: f32,
    mask: Option<MaskId>,
}

impl Layer {
    fn new(name: impl Into<String>, pix: Pix, x: i32, y: i32) -> Self {
        Self {
            name: name.into(),
            pix,
            x,
            y,
            visible: true,
            opacity: 1.0,
            mask: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pix(&self) -> &Pix {
        &self.pix
    }

    /// Offset of the layer's top-left corner on the canvas.
    pub fn offset(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn width(&self) -> u32 {
        self.pix.width()
    }

    pub fn height(&self) -> u32 {
        self.pix.height()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn mask(&self) -> Option<MaskId> {
        self.mask
    }

    pub fn has_alpha(&self) -> bool {
        self.pix.has_alpha()
    }

    /// Extent of the layer in canvas coordinates.
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.pix.width(), self.pix.height())
    }
}

/// A canvas-sized single-channel image
#[derive(Debug, Clone)]
pub struct Channel {
    name: String,
    pix: Pix,
    visible: bool,
}

impl Channel {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pix(&self) -> &Pix {
        &self.pix
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// A named copy of a layer's pixels and where they came from
#[derive(Debug, Clone)]
struct Buffer {
    name: String,
    pix: Pix,
    x: i32,
    y: i32,
}

/// Pasted pixels waiting to become a layer
#[derive(Debug, Clone)]
struct Floating {
    target: LayerId,
    pix: Pix,
    x: i32,
    y: i32,
}

/// Everything an undo step restores
#[derive(Debug, Clone)]
struct State {
    width: u32,
    height: u32,
    /// Layer stack, top first
    stack: Vec<LayerId>,
    layers: HashMap<LayerId, Layer>,
    channel_list: Vec<ChannelId>,
    channels: HashMap<ChannelId, Channel>,
    masks: HashMap<MaskId, Pix>,
    buffers: HashMap<BufferId, Buffer>,
    floating: Option<(FloatingId, Floating)>,
    active_channel: Option<ChannelId>,
    foreground: RgbColor,
    background: RgbColor,
}

/// In-memory layered canvas
#[derive(Debug)]
pub struct Surface {
    state: State,
    next_id: u32,
    group_snapshots: Vec<State>,
    undo_stack: Vec<State>,
}

impl Surface {
    /// Create an empty canvas.
    ///
    /// The foreground color starts black and the background white.
    ///
    /// # Errors
    ///
    /// Returns [`alphagrow_core::Error::InvalidDimension`] if either
    /// dimension is 0.
    pub fn new(width: u32, height: u32) -> LayerResult<Self> {
        if width == 0 || height == 0 {
            return Err(alphagrow_core::Error::InvalidDimension { width, height }.into());
        }
        Ok(Self {
            state: State {
                width,
                height,
                stack: Vec::new(),
                layers: HashMap::new(),
                channel_list: Vec::new(),
                channels: HashMap::new(),
                masks: HashMap::new(),
                buffers: HashMap::new(),
                floating: None,
                active_channel: None,
                foreground: RgbColor::BLACK,
                background: RgbColor::WHITE,
            },
            next_id: 1,
            group_snapshots: Vec::new(),
            undo_stack: Vec::new(),
        })
    }

    /// Create a canvas the size of `pix` holding it as its only layer.
    pub fn from_pix(pix: Pix, name: &str) -> LayerResult<(Self, LayerId)> {
        let mut surface = Self::new(pix.width(), pix.height())?;
        let id = surface.add_layer(name, pix, 0, 0)?;
        Ok((surface, id))
    }

    /// Put a 32 bpp image on top of the stack at offset `(x, y)`.
    pub fn add_layer(&mut self, name: &str, pix: Pix, x: i32, y: i32) -> LayerResult<LayerId> {
        if pix.depth() != PixelDepth::Bit32 {
            return Err(alphagrow_core::Error::UnsupportedDepth(pix.depth().bits()).into());
        }
        let id = self.alloc_layer(Layer::new(name, pix, x, y));
        self.state.stack.insert(0, id);
        Ok(id)
    }

    /// Canvas width.
    pub fn width(&self) -> u32 {
        self.state.width
    }

    /// Canvas height.
    pub fn height(&self) -> u32 {
        self.state.height
    }

    /// Look up a layer, whether or not it is in the stack.
    pub fn layer(&self, id: LayerId) -> LayerResult<&Layer> {
        self.state.layers.get(&id).ok_or(LayerError::UnknownLayer(id))
    }

    /// Layer stack, top first.
    pub fn stack(&self) -> &[LayerId] {
        &self.state.stack
    }

    /// Show or hide a layer.
    pub fn set_visible(&mut self, id: LayerId, visible: bool) -> LayerResult<()> {
        self.layer_mut(id)?.visible = visible;
        Ok(())
    }

    /// Set a layer's opacity, clamped to `[0.0, 1.0]`.
    pub fn set_opacity(&mut self, id: LayerId, opacity: f32) -> LayerResult<()> {
        self.layer_mut(id)?.opacity = opacity.clamp(0.0, 1.0);
        Ok(())
    }

    /// Channel list, first inserted first.
    pub fn channels(&self) -> &[ChannelId] {
        &self.state.channel_list
    }

    /// Look up a channel, whether or not it is in the channel list.
    pub fn channel(&self, id: ChannelId) -> LayerResult<&Channel> {
        self.state.channels.get(&id).ok_or(LayerError::UnknownChannel(id))
    }

    /// The channel last passed to `set_active_channel`.
    pub fn active_channel(&self) -> Option<ChannelId> {
        self.state.active_channel
    }

    /// Look up a mask.
    pub fn mask(&self, id: MaskId) -> LayerResult<&Pix> {
        self.state.masks.get(&id).ok_or(LayerError::UnknownMask(id))
    }

    /// The mask attached to a layer, if any.
    pub fn layer_mask(&self, id: LayerId) -> LayerResult<Option<&Pix>> {
        match self.layer(id)?.mask {
            Some(m) => Ok(Some(self.mask(m)?)),
            None => Ok(None),
        }
    }

    /// Name given to a buffer by `copy_named`.
    pub fn buffer_name(&self, id: BufferId) -> LayerResult<&str> {
        self.state
            .buffers
            .get(&id)
            .map(|b| b.name.as_str())
            .ok_or(LayerError::UnknownBuffer(id))
    }

    /// Whether a pasted selection is waiting to become a layer.
    pub fn has_floating(&self) -> bool {
        self.state.floating.is_some()
    }

    pub fn foreground(&self) -> RgbColor {
        self.state.foreground
    }

    pub fn background(&self) -> RgbColor {
        self.state.background
    }

    /// Set the color `flatten` composites onto.
    pub fn set_background(&mut self, color: RgbColor) {
        self.state.background = color;
    }

    /// The layer's pixels with its mask, if any, folded into alpha.
    ///
    /// The result is always RGBA.
    pub fn export_layer(&self, id: LayerId) -> LayerResult<Pix> {
        let layer = self.layer(id)?;
        let alpha = layer.pix.get_rgb_component(RgbComponent::Alpha)?;
        let alpha = match self.layer_mask(id)? {
            Some(mask) => {
                let mut pm = alpha.into_mut();
                for y in 0..pm.height() {
                    for x in 0..pm.width() {
                        let a = pm.get_pixel_unchecked(x, y);
                        let m = mask.get_pixel_unchecked(x, y);
                        pm.set_pixel_unchecked(x, y, (a * m + 127) / 255);
                    }
                }
                pm.into()
            }
            None => alpha,
        };
        Ok(layer.pix.with_alpha_from(&alpha)?)
    }

    fn alloc_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn alloc_layer(&mut self, layer: Layer) -> LayerId {
        let id = LayerId::from_raw(self.alloc_id());
        self.state.layers.insert(id, layer);
        id
    }

    fn alloc_mask(&mut self, pix: Pix) -> MaskId {
        let id = MaskId::from_raw(self.alloc_id());
        self.state.masks.insert(id, pix);
        id
    }

    fn layer_mut(&mut self, id: LayerId) -> LayerResult<&mut Layer> {
        self.state
            .layers
            .get_mut(&id)
            .ok_or(LayerError::UnknownLayer(id))
    }

    fn position_of(&self, id: LayerId) -> LayerResult<usize> {
        self.layer(id)?;
        self.state
            .stack
            .iter()
            .position(|&l| l == id)
            .ok_or(LayerError::LayerNotInStack(id))
    }

    /// Drop layers from the stack and the layer table, along with their
    /// masks.
    fn discard_layers(&mut self, ids: &[LayerId]) {
        self.state.stack.retain(|l| !ids.contains(l));
        for id in ids {
            if let Some(layer) = self.state.layers.remove(id)
                && let Some(mask) = layer.mask
            {
                self.state.masks.remove(&mask);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alphagrow_core::color;

    #[test]
    fn test_new_surface() {
        let s = Surface::new(10, 6).unwrap();
        assert_eq!((s.width(), s.height()), (10, 6));
        assert!(s.stack().is_empty());
        assert_eq!(s.background(), RgbColor::WHITE);
        assert_eq!(s.foreground(), RgbColor::BLACK);
        assert!(Surface::new(0, 6).is_err());
    }

    #[test]
    fn test_add_layer_goes_on_top() {
        let pix = Pix::new(4, 4, PixelDepth::Bit32).unwrap();
        let (mut s, bottom) = Surface::from_pix(pix.clone(), "bottom").unwrap();
        let top = s.add_layer("top", pix, 1, 2).unwrap();
        assert_eq!(s.stack(), &[top, bottom]);
        assert_eq!(s.layer(top).unwrap().offset(), (1, 2));
        assert_eq!(s.layer(top).unwrap().bounds(), Bounds::new(1, 2, 4, 4));

        let gray = Pix::new(4, 4, PixelDepth::Bit8).unwrap();
        assert!(s.add_layer("gray", gray, 0, 0).is_err());
    }

    #[test]
    fn test_export_folds_mask() {
        let pix = Pix::new_filled(2, 1, PixelDepth::Bit32, color::compose_rgb(9, 9, 9)).unwrap();
        let (mut s, id) = Surface::from_pix(pix, "l").unwrap();
        assert_eq!(s.export_layer(id).unwrap().get_rgba(1, 0), Some((9, 9, 9, 255)));

        let mut mask = Pix::new(2, 1, PixelDepth::Bit8).unwrap().to_mut();
        mask.set_pixel(1, 0, 128).unwrap();
        let m = s.alloc_mask(mask.into());
        s.layer_mut(id).unwrap().mask = Some(m);
        let out = s.export_layer(id).unwrap();
        assert!(out.has_alpha());
        assert_eq!(out.get_rgba(0, 0), Some((9, 9, 9, 0)));
        assert_eq!(out.get_rgba(1, 0), Some((9, 9, 9, 128)));
    }

    #[test]
    fn test_unknown_handles() {
        let s = Surface::new(2, 2).unwrap();
        assert!(matches!(
            s.layer(LayerId::from_raw(42)),
            Err(LayerError::UnknownLayer(_))
        ));
        assert!(matches!(
            s.mask(MaskId::from_raw(1)),
            Err(LayerError::UnknownMask(_))
        ));
    }
}
