//! Merging and flattening the layer stack

use super::{Layer, Surface};
use crate::error::{LayerError, LayerResult};
use crate::types::{LayerId, MergeMode};
use alphagrow_core::{Pix, PixMut, PixelDepth};
use log::trace;

impl Surface {
    /// Visible layers in the stack, top first.
    fn visible_layers(&self) -> Vec<LayerId> {
        self.state
            .stack
            .iter()
            .copied()
            .filter(|id| self.state.layers.get(id).is_some_and(|l| l.visible))
            .collect()
    }

    /// Composite `ids` bottom to top into `dst`, whose origin sits at
    /// canvas position `(ox, oy)`.
    fn composite_layers(&self, dst: &mut PixMut, ids: &[LayerId], ox: i32, oy: i32) -> LayerResult<()> {
        for &id in ids.iter().rev() {
            let layer = self.layer(id)?;
            let mask = match layer.mask {
                Some(m) => Some(self.mask(m)?),
                None => None,
            };
            dst.composite(
                &layer.pix,
                layer.x - ox,
                layer.y - oy,
                layer.opacity,
                mask,
            )?;
        }
        Ok(())
    }

    pub(super) fn merge_visible(&mut self, mode: MergeMode) -> LayerResult<LayerId> {
        if self.state.floating.is_some() {
            return Err(LayerError::FloatingSelectionExists);
        }
        let visible = self.visible_layers();
        let (Some(&top), Some(&bottom)) = (visible.first(), visible.last()) else {
            return Err(LayerError::NothingToMerge);
        };

        let bottom_layer = self.layer(bottom)?;
        let bottom_bounds = bottom_layer.bounds();
        let bounds = match mode {
            MergeMode::ExpandAsNecessary => visible
                .iter()
                .filter_map(|id| self.state.layers.get(id))
                .fold(bottom_bounds, |acc, l| acc.union(&l.bounds())),
        };
        let needs_alpha = bottom_layer.has_alpha() || bounds != bottom_bounds;
        let name = bottom_layer.name.clone();

        let mut merged = Pix::new(bounds.w, bounds.h, PixelDepth::Bit32)?.to_mut();
        merged.set_spp(if needs_alpha { 4 } else { 3 });
        self.composite_layers(&mut merged, &visible, bounds.x, bounds.y)?;

        let position = self.position_of(top)?;
        self.discard_layers(&visible);
        let id = self.alloc_layer(Layer::new(name, merged.into(), bounds.x, bounds.y));
        let position = position.min(self.state.stack.len());
        self.state.stack.insert(position, id);

        trace!(
            "merged {} layers into {} at ({}, {}) {}x{}",
            visible.len(),
            id,
            bounds.x,
            bounds.y,
            bounds.w,
            bounds.h
        );
        Ok(id)
    }

    pub(super) fn flatten_stack(&mut self) -> LayerResult<LayerId> {
        let visible = self.visible_layers();
        let name = visible
            .last()
            .and_then(|id| self.state.layers.get(id))
            .map_or_else(|| "Background".to_string(), |l| l.name.clone());

        let (w, h) = (self.state.width, self.state.height);
        let mut flat =
            Pix::new_filled(w, h, PixelDepth::Bit32, self.state.background.to_pixel())?.to_mut();
        self.composite_layers(&mut flat, &visible, 0, 0)?;

        let all: Vec<LayerId> = self.state.stack.clone();
        self.discard_layers(&all);
        self.state.floating = None;
        let id = self.alloc_layer(Layer::new(name, flat.into(), 0, 0));
        self.state.stack.push(id);

        trace!("flattened {} visible of {} layers into {}", visible.len(), all.len(), id);
        Ok(id)
    }
}
