//! `RasterSubstrate` implementation for `Surface`

use super::{Buffer, Channel, Floating, Layer, Surface};
use crate::RasterSubstrate;
use crate::error::{LayerError, LayerResult};
use crate::types::{
    BufferId, ChannelId, FloatingId, LayerId, LayerKind, MaskId, MaskInit, MergeMode, NewLayer,
};
use alphagrow_core::{Pix, PixelDepth, RgbColor, RgbComponent, color};
use alphagrow_filter::{ToneCurve, apply_curve};
use log::trace;

impl RasterSubstrate for Surface {
    fn canvas_size(&self) -> (u32, u32) {
        (self.state.width, self.state.height)
    }

    fn layer_count(&self) -> usize {
        self.state.stack.len()
    }

    fn layer_position(&self, layer: LayerId) -> LayerResult<usize> {
        self.position_of(layer)
    }

    fn layer_has_alpha(&self, layer: LayerId) -> LayerResult<bool> {
        Ok(self.layer(layer)?.has_alpha())
    }

    fn resize_layer_to_canvas(&mut self, layer: LayerId) -> LayerResult<()> {
        let (w, h) = (self.state.width, self.state.height);
        let fill = self.state.background.to_pixel();
        let l = self.layer(layer)?;
        let (x, y) = (l.x, l.y);

        let fill = if l.has_alpha() { 0 } else { fill };
        let mut resized = Pix::new_filled(w, h, PixelDepth::Bit32, fill)?.to_mut();
        resized.blit(&l.pix, x, y)?;
        let mask = match l.mask {
            Some(m) => {
                let mut pm = Pix::new(w, h, PixelDepth::Bit8)?.to_mut();
                pm.blit(self.mask(m)?, x, y)?;
                Some((m, Pix::from(pm)))
            }
            None => None,
        };

        if let Some((m, pix)) = mask {
            self.state.masks.insert(m, pix);
        }
        let l = self.layer_mut(layer)?;
        l.pix = resized.into();
        l.x = 0;
        l.y = 0;
        trace!("resized {} from offset ({}, {}) to {}x{}", layer, x, y, w, h);
        Ok(())
    }

    fn channel_from_component(
        &mut self,
        layer: LayerId,
        component: RgbComponent,
        name: &str,
    ) -> LayerResult<ChannelId> {
        let (w, h) = (self.state.width, self.state.height);
        let l = self.layer(layer)?;
        let plane = l.pix.get_rgb_component(component)?;
        let mut pix = Pix::new(w, h, PixelDepth::Bit8)?.to_mut();
        pix.blit(&plane, l.x, l.y)?;

        let id = ChannelId::from_raw(self.alloc_id());
        self.state.channels.insert(
            id,
            Channel {
                name: name.to_string(),
                pix: pix.into(),
                visible: false,
            },
        );
        Ok(id)
    }

    fn insert_channel(&mut self, channel: ChannelId, position: usize) -> LayerResult<()> {
        self.channel(channel)?;
        if self.state.channel_list.contains(&channel) {
            return Err(LayerError::ChannelAlreadyInserted(channel));
        }
        let position = position.min(self.state.channel_list.len());
        self.state.channel_list.insert(position, channel);
        Ok(())
    }

    fn copy_named(&mut self, layer: LayerId, name: &str) -> LayerResult<BufferId> {
        let l = self.layer(layer)?;
        let buffer = Buffer {
            name: name.to_string(),
            pix: l.pix.clone(),
            x: l.x,
            y: l.y,
        };
        let id = BufferId::from_raw(self.alloc_id());
        self.state.buffers.insert(id, buffer);
        Ok(id)
    }

    fn duplicate_layer(&mut self, layer: LayerId) -> LayerResult<LayerId> {
        let src = self.layer(layer)?;
        let mut copy = src.clone();
        copy.name = format!("{} copy", src.name);
        if let Some(m) = src.mask {
            let pix = self.mask(m)?.clone();
            copy.mask = Some(self.alloc_mask(pix));
        }
        Ok(self.alloc_layer(copy))
    }

    fn insert_layer(&mut self, layer: LayerId, position: usize) -> LayerResult<()> {
        self.layer(layer)?;
        if self.state.stack.contains(&layer) {
            return Err(LayerError::LayerAlreadyInStack(layer));
        }
        let position = position.min(self.state.stack.len());
        self.state.stack.insert(position, layer);
        Ok(())
    }

    fn translate_layer(&mut self, layer: LayerId, dx: i32, dy: i32) -> LayerResult<()> {
        let l = self.layer_mut(layer)?;
        l.x += dx;
        l.y += dy;
        Ok(())
    }

    fn merge_visible_layers(&mut self, mode: MergeMode) -> LayerResult<LayerId> {
        self.merge_visible(mode)
    }

    fn new_layer(&mut self, params: &NewLayer) -> LayerResult<LayerId> {
        if !(0.0..=1.0).contains(&params.opacity) {
            return Err(LayerError::InvalidParameters(format!(
                "opacity {} not in [0.0, 1.0]",
                params.opacity
            )));
        }
        let fill = match params.kind {
            LayerKind::Rgb => color::compose_rgb(0, 0, 0),
            LayerKind::Rgba => 0,
        };
        let pix = Pix::new_filled(params.width, params.height, PixelDepth::Bit32, fill)?;
        let mut layer = Layer::new(params.name.clone(), pix, 0, 0);
        layer.opacity = params.opacity;
        Ok(self.alloc_layer(layer))
    }

    fn set_foreground(&mut self, color: RgbColor) {
        self.state.foreground = color;
    }

    fn bucket_fill(&mut self, layer: LayerId) -> LayerResult<()> {
        let fill = self.state.foreground.to_pixel();
        let l = self.layer_mut(layer)?;
        let mut pm = l.pix.clone().into_mut();
        pm.set_all_arbitrary(fill);
        l.pix = pm.into();
        Ok(())
    }

    fn paste_floating(&mut self, target: LayerId, buffer: BufferId) -> LayerResult<FloatingId> {
        self.position_of(target)?;
        if self.state.floating.is_some() {
            return Err(LayerError::FloatingSelectionExists);
        }
        let b = self
            .state
            .buffers
            .get(&buffer)
            .ok_or(LayerError::UnknownBuffer(buffer))?;
        let floating = Floating {
            target,
            pix: b.pix.clone(),
            x: b.x,
            y: b.y,
        };
        let id = FloatingId::from_raw(self.alloc_id());
        self.state.floating = Some((id, floating));
        Ok(id)
    }

    fn floating_to_layer(&mut self, floating: FloatingId) -> LayerResult<LayerId> {
        let position = match &self.state.floating {
            Some((id, f)) if *id == floating => self.position_of(f.target)?,
            _ => return Err(LayerError::UnknownFloating(floating)),
        };
        let Some((_, f)) = self.state.floating.take() else {
            return Err(LayerError::UnknownFloating(floating));
        };

        let mut pm = f.pix.into_mut();
        make_opaque_alpha(&mut pm);
        let id = self.alloc_layer(Layer::new("Pasted Layer", pm.into(), f.x, f.y));
        self.state.stack.insert(position, id);
        Ok(id)
    }

    fn flatten(&mut self) -> LayerResult<LayerId> {
        self.flatten_stack()
    }

    fn add_alpha(&mut self, layer: LayerId) -> LayerResult<()> {
        let l = self.layer_mut(layer)?;
        if l.pix.has_alpha() {
            return Ok(());
        }
        let mut pm = l.pix.clone().into_mut();
        make_opaque_alpha(&mut pm);
        l.pix = pm.into();
        Ok(())
    }

    fn set_active_channel(&mut self, channel: ChannelId) -> LayerResult<()> {
        self.channel(channel)?;
        self.state.active_channel = Some(channel);
        Ok(())
    }

    fn create_mask(&mut self, layer: LayerId, init: MaskInit) -> LayerResult<MaskId> {
        let l = self.layer(layer)?;
        let (w, h) = (l.width(), l.height());
        let pix = match init {
            MaskInit::ActiveChannel => {
                let ch = self.state.active_channel.ok_or(LayerError::NoActiveChannel)?;
                let mut pm = Pix::new(w, h, PixelDepth::Bit8)?.to_mut();
                pm.blit(self.channel(ch)?.pix(), -l.x, -l.y)?;
                pm.into()
            }
        };
        Ok(self.alloc_mask(pix))
    }

    fn attach_mask(&mut self, layer: LayerId, mask: MaskId) -> LayerResult<()> {
        let l = self.layer(layer)?;
        if l.mask.is_some() {
            return Err(LayerError::MaskAlreadyAttached(layer));
        }
        let m = self.mask(mask)?;
        if self.state.layers.values().any(|other| other.mask == Some(mask)) {
            return Err(LayerError::MaskInUse(mask));
        }
        if m.width() != l.width() || m.height() != l.height() {
            return Err(LayerError::MaskSizeMismatch {
                mask: (m.width(), m.height()),
                layer: (l.width(), l.height()),
            });
        }
        self.layer_mut(layer)?.mask = Some(mask);
        Ok(())
    }

    fn apply_curve(&mut self, mask: MaskId, curve: &ToneCurve) -> LayerResult<()> {
        let m = self
            .state
            .masks
            .get_mut(&mask)
            .ok_or(LayerError::UnknownMask(mask))?;
        *m = apply_curve(m, curve)?;
        Ok(())
    }

    fn begin_group(&mut self) -> LayerResult<()> {
        self.open_group();
        Ok(())
    }

    fn end_group(&mut self) -> LayerResult<()> {
        self.close_group()
    }

    fn abort_group(&mut self) -> LayerResult<()> {
        self.cancel_group()
    }
}

/// Mark a 32 bpp image as RGBA, setting alpha to 255 if it had none.
fn make_opaque_alpha(pm: &mut alphagrow_core::PixMut) {
    if pm.spp() == 4 {
        return;
    }
    for y in 0..pm.height() {
        for x in 0..pm.width() {
            let p = pm.get_pixel_unchecked(x, y);
            pm.set_pixel_unchecked(x, y, color::with_alpha(p, 255));
        }
    }
    pm.set_spp(4);
}
