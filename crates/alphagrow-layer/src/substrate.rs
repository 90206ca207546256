//! The raster substrate capability interface
//!
//! The dilation pipeline never touches pixels itself. Everything it does
//! is expressed through the primitives below, so any 2D compositing
//! library with a layer stack can host it by implementing this trait.
//!
//! Layer positions count from the top of the stack: position 0 is the
//! topmost layer, and inserting at position `n` places the layer directly
//! above the layer that was previously at `n`.
//!
//! Handles returned by creation methods (`duplicate_layer`, `new_layer`,
//! `channel_from_component`) refer to objects that exist but are not yet
//! part of the stack or channel list; they must be inserted explicitly.

use crate::LayerResult;
use crate::types::{BufferId, ChannelId, FloatingId, LayerId, MaskId, MaskInit, MergeMode, NewLayer};
use alphagrow_core::{RgbColor, RgbComponent};
use alphagrow_filter::ToneCurve;

/// Layer-stack operations required by the dilation pipeline.
pub trait RasterSubstrate {
    /// Canvas width and height.
    fn canvas_size(&self) -> (u32, u32);

    /// Number of layers in the stack.
    fn layer_count(&self) -> usize;

    /// Position of a layer in the stack (0 = top).
    fn layer_position(&self, layer: LayerId) -> LayerResult<usize>;

    /// Whether the layer carries an alpha channel.
    fn layer_has_alpha(&self, layer: LayerId) -> LayerResult<bool>;

    /// Resize a layer to cover exactly the canvas, keeping its content
    /// where it is on the canvas.
    fn resize_layer_to_canvas(&mut self, layer: LayerId) -> LayerResult<()>;

    /// Extract one component of a layer as a new canvas-sized channel.
    fn channel_from_component(
        &mut self,
        layer: LayerId,
        component: RgbComponent,
        name: &str,
    ) -> LayerResult<ChannelId>;

    /// Insert a channel into the channel list.
    fn insert_channel(&mut self, channel: ChannelId, position: usize) -> LayerResult<()>;

    /// Copy a layer's pixels and position into a named buffer.
    fn copy_named(&mut self, layer: LayerId, name: &str) -> LayerResult<BufferId>;

    /// Create an identical copy of a layer.
    fn duplicate_layer(&mut self, layer: LayerId) -> LayerResult<LayerId>;

    /// Insert a layer into the stack.
    fn insert_layer(&mut self, layer: LayerId, position: usize) -> LayerResult<()>;

    /// Move a layer by a pixel offset.
    fn translate_layer(&mut self, layer: LayerId, dx: i32, dy: i32) -> LayerResult<()>;

    /// Composite all visible layers top-over-bottom into a single layer
    /// replacing them.
    fn merge_visible_layers(&mut self, mode: MergeMode) -> LayerResult<LayerId>;

    /// Create a new layer.
    fn new_layer(&mut self, params: &NewLayer) -> LayerResult<LayerId>;

    /// Set the color used by [`RasterSubstrate::bucket_fill`].
    fn set_foreground(&mut self, color: RgbColor);

    /// Fill a whole layer with the foreground color.
    fn bucket_fill(&mut self, layer: LayerId) -> LayerResult<()>;

    /// Paste a buffer onto a layer as a floating selection, at the
    /// position it was copied from.
    fn paste_floating(&mut self, target: LayerId, buffer: BufferId) -> LayerResult<FloatingId>;

    /// Turn the floating selection into a layer directly above its target.
    fn floating_to_layer(&mut self, floating: FloatingId) -> LayerResult<LayerId>;

    /// Composite every visible layer onto an opaque canvas-sized layer
    /// and make it the only layer.
    fn flatten(&mut self) -> LayerResult<LayerId>;

    /// Give a layer a fully opaque alpha channel if it has none.
    fn add_alpha(&mut self, layer: LayerId) -> LayerResult<()>;

    /// Select the channel used by [`MaskInit::ActiveChannel`].
    fn set_active_channel(&mut self, channel: ChannelId) -> LayerResult<()>;

    /// Create a mask sized to the layer.
    fn create_mask(&mut self, layer: LayerId, init: MaskInit) -> LayerResult<MaskId>;

    /// Attach a mask to a layer.
    fn attach_mask(&mut self, layer: LayerId, mask: MaskId) -> LayerResult<()>;

    /// Remap a layer mask through a tone curve.
    fn apply_curve(&mut self, mask: MaskId, curve: &ToneCurve) -> LayerResult<()>;

    /// Open an undo group; groups may nest.
    fn begin_group(&mut self) -> LayerResult<()>;

    /// Close the innermost undo group.
    fn end_group(&mut self) -> LayerResult<()>;

    /// Close the innermost undo group and revert everything done since
    /// it was opened. Enclosing groups stay open with their edits intact.
    fn abort_group(&mut self) -> LayerResult<()>;
}
