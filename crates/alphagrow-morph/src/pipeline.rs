//! The texture bleed fix
//!
//! Grows a layer's colors outward into its transparent surroundings,
//! fills whatever is still empty with a flat background color, and puts
//! the original transparency back as a layer mask. Sampling the result
//! with mip-mapping or bilinear filtering then picks up neighbouring
//! colors instead of the black or white hidden under transparent pixels.
//!
//! The run is five stages, each a plain function over a
//! [`RasterSubstrate`]:
//!
//! 1. [`snapshot_alpha`] - keep the alpha and a copy of the layer
//! 2. [`dilate()`](crate::dilate()) - grow the colors by `radius` pixels
//! 3. [`add_background`] - fill the rest with the background color
//! 4. [`restore_original`] - paste the untouched layer back on top
//! 5. [`reconstruct_mask`] - flatten and mask with the softened alpha
//!
//! [`run`] and [`run_with`] execute them inside one undo group.

use crate::{MorphResult, Sel, dilate};
use alphagrow_core::{RgbColor, RgbComponent};
use alphagrow_filter::ToneCurve;
use alphagrow_layer::{
    BufferId, ChannelId, LayerId, LayerKind, MaskInit, MergeMode, NewLayer, RasterSubstrate,
};
use log::{debug, warn};

/// Radius above which the dilation is unlikely to be what the caller
/// wants; larger values still work.
pub const SUGGESTED_MAX_RADIUS: u32 = 16;

/// Default dilation radius in pixels.
pub const DEFAULT_RADIUS: u32 = 8;

const ALPHA_BACKUP_NAME: &str = "Alpha Backup";
const ORIGINAL_BUFFER_NAME: &str = "orig_drawable";
const BACKGROUND_LAYER_NAME: &str = "bg";

/// Parameters for one run of the filter.
#[derive(Debug, Clone, PartialEq)]
pub struct DilateParams {
    /// Color for pixels beyond the dilation radius
    pub background: RgbColor,
    /// Number of dilation steps
    pub radius: u32,
    /// Offsets copied in each step
    pub kernel: Sel,
}

impl Default for DilateParams {
    fn default() -> Self {
        Self {
            background: RgbColor::WHITE,
            radius: DEFAULT_RADIUS,
            kernel: Sel::cross(),
        }
    }
}

/// What [`snapshot_alpha`] saves for the later stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlphaSnapshot {
    /// Canvas-sized copy of the layer's alpha, in the channel list
    pub channel: ChannelId,
    /// Copy of the layer's pixels and position
    pub original: BufferId,
}

/// Resize `layer` to the canvas and save its alpha and content.
///
/// A layer without alpha is treated as fully opaque.
pub fn snapshot_alpha<S>(surface: &mut S, layer: LayerId) -> MorphResult<AlphaSnapshot>
where
    S: RasterSubstrate + ?Sized,
{
    if !surface.layer_has_alpha(layer)? {
        warn!("{layer} has no alpha channel; treating it as fully opaque");
    }
    surface.resize_layer_to_canvas(layer)?;

    let channel = surface.channel_from_component(layer, RgbComponent::Alpha, ALPHA_BACKUP_NAME)?;
    surface.insert_channel(channel, 0)?;
    let original = surface.copy_named(layer, ORIGINAL_BUFFER_NAME)?;

    debug!("saved alpha of {layer} as {channel}, content as {original}");
    Ok(AlphaSnapshot { channel, original })
}

/// Put a canvas-sized layer of `color` under `layer` and merge.
pub fn add_background<S>(surface: &mut S, layer: LayerId, color: RgbColor) -> MorphResult<LayerId>
where
    S: RasterSubstrate + ?Sized,
{
    let (w, h) = surface.canvas_size();
    let bg = surface.new_layer(&NewLayer::new(w, h, LayerKind::Rgb, BACKGROUND_LAYER_NAME))?;
    let position = surface.layer_position(layer)?;
    surface.insert_layer(bg, position + 1)?;

    surface.set_foreground(color);
    surface.bucket_fill(bg)?;

    let merged = surface.merge_visible_layers(MergeMode::ExpandAsNecessary)?;
    debug!("filled background with {color}");
    Ok(merged)
}

/// Paste the saved content back over `layer` where it was copied from,
/// and merge.
pub fn restore_original<S>(
    surface: &mut S,
    layer: LayerId,
    snapshot: &AlphaSnapshot,
) -> MorphResult<LayerId>
where
    S: RasterSubstrate + ?Sized,
{
    let floating = surface.paste_floating(layer, snapshot.original)?;
    surface.floating_to_layer(floating)?;
    let merged = surface.merge_visible_layers(MergeMode::ExpandAsNecessary)?;
    debug!("restored original content");
    Ok(merged)
}

/// Flatten to the canvas and mask the result with the saved alpha,
/// softened by [`ToneCurve::alpha_softening`].
pub fn reconstruct_mask<S>(surface: &mut S, snapshot: &AlphaSnapshot) -> MorphResult<LayerId>
where
    S: RasterSubstrate + ?Sized,
{
    let layer = surface.flatten()?;
    surface.add_alpha(layer)?;

    surface.set_active_channel(snapshot.channel)?;
    let mask = surface.create_mask(layer, MaskInit::ActiveChannel)?;
    surface.attach_mask(layer, mask)?;
    surface.apply_curve(mask, &ToneCurve::alpha_softening())?;

    debug!("masked {layer} with {mask}");
    Ok(layer)
}

/// Dilate `layer` by `radius` pixels with the 4-connected cross and
/// fill the rest with `background`.
///
/// Returns the final layer, which replaces every visible layer of the
/// surface.
pub fn run<S>(
    surface: &mut S,
    layer: LayerId,
    background: RgbColor,
    radius: u32,
) -> MorphResult<LayerId>
where
    S: RasterSubstrate + ?Sized,
{
    let params = DilateParams {
        background,
        radius,
        kernel: Sel::cross(),
    };
    run_with(surface, layer, &params)
}

/// Run the filter with explicit parameters.
///
/// The whole run is one undo group. If any stage fails the group is
/// aborted, leaving the surface as it was, and the error is returned.
pub fn run_with<S>(surface: &mut S, layer: LayerId, params: &DilateParams) -> MorphResult<LayerId>
where
    S: RasterSubstrate + ?Sized,
{
    if params.radius > SUGGESTED_MAX_RADIUS {
        warn!(
            "radius {} exceeds the suggested maximum of {}",
            params.radius, SUGGESTED_MAX_RADIUS
        );
    }

    surface.begin_group()?;
    match run_stages(surface, layer, params) {
        Ok(result) => {
            surface.end_group()?;
            Ok(result)
        }
        Err(e) => {
            if let Err(abort) = surface.abort_group() {
                warn!("could not abort undo group: {abort}");
            }
            Err(e)
        }
    }
}

fn run_stages<S>(surface: &mut S, layer: LayerId, params: &DilateParams) -> MorphResult<LayerId>
where
    S: RasterSubstrate + ?Sized,
{
    debug!(
        "dilating {layer}: radius {}, kernel {}, background {}",
        params.radius, params.kernel, params.background
    );
    let snapshot = snapshot_alpha(surface, layer)?;
    let dilated = dilate(surface, layer, &params.kernel, params.radius)?;
    debug!("dilated by {} into {dilated}", params.radius);
    let filled = add_background(surface, dilated, params.background)?;
    restore_original(surface, filled, &snapshot)?;
    reconstruct_mask(surface, &snapshot)
}
