//! Dilation by duplicate, translate and merge
//!
//! Instead of examining neighbourhoods pixel by pixel, one dilation step
//! stacks shifted copies of the layer and lets the substrate's "over"
//! compositing take the union of their coverage:
//!
//! 1. Each offset of the [`Sel`] gets a copy, made from the previous copy
//!    and moved by the difference between the two offsets.
//! 2. Copies are inserted below every layer that existed before the step,
//!    each new copy directly above the previous one.
//! 3. All visible layers are merged with [`MergeMode::ExpandAsNecessary`],
//!    so nothing that grows past the canvas edge is cut off.
//!
//! A pixel of the result is covered iff the layer covers it or covers it
//! after any of the offsets, which is a binary dilation by the SEL plus
//! its origin. Colors are not blended between neighbours: where copies
//! overlap, the unshifted layer wins, then the most recently made copy.

use crate::{MorphResult, Sel};
use alphagrow_layer::{LayerId, MergeMode, RasterSubstrate};
use log::trace;

/// Grow the occupied region of `layer` once by `sel`.
///
/// Returns the merged layer, which replaces `layer` and every other
/// visible layer.
///
/// # Errors
///
/// Propagates any substrate failure, e.g. if `layer` is not in the stack.
pub fn dilate_once<S>(surface: &mut S, layer: LayerId, sel: &Sel) -> MorphResult<LayerId>
where
    S: RasterSubstrate + ?Sized,
{
    surface.layer_position(layer)?;
    let base = surface.layer_count();

    let mut prev = layer;
    for (dx, dy) in sel.steps() {
        let copy = surface.duplicate_layer(prev)?;
        surface.insert_layer(copy, base)?;
        surface.translate_layer(copy, dx, dy)?;
        prev = copy;
    }

    Ok(surface.merge_visible_layers(MergeMode::ExpandAsNecessary)?)
}

/// Grow the occupied region of `layer` by `radius` steps of `sel`.
///
/// With the default cross this covers every pixel within Manhattan
/// distance `radius` of the original coverage. A radius of 0 leaves the
/// surface untouched and returns `layer`.
pub fn dilate<S>(surface: &mut S, layer: LayerId, sel: &Sel, radius: u32) -> MorphResult<LayerId>
where
    S: RasterSubstrate + ?Sized,
{
    let mut current = layer;
    for i in 0..radius {
        current = dilate_once(surface, current, sel)?;
        trace!("dilation step {}/{} -> {}", i + 1, radius, current);
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alphagrow_core::{Pix, PixelDepth, color};
    use alphagrow_layer::Surface;

    const A: u32 = 0xff00_00ff;
    const B: u32 = 0x0000_ffff;

    fn covered(surface: &Surface, layer: LayerId, x: i32, y: i32) -> bool {
        let l = surface.layer(layer).unwrap();
        let (ox, oy) = l.offset();
        let (lx, ly) = (x - ox, y - oy);
        if lx < 0 || ly < 0 {
            return false;
        }
        l.pix()
            .get_pixel(lx as u32, ly as u32)
            .is_some_and(|p| color::alpha(p) > 0)
    }

    #[test]
    fn test_dilate_once_cross() {
        let mut pm = Pix::new(5, 5, PixelDepth::Bit32).unwrap().to_mut();
        pm.set_pixel(2, 2, A).unwrap();
        let (mut s, l) = Surface::from_pix(pm.into(), "dot").unwrap();

        let out = dilate_once(&mut s, l, &Sel::cross()).unwrap();
        assert_eq!(s.layer_count(), 1);
        assert_eq!(s.layer(out).unwrap().offset(), (-1, -1));
        // The merged layer keeps the bottom layer's name.
        assert_eq!(s.layer(out).unwrap().name(), "dot copy");

        for y in 0..5 {
            for x in 0..5 {
                let d = (x - 2i32).abs() + (y - 2i32).abs();
                assert_eq!(covered(&s, out, x, y), d <= 1, "at ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_later_copies_win() {
        let mut pm = Pix::new(5, 3, PixelDepth::Bit32).unwrap().to_mut();
        pm.set_pixel(1, 1, A).unwrap();
        pm.set_pixel(3, 1, B).unwrap();
        let (mut s, l) = Surface::from_pix(pm.into(), "pair").unwrap();

        let out = dilate_once(&mut s, l, &Sel::cross()).unwrap();
        let layer = s.layer(out).unwrap();
        let (ox, oy) = layer.offset();
        // (2, 1) is reached by A moved right and by B moved left; left is
        // the later copy.
        let px = layer.pix().get_pixel((2 - ox) as u32, (1 - oy) as u32);
        assert_eq!(px, Some(B));
        // Original pixels stay on top.
        let px = layer.pix().get_pixel((1 - ox) as u32, (1 - oy) as u32);
        assert_eq!(px, Some(A));
    }

    #[test]
    fn test_radius_zero_is_noop() {
        let pix = Pix::new(3, 3, PixelDepth::Bit32).unwrap();
        let (mut s, l) = Surface::from_pix(pix, "l").unwrap();
        assert_eq!(dilate(&mut s, l, &Sel::cross(), 0).unwrap(), l);
        assert_eq!(s.stack(), &[l]);
    }

    #[test]
    fn test_square_kernel() {
        let mut pm = Pix::new(5, 5, PixelDepth::Bit32).unwrap().to_mut();
        pm.set_pixel(2, 2, A).unwrap();
        let (mut s, l) = Surface::from_pix(pm.into(), "dot").unwrap();

        let out = dilate(&mut s, l, &Sel::square(), 2).unwrap();
        assert_eq!(s.layer(out).unwrap().offset(), (-2, -2));
        for y in 0..5 {
            for x in 0..5 {
                assert!(covered(&s, out, x, y), "at ({x}, {y})");
            }
        }
        assert!(!covered(&s, out, 5, 2));
    }

    #[test]
    fn test_layer_must_be_in_stack() {
        let pix = Pix::new(3, 3, PixelDepth::Bit32).unwrap();
        let (mut s, l) = Surface::from_pix(pix, "l").unwrap();
        let loose = s.duplicate_layer(l).unwrap();
        assert!(dilate_once(&mut s, loose, &Sel::cross()).is_err());
    }
}
