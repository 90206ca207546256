//! Texture bleed regression test
//!
//! Runs the whole filter on small sprites and checks the exported RGBA:
//! color bled into the transparent border, background beyond it, and a
//! mask that reproduces the source alpha.
//!
//! Run with:
//! ```
//! cargo test -p alphagrow-morph --test bleed_reg
//! ```

use alphagrow_core::{Pix, RgbColor, RgbComponent, color};
use alphagrow_filter::{ToneCurve, apply_curve};
use alphagrow_layer::Surface;
use alphagrow_morph::run;
use alphagrow_test::RegParams;
use alphagrow_test::fixtures::{count_rgb, manhattan_to_opaque, single_pixel, soft_disk};

const GREEN: (u8, u8, u8) = (10, 200, 30);
const DISK: (u8, u8, u8) = (220, 120, 40);

fn bleed(src: Pix, background: RgbColor, radius: u32) -> (Pix, Pix) {
    let (mut s, layer) = Surface::from_pix(src, "sprite").expect("surface");
    let out = run(&mut s, layer, background, radius).expect("run");
    let flat = s.layer(out).expect("final layer").pix().clone();
    let exported = s.export_layer(out).expect("export");
    (flat, exported)
}

#[test]
fn bleed_single_pixel_reg() {
    let mut rp = RegParams::new("bleed_single_pixel");

    let src = single_pixel(4, 4, 2, 2, (GREEN.0, GREEN.1, GREEN.2, 255)).unwrap();
    let (flat, exported) = bleed(src, RgbColor::BLACK, 1);
    rp.write_pix(&flat, "flat").unwrap();
    rp.write_pix(&exported, "exported").unwrap();

    // The pixel and its four neighbours carry the color, the rest is black.
    rp.compare_values(5.0, count_rgb(&flat, GREEN) as f64, 0.0);
    rp.compare_values(11.0, count_rgb(&flat, (0, 0, 0)) as f64, 0.0);
    for (x, y) in [(2, 2), (2, 1), (1, 2), (3, 2), (2, 3)] {
        let rgb = color::extract_rgb(flat.get_pixel(x, y).unwrap());
        rp.compare_values(1.0, if rgb == GREEN { 1.0 } else { 0.0 }, 0.0);
    }

    // Only the source pixel survives in the exported alpha.
    rp.compare_values(1.0, if exported.has_alpha() { 1.0 } else { 0.0 }, 0.0);
    let mut visible = 0;
    for y in 0..4 {
        for x in 0..4 {
            if color::alpha(exported.get_pixel(x, y).unwrap()) > 0 {
                visible += 1;
            }
        }
    }
    rp.compare_values(1.0, visible as f64, 0.0);
    rp.compare_values(255.0, color::alpha(exported.get_pixel(2, 2).unwrap()) as f64, 0.0);

    assert!(rp.cleanup(), "bleed_single_pixel regression test failed");
}

#[test]
fn bleed_soft_edge_reg() {
    let mut rp = RegParams::new("bleed_soft_edge");

    let src = soft_disk(24, 24, 12.0, 12.0, 5.0, DISK).unwrap();
    let white = RgbColor::WHITE;
    let radius = 3;
    let (flat, exported) = bleed(src.clone(), white, radius);
    rp.write_pix(&flat, "flat").unwrap();
    rp.write_pix(&exported, "exported").unwrap();

    // Exported alpha is the source alpha passed through the softening curve.
    let src_alpha = src.get_rgb_component(RgbComponent::Alpha).unwrap();
    let softened = apply_curve(&src_alpha, &ToneCurve::alpha_softening()).unwrap();
    let exported_alpha = exported.get_rgb_component(RgbComponent::Alpha).unwrap();
    rp.compare_pix(&softened, &exported_alpha);

    let mut opaque_changed = 0;
    let mut far_not_bg = 0;
    for y in 0..24 {
        for x in 0..24 {
            let (r, g, b, a) = src.get_rgba(x, y).unwrap();
            let rgb = color::extract_rgb(flat.get_pixel(x, y).unwrap());
            if a == 255 && rgb != (r, g, b) {
                opaque_changed += 1;
            }
            let d = manhattan_to_opaque(&src, x, y).unwrap_or(u32::MAX);
            if d > radius && rgb != (255, 255, 255) {
                far_not_bg += 1;
            }
        }
    }
    rp.compare_values(0.0, opaque_changed as f64, 0.0);
    rp.compare_values(0.0, far_not_bg as f64, 0.0);

    // The bled ring is wider than the disk itself.
    let disk_pixels = (0..24u32)
        .flat_map(|y| (0..24u32).map(move |x| (x, y)))
        .filter(|&(x, y)| color::alpha(src.get_pixel(x, y).unwrap()) == 255)
        .count();
    let bled = count_rgb(&flat, DISK) as usize;
    rp.compare_values(1.0, if bled > disk_pixels { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "bleed_soft_edge regression test failed");
}

#[test]
fn bleed_repeatable_reg() {
    let mut rp = RegParams::new("bleed_repeatable");

    for radius in [0, 2] {
        let make = || soft_disk(16, 16, 8.0, 8.0, 4.0, DISK).unwrap();
        let bg = RgbColor::from_rgb8(30, 30, 30);
        let (_, first) = bleed(make(), bg, radius);
        let (_, second) = bleed(make(), bg, radius);
        rp.compare_pix(&first, &second);
    }

    assert!(rp.cleanup(), "bleed_repeatable regression test failed");
}
