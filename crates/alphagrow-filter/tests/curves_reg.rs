//! Tone curve regression test
//!
//! Maps a horizontal gray ramp through the alpha softening curve and
//! through a two-point clamp curve.
//!
//! Run with:
//! ```
//! cargo test -p alphagrow-filter --test curves_reg
//! ```

use alphagrow_core::{Pix, PixelDepth};
use alphagrow_filter::{ToneCurve, apply_curve};
use alphagrow_test::RegParams;

fn ramp() -> Pix {
    let mut pm = Pix::new(256, 8, PixelDepth::Bit8).unwrap().to_mut();
    for y in 0..8 {
        for x in 0..256 {
            pm.set_pixel(x, y, x).unwrap();
        }
    }
    pm.into()
}

#[test]
fn curves_reg() {
    let mut rp = RegParams::new("curves");
    let src = ramp();

    let soft = ToneCurve::alpha_softening();
    let out = apply_curve(&src, &soft).unwrap();
    rp.write_pix(&out, "softened").unwrap();

    rp.compare_values(0.0, out.get_pixel(0, 3).unwrap() as f64, 0.0);
    rp.compare_values(160.0, out.get_pixel(96, 3).unwrap() as f64, 0.0);
    rp.compare_values(255.0, out.get_pixel(255, 3).unwrap() as f64, 0.0);

    // Every row is the same ramp, so every row maps the same way.
    let lut = soft.lut();
    let mut mismatches = 0;
    let mut darkened = 0;
    for y in 0..8 {
        for x in 0..256 {
            let v = out.get_pixel(x, y).unwrap();
            if v != lut[x as usize] as u32 {
                mismatches += 1;
            }
            if v < x {
                darkened += 1;
            }
        }
    }
    rp.compare_values(0.0, mismatches as f64, 0.0);
    rp.compare_values(0.0, darkened as f64, 0.0);

    // Mapping through the identity curve is exact.
    let same = apply_curve(&src, &ToneCurve::identity()).unwrap();
    rp.compare_pix(&src, &same);

    let clamp = ToneCurve::new(&[(64, 32), (192, 224)]).unwrap();
    let clamped = apply_curve(&src, &clamp).unwrap();
    rp.write_pix(&clamped, "clamped").unwrap();
    rp.compare_values(32.0, clamped.get_pixel(10, 0).unwrap() as f64, 0.0);
    rp.compare_values(224.0, clamped.get_pixel(250, 0).unwrap() as f64, 0.0);

    assert!(rp.cleanup(), "curves regression test failed");
}
