// ============================================================================
// alphagrow CLI: run the texture bleed filter on a PNG file
// ============================================================================
//
// Usage examples:
//   alphagrow -i sprite.png -o sprite_bled.png
//   alphagrow -i sprite.png -r 4 -b '#000000'
//   alphagrow -i tiles.png --kernel square --log-level debug

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use log::{error, info};
use thiserror::Error;

use alphagrow::io::{IoError, read_image, write_image};
use alphagrow::layer::{LayerError, Surface};
use alphagrow::morph::{DEFAULT_RADIUS, DilateParams, MorphError, Sel, run_with};
use alphagrow::{Pix, RgbColor};

/// Suffix appended to the input stem when no output path is given.
const DEFAULT_OUTPUT_SUFFIX: &str = "_bled";

/// Grow opaque colors into the transparent border of an image.
#[derive(Parser, Debug)]
#[command(
    name = "alphagrow",
    version,
    about = "Grow opaque colors into the transparent border of an image",
    long_about = "Bleeds the colors of opaque pixels outward into the transparent area,\n\
                  fills the rest with a background color and keeps the original alpha,\n\
                  so texture filtering no longer picks up dark fringes at edges.\n\n\
                  Example:\n  \
                  alphagrow -i sprite.png -o sprite_bled.png -r 8 -b '#ffffff'"
)]
pub struct CliArgs {
    /// Input PNG. Gray and RGB inputs are treated as fully opaque.
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Output PNG. Defaults to the input name with "_bled" appended.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Number of pixels to grow; values above 16 are slow.
    #[arg(short, long, default_value_t = DEFAULT_RADIUS)]
    pub radius: u32,

    /// Color of whatever the growth does not reach: '#rrggbb' or 'r,g,b' in 0..1.
    #[arg(short, long, default_value = "#ffffff", value_name = "COLOR")]
    pub background: RgbColor,

    /// Structuring element: cross (4-connected) or square (8-connected).
    #[arg(long, default_value = "cross", value_name = "KERNEL")]
    pub kernel: Sel,

    /// Log level or flexi_logger filter string; RUST_LOG takes precedence.
    #[arg(long, default_value = "info", value_name = "LEVEL")]
    pub log_level: String,
}

/// Errors raised while processing one file
#[derive(Error, Debug)]
pub enum CliError {
    #[error("image I/O: {0}")]
    Io(#[from] IoError),

    #[error("image: {0}")]
    Core(#[from] alphagrow::Error),

    #[error("layer stack: {0}")]
    Layer(#[from] LayerError),

    #[error("dilation: {0}")]
    Morph(#[from] MorphError),
}

/// Run the filter and return an OS exit code.
pub fn run(args: CliArgs) -> ExitCode {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input));

    let start = Instant::now();
    match run_one(&args, &output) {
        Ok(()) => {
            info!(
                "{} -> {} ({:.0}ms)",
                args.input.display(),
                output.display(),
                start.elapsed().as_secs_f64() * 1000.0
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}: {}", args.input.display(), e);
            ExitCode::FAILURE
        }
    }
}

fn run_one(args: &CliArgs, output: &Path) -> Result<(), CliError> {
    let pix = load_rgb(&args.input)?;
    let (mut surface, layer) = Surface::from_pix(pix, &layer_name(&args.input))?;

    let params = DilateParams {
        background: args.background,
        radius: args.radius,
        kernel: args.kernel.clone(),
    };
    let result = run_with(&mut surface, layer, &params)?;

    let out = surface.export_layer(result)?;
    write_image(&out, output)?;
    Ok(())
}

/// Read an image and bring it to 32 bpp.
fn load_rgb(path: &Path) -> Result<Pix, CliError> {
    let pix = read_image(path)?;
    Ok(pix.convert_to_32()?)
}

fn layer_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Background".to_string())
}

/// `dir/name.png` -> `dir/name_bled.png`
fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{stem}{DEFAULT_OUTPUT_SUFFIX}.png"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = CliArgs::parse_from(["alphagrow", "-i", "a.png"]);
        assert_eq!(args.radius, DEFAULT_RADIUS);
        assert_eq!(args.background, RgbColor::WHITE);
        assert_eq!(args.kernel, Sel::cross());
        assert_eq!(args.log_level, "info");
        assert!(args.output.is_none());
    }

    #[test]
    fn test_explicit_args() {
        let args = CliArgs::parse_from([
            "alphagrow",
            "--input",
            "in.png",
            "-o",
            "out.png",
            "-r",
            "3",
            "-b",
            "#000000",
            "--kernel",
            "square",
        ]);
        assert_eq!(args.output, Some(PathBuf::from("out.png")));
        assert_eq!(args.radius, 3);
        assert_eq!(args.background, RgbColor::BLACK);
        assert_eq!(args.kernel, Sel::square());
    }

    #[test]
    fn test_bad_background_is_rejected() {
        let res = CliArgs::try_parse_from(["alphagrow", "-i", "a.png", "-b", "#12"]);
        assert!(res.is_err());
        let res = CliArgs::try_parse_from(["alphagrow", "-i", "a.png", "--kernel", "disk"]);
        assert!(res.is_err());
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("art/hero.png")),
            PathBuf::from("art/hero_bled.png")
        );
    }

    #[test]
    fn test_run_one_writes_png() {
        let dir = std::env::temp_dir().join(format!("alphagrow-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let input = dir.join("dot.png");
        let output = dir.join("dot_out.png");

        let mut pm = Pix::new(5, 5, alphagrow::PixelDepth::Bit32).unwrap().to_mut();
        pm.set_rgba(2, 2, 9, 99, 199, 255).unwrap();
        write_image(&pm.into(), &input).unwrap();

        let args = CliArgs::parse_from([
            "alphagrow",
            "-i",
            input.to_str().unwrap(),
            "-r",
            "1",
            "-b",
            "#000000",
        ]);
        run_one(&args, &output).unwrap();

        let out = read_image(&output).unwrap();
        assert!(out.has_alpha());
        assert_eq!(out.get_rgba(2, 2), Some((9, 99, 199, 255)));
        assert_eq!(out.get_rgba(2, 1), Some((9, 99, 199, 0)));
        assert_eq!(out.get_rgba(0, 0), Some((0, 0, 0, 0)));
        std::fs::remove_dir_all(&dir).ok();
    }
}
