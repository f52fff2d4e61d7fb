//! Lithophane builder CLI
//!
//! Decodes an image, runs the lithophane pipeline and reports what it built.
//!
//! # Usage
//!
//! - `litho photo.jpg` - 120 mm flat panel, height from the image aspect
//! - `litho photo.jpg --shape arc-cylinder --radius 50 --arc-degrees 200`
//! - `litho photo.jpg --border-width 3 --border-height 2 --json`
//! - `litho photo.jpg --heightmap-png preview.png` - also write the preview
//!
//! Set `RUST_LOG=debug` for per-stage sizes.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use mesh_heightmap::{RasterSample, auto_enhance, center_crop};
use mesh_lithophane::{
    BorderSpec, BuildMetrics, DEFAULT_ARC_DEGREES, DEFAULT_CURVE_STRENGTH, DEFAULT_RADIUS_MM,
    LithophaneBuild, PanelSpec, ShapeSpec, build_mesh,
};
use mesh_types::MeshTopology;
use serde::Serialize;
use tracing::{debug, info};

/// Build a lithophane mesh from an image
#[derive(Parser, Debug)]
#[command(name = "litho")]
#[command(about = "Turn an image into a lithophane relief", long_about = None)]
#[command(version)]
struct Cli {
    /// Input image (PNG, JPEG, BMP or GIF)
    #[arg(name = "IMAGE")]
    image: PathBuf,

    /// Panel width in mm
    #[arg(long, default_value_t = 120.0)]
    width_mm: f64,

    /// Panel height in mm (defaults to the image aspect ratio)
    #[arg(long)]
    height_mm: Option<f64>,

    /// Heightmap samples per mm
    #[arg(long, default_value_t = 2.0)]
    ppm: f64,

    /// Tone curve exponent
    #[arg(long, default_value_t = 1.0)]
    gamma: f64,

    /// Make bright areas thick instead of thin
    #[arg(long)]
    invert: bool,

    /// Flip the image vertically before sampling
    #[arg(long)]
    flip: bool,

    /// Box blur radius in heightmap pixels
    #[arg(long, default_value_t = 0)]
    blur: usize,

    /// Thickness of the brightest areas in mm
    #[arg(long, default_value_t = 0.8)]
    min_thickness: f64,

    /// Thickness of the darkest areas in mm
    #[arg(long, default_value_t = 3.2)]
    max_thickness: f64,

    /// Frame band width in mm (0 disables the frame)
    #[arg(long, default_value_t = 0.0)]
    border_width: f64,

    /// Frame depth in mm (0 disables the frame)
    #[arg(long, default_value_t = 0.0)]
    border_height: f64,

    /// Output shape
    #[arg(long, value_enum, default_value_t = ShapeKind::Flat)]
    shape: ShapeKind,

    /// Wrap radius in mm for the cylinder shapes
    #[arg(long, default_value_t = DEFAULT_RADIUS_MM)]
    radius: f64,

    /// Arc covered by the panel for arc-cylinder and stand-arc
    #[arg(long, default_value_t = DEFAULT_ARC_DEGREES)]
    arc_degrees: f64,

    /// Ripple amplitude in mm for the wave shape
    #[arg(long, default_value_t = 0.0)]
    amplitude: f64,

    /// Curve exponent for custom-curve
    #[arg(long, default_value_t = DEFAULT_CURVE_STRENGTH)]
    strength: f64,

    /// Center-crop the image to the panel aspect ratio
    #[arg(long)]
    crop: bool,

    /// Stretch image contrast to the full range before sampling
    #[arg(long)]
    enhance: bool,

    /// Write the grayscale heightmap preview to this PNG
    #[arg(long, value_name = "PATH")]
    heightmap_png: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

/// Shape selector on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ShapeKind {
    Flat,
    Cylinder,
    ArcCylinder,
    StandArc,
    Dome,
    Wave,
    CustomCurve,
    Heart,
    BoxLamp,
}

impl Cli {
    fn shape_spec(&self) -> ShapeSpec {
        match self.shape {
            ShapeKind::Flat => ShapeSpec::Flat,
            ShapeKind::Cylinder => ShapeSpec::Cylinder {
                radius_mm: self.radius,
            },
            ShapeKind::ArcCylinder => ShapeSpec::ArcCylinder {
                radius_mm: self.radius,
                arc_degrees: self.arc_degrees,
            },
            ShapeKind::StandArc => ShapeSpec::StandArc {
                radius_mm: self.radius,
                arc_degrees: self.arc_degrees,
            },
            ShapeKind::Dome => ShapeSpec::Dome,
            ShapeKind::Wave => ShapeSpec::Wave {
                amplitude_mm: self.amplitude,
            },
            ShapeKind::CustomCurve => ShapeSpec::CustomCurve {
                strength: self.strength,
            },
            ShapeKind::Heart => ShapeSpec::Heart,
            ShapeKind::BoxLamp => ShapeSpec::BoxLamp,
        }
    }

    /// Panel settings; height follows `aspect` unless given explicitly.
    fn panel_spec(&self, aspect: f64) -> PanelSpec {
        let height_mm = self.height_mm.unwrap_or(self.width_mm / aspect);
        PanelSpec::new(self.width_mm, height_mm)
            .with_pixels_per_mm(self.ppm)
            .with_gamma(self.gamma)
            .with_invert(self.invert)
            .with_flip_vertical(self.flip)
            .with_blur_radius(self.blur)
            .with_thickness(self.min_thickness, self.max_thickness)
    }

    const fn border_spec(&self) -> BorderSpec {
        BorderSpec::new(self.border_width, self.border_height)
    }
}

/// Everything `--json` prints.
#[derive(Debug, Serialize)]
struct Report<'a> {
    image: &'a Path,
    panel: &'a PanelSpec,
    border: &'a BorderSpec,
    shape: &'a ShapeSpec,
    heightmap_px: [usize; 2],
    vertex_count: usize,
    metrics: &'a BuildMetrics,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    if !cli.width_mm.is_finite() || cli.width_mm <= 0.0 {
        bail!("--width-mm must be positive, got {}", cli.width_mm);
    }

    let raster = load_raster(&cli.image)?;
    let panel = cli.panel_spec(raster.aspect_ratio());
    let raster = prepare_raster(raster, cli, &panel)?;
    let border = cli.border_spec();
    let shape = cli.shape_spec();

    let build = build_mesh(&raster, &panel, &border, &shape)
        .with_context(|| format!("Failed to build {shape} lithophane"))?;

    if let Some(path) = &cli.heightmap_png {
        build
            .heightmap
            .to_preview_image()
            .save(path)
            .with_context(|| format!("Failed to write heightmap preview {}", path.display()))?;
        info!("Wrote heightmap preview to {}", path.display());
    }

    if cli.json {
        let report = Report {
            image: &cli.image,
            panel: &panel,
            border: &border,
            shape: &shape,
            heightmap_px: [build.heightmap.width(), build.heightmap.height()],
            vertex_count: build.mesh.vertex_count(),
            metrics: &build.metrics,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(cli, &shape, &build);
    }

    Ok(())
}

fn load_raster(path: &Path) -> Result<RasterSample> {
    let decoded =
        image::open(path).with_context(|| format!("Failed to decode {}", path.display()))?;
    let raster = RasterSample::from_dynamic(&decoded)
        .with_context(|| format!("Unusable image {}", path.display()))?;
    debug!("Loaded {}x{} image", raster.width(), raster.height());
    Ok(raster)
}

fn prepare_raster(raster: RasterSample, cli: &Cli, panel: &PanelSpec) -> Result<RasterSample> {
    let raster = if cli.crop {
        center_crop(&raster, panel.width_mm / panel.height_mm).context("Failed to crop image")?
    } else {
        raster
    };
    Ok(if cli.enhance {
        auto_enhance(&raster)
    } else {
        raster
    })
}

fn print_summary(cli: &Cli, shape: &ShapeSpec, build: &LithophaneBuild) {
    println!("Lithophane: {}", cli.image.display());
    println!("  Shape:     {shape}");
    println!(
        "  Heightmap: {} x {} px",
        build.heightmap.width(),
        build.heightmap.height()
    );
    println!("  Vertices:  {}", build.mesh.vertex_count());
    println!("{}", build.metrics);
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("litho").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_follow_library() {
        let cli = parse(&["in.png"]);
        assert_eq!(cli.shape_spec(), ShapeSpec::Flat);
        assert!(!cli.border_spec().is_enabled());

        let panel = cli.panel_spec(2.0);
        assert_eq!(panel.width_mm, 120.0);
        assert_eq!(panel.height_mm, 60.0);
        assert_eq!(panel.thickness_range(), (0.8, 3.2));
    }

    #[test]
    fn explicit_height_wins_over_aspect() {
        let cli = parse(&["in.png", "--width-mm", "80", "--height-mm", "50"]);
        let panel = cli.panel_spec(4.0);
        assert_eq!(panel.height_mm, 50.0);
    }

    #[test]
    fn shape_flags_map_to_spec() {
        let cli = parse(&[
            "in.png",
            "--shape",
            "arc-cylinder",
            "--radius",
            "40",
            "--arc-degrees",
            "90",
        ]);
        assert_eq!(
            cli.shape_spec(),
            ShapeSpec::ArcCylinder {
                radius_mm: 40.0,
                arc_degrees: 90.0
            }
        );

        let cli = parse(&["in.png", "--shape", "wave", "--amplitude", "1.5"]);
        assert_eq!(cli.shape_spec(), ShapeSpec::Wave { amplitude_mm: 1.5 });

        let cli = parse(&["in.png", "--shape", "box-lamp"]);
        assert_eq!(cli.shape_spec(), ShapeSpec::BoxLamp);
    }

    #[test]
    fn every_shape_kind_parses() {
        for kind in ShapeKind::value_variants() {
            let name = kind.to_possible_value().unwrap().get_name().to_string();
            let cli = parse(&["in.png", "--shape", &name]);
            assert_eq!(cli.shape, *kind);
            assert_eq!(cli.shape_spec().name(), name);
        }
    }

    #[test]
    fn crop_and_enhance_prepare_raster() {
        let cli = parse(&["in.png", "--crop", "--enhance", "--height-mm", "60"]);
        let rgba = (0..40u32 * 20)
            .flat_map(|i| {
                let c = u8::try_from(50 + i % 100).unwrap();
                [c, c, c, 255]
            })
            .collect();
        let raster = RasterSample::from_rgba(40, 20, rgba).unwrap();
        let panel = cli.panel_spec(raster.aspect_ratio());

        let prepared = prepare_raster(raster, &cli, &panel).unwrap();
        // 120 x 60 panel is 2:1, same as the image
        assert_eq!((prepared.width(), prepared.height()), (40, 20));
        assert_eq!(prepared.pixel(0, 0)[0], 0);
    }

    #[test]
    fn missing_image_is_an_error() {
        let cli = parse(&["does/not/exist.png"]);
        assert!(run(&cli).is_err());
    }
}
