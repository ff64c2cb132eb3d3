//! Command-line front end: meshes files of SVG path data into vertex files.

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use meshmerize::io::{read_path_data, vertex_file_name, write_vertices, SimParams};
use meshmerize::path::{Document, PathMesh};
use meshmerize::tolerance::{spacing_report, DEFAULT_SPACING_TOLERANCE};
use meshmerize::{BoundingBox, MeshError};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "meshmerize", version)]
#[command(about = "Mesh SVG path data into evenly spaced vertices")]
#[command(arg_required_else_help = true)]
struct Args {
    /// Path-data files, one path per line ('#' starts a comment)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// IB2d input2d file providing Lx, Ly, Nx and Ny
    #[arg(long)]
    input2d: Option<PathBuf>,

    /// Target distance between vertices (overrides the input2d value)
    #[arg(short, long)]
    spacing: Option<f64>,

    /// Drawing bounds as "xmin ymin xmax ymax"
    #[arg(long, allow_hyphen_values = true, conflicts_with_all = ["width", "height"])]
    view_box: Option<String>,

    /// Drawing width; the height mirrors it when not given
    #[arg(long)]
    width: Option<f64>,

    /// Drawing height; the width mirrors it when not given
    #[arg(long)]
    height: Option<f64>,

    /// Map the drawing bounds onto the [0, Lx] x [0, Ly] simulation domain
    #[arg(long, requires = "input2d")]
    normalize: bool,

    /// Directory for .vertex files (defaults to each input's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Relative spacing error above which a gap is reported
    #[arg(long, default_value_t = DEFAULT_SPACING_TOLERANCE)]
    tolerance: f64,

    /// More logging (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Options resolved once and shared by every input file.
#[derive(Debug)]
struct Settings {
    spacing: f64,
    bounds: BoundingBox<f64>,
    domain: Option<BoundingBox<f64>>,
    output_dir: Option<PathBuf>,
    tolerance: f64,
}

impl Settings {
    fn from_args(args: &Args) -> Result<Self> {
        let params = match &args.input2d {
            Some(path) => Some(read_params(path)?),
            None => None,
        };

        let spacing = match (args.spacing, &params) {
            (Some(ds), _) => ds,
            (None, Some(p)) => p.spacing(),
            (None, None) => bail!("no spacing given; pass --spacing or --input2d"),
        };
        if !spacing.is_finite() || spacing <= 0.0 {
            bail!(MeshError::InvalidSpacing(spacing));
        }

        let bounds = match &args.view_box {
            Some(text) => text
                .parse::<BoundingBox<f64>>()
                .context("reading --view-box")?,
            None => BoundingBox::from_dimensions(args.width, args.height),
        };

        let domain = if args.normalize {
            params.as_ref().map(SimParams::domain)
        } else {
            None
        };

        log::debug!("spacing {}, bounds {}", spacing, bounds);

        Ok(Self {
            spacing,
            bounds,
            domain,
            output_dir: args.output_dir.clone(),
            tolerance: args.tolerance,
        })
    }

    fn output_path(&self, input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("mesh");
        let dir = match &self.output_dir {
            Some(dir) => dir.as_path(),
            None => input.parent().unwrap_or_else(|| Path::new("")),
        };
        dir.join(vertex_file_name(stem))
    }
}

fn read_params(path: &Path) -> Result<SimParams> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let params = SimParams::parse(&text).with_context(|| format!("parsing {}", path.display()))?;
    log::info!(
        "{}: Lx={} Ly={} Nx={} Ny={} ds={}",
        params.name.as_deref().unwrap_or("simulation"),
        params.lx,
        params.ly,
        params.nx,
        params.ny,
        params.spacing()
    );
    Ok(params)
}

fn process_file(input: &Path, settings: &Settings) -> Result<()> {
    let text =
        fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?;
    let sources = read_path_data(&text);

    let mut document = Document::parse(&sources, settings.bounds);
    if let Some(domain) = &settings.domain {
        document = document.map_to(domain);
    }

    let mesh = document.mesh(settings.spacing);
    for path in &mesh.paths {
        report_spacing(path, settings);
    }

    let vertices = mesh.points();
    let output = settings.output_path(input);
    let file =
        File::create(&output).with_context(|| format!("creating {}", output.display()))?;
    let mut writer = BufWriter::new(file);
    write_vertices(&mut writer, &vertices)
        .and_then(|()| writer.flush())
        .with_context(|| format!("writing {}", output.display()))?;
    log::info!("wrote {} vertices to {}", vertices.len(), output.display());

    let failed = document.failures.len() + mesh.failures.len();
    if failed > 0 {
        bail!("{} of {} paths could not be meshed", failed, sources.len());
    }
    Ok(())
}

/// Logs the spacing quality of one path and returns its violation count.
///
/// Each sub-path is checked on its own so the jump between sub-paths is
/// not counted as a gap.
fn report_spacing(mesh: &PathMesh<f64>, settings: &Settings) -> usize {
    let mut violations = 0;
    let mut worst: f64 = 0.0;

    for points in &mesh.subpaths {
        let report = spacing_report(points, settings.spacing, settings.tolerance);
        for &gap in &report.violations {
            let distance = points[gap].distance(points[gap + 1]);
            log::warn!(
                "path {}: spacing off by {:.5}% at vertex {}",
                mesh.index,
                100.0 * (distance - settings.spacing).abs() / settings.spacing,
                points[gap]
            );
        }
        violations += report.violations.len();
        worst = worst.max(report.max_relative_error);
    }

    log::info!(
        "path {}: {} vertices in {} sub-paths, max relative spacing error {:.3e}",
        mesh.index,
        mesh.len(),
        mesh.subpaths.len(),
        worst
    );
    violations
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let settings = match Settings::from_args(&args) {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("{:#}", err);
            return ExitCode::from(2);
        }
    };

    let mut failed = 0;
    for input in &args.files {
        if let Err(err) = process_file(input, &settings) {
            log::error!("{}: {:#}", input.display(), err);
            failed += 1;
        }
    }

    if failed > 0 {
        log::error!("{} of {} files failed", failed, args.files.len());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
