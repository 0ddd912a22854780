//! dip - classical digital image processing exercises
//!
//! Each subcommand runs one exercise over raw (or PNG) inputs and writes
//! the results as PNG files.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use dip_ops::order::WindowFilter;
use dip_ops::sharpen::LaplacianScaling;
use dip_ops::spectrum::FrequencyResponse;
use dip_ops::BorderMode;

mod commands;

#[derive(Parser)]
#[command(name = "dip")]
#[command(author, version, about = "Classical digital image processing exercises")]
#[command(long_about = "
Runs classical image processing exercises on headerless raw images.
Raw inputs default to 640x480 8-bit; PNG inputs are detected automatically.
Every result is written as <stem>_<suffix>.png into the output directory.

Examples:
  dip resample cat.raw -o out                 # subsample by 4 and 16, interpolate back
  dip gamma cat.raw --gamma 0.4,2.5 -o out    # power-law transforms and curve chart
  dip equalize 'data/*.raw' -o out            # histogram equalization
  dip smooth cat.raw --size 11 -o out         # 11x11 mean and median
  dip sharpen triangle.raw -o out             # Laplacian sharpening
  dip spectrum triangle.raw -o out            # log-magnitude DFT
  dip response -o out                         # |H(u,v)| of two 3x3 masks
  dip denoise stripes.raw --size 256x256 -f midpoint
  dip deblur triangle.raw -k 0.001 -o out     # Gaussian blur + inverse filter
  dip bands triangle.raw -o out               # scaled RGB bands, filtered
  dip antialias -o out                        # point-sampled vs box-filtered edge
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,

    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Subsample and interpolate back with nearest neighbor
    Resample(ResampleArgs),

    /// Power-law (gamma) transforms
    Gamma(GammaArgs),

    /// Histogram equalization
    #[command(visible_alias = "eq")]
    Equalize(EqualizeArgs),

    /// Mean and median smoothing
    Smooth(SmoothArgs),

    /// Laplacian sharpening
    Sharpen(SharpenArgs),

    /// Log-magnitude DFT
    #[command(visible_alias = "dft")]
    Spectrum(SpectrumArgs),

    /// Frequency responses of the averaging and Laplacian masks
    Response(ResponseArgs),

    /// Order-statistic and mean filters at several window sizes
    Denoise(DenoiseArgs),

    /// Gaussian degradation and inverse filtering
    Deblur(DeblurArgs),

    /// Compose scaled color bands and filter each band
    Bands(BandsArgs),

    /// Render a half-plane with point sampling and box filtering
    Antialias(AntialiasArgs),
}

/// Stored sample width of raw inputs.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum Depth {
    /// 8-bit samples
    #[default]
    #[value(name = "8")]
    U8,
    /// 16-bit samples (high byte kept)
    #[value(name = "16")]
    U16,
}

/// Byte order of 16-bit raw samples.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum Endian {
    /// Little endian
    #[default]
    Le,
    /// Big endian
    Be,
}

/// Rounding of power-law table entries.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum RoundingArg {
    /// Drop the fraction
    #[default]
    Truncate,
    /// Round to nearest
    Nearest,
}

/// Smoothing filter of the smoothing exercise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum SmoothKind {
    /// Box average
    Mean,
    /// Median
    Median,
}

fn parse_size(s: &str) -> Result<(u32, u32), String> {
    dip_io::RawSpec::parse_size(s).map_err(|e| e.to_string())
}

/// Geometry of headerless raw inputs.
#[derive(Args, Clone, Debug)]
struct RawArgs {
    /// Raw image size as WIDTHxHEIGHT
    #[arg(long, default_value = "640x480", value_parser = parse_size)]
    size: (u32, u32),

    /// Raw sample depth in bits
    #[arg(long, value_enum, default_value = "8")]
    depth: Depth,

    /// Raw byte order for 16-bit samples
    #[arg(long, value_enum, default_value = "le")]
    byte_order: Endian,
}

/// Inputs and output location shared by the image exercises.
#[derive(Args, Clone, Debug)]
struct InputArgs {
    /// Input files or glob patterns
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Output directory
    #[arg(short = 'o', long, default_value = ".")]
    out_dir: PathBuf,

    #[command(flatten)]
    raw: RawArgs,
}

#[derive(Args)]
struct ResampleArgs {
    #[command(flatten)]
    io: InputArgs,

    /// Subsampling factors
    #[arg(short, long, value_delimiter = ',', default_value = "4,16")]
    factors: Vec<u32>,
}

#[derive(Args)]
struct GammaArgs {
    #[command(flatten)]
    io: InputArgs,

    /// Gamma values
    #[arg(short, long, value_delimiter = ',', default_value = "0.4,2.5")]
    gamma: Vec<f64>,

    /// Rounding of table entries
    #[arg(long, value_enum, default_value = "truncate")]
    rounding: RoundingArg,
}

#[derive(Args)]
struct EqualizeArgs {
    #[command(flatten)]
    io: InputArgs,
}

#[derive(Args)]
struct SmoothArgs {
    #[command(flatten)]
    io: InputArgs,

    /// Filters to run
    #[arg(short, long, value_enum, value_delimiter = ',', default_value = "mean,median")]
    filter: Vec<SmoothKind>,

    /// Window size (positive odd)
    #[arg(short, long, default_value = "11")]
    window: usize,

    /// Border mode (constant[:v], replicate, reflect, reflect101, wrap)
    #[arg(long, default_value = "replicate")]
    border: BorderMode,
}

#[derive(Args)]
struct SharpenArgs {
    #[command(flatten)]
    io: InputArgs,

    /// How the Laplacian is scaled to 0..255 (saturate, shift)
    #[arg(long, default_value = "saturate")]
    scaling: LaplacianScaling,

    /// Border mode of the Laplacian
    #[arg(long, default_value = "constant")]
    border: BorderMode,
}

#[derive(Args)]
struct SpectrumArgs {
    #[command(flatten)]
    io: InputArgs,
}

#[derive(Args)]
struct ResponseArgs {
    /// Output directory
    #[arg(short = 'o', long, default_value = ".")]
    out_dir: PathBuf,

    /// Transform size as MxN
    #[arg(long, default_value = "256x256", value_parser = parse_size)]
    grid: (u32, u32),

    /// Responses to render (averaging, laplacian)
    #[arg(short, long, value_delimiter = ',', default_value = "averaging,laplacian")]
    response: Vec<FrequencyResponse>,
}

#[derive(Args)]
struct DenoiseArgs {
    #[command(flatten)]
    io: InputArgs,

    /// Filter: arithmetic, geometric, harmonic, contraharmonic_pos,
    /// contraharmonic_neg, contraharmonic:<q>, median, max, min, midpoint
    #[arg(short, long, default_value = "median")]
    filter: WindowFilter,

    /// Window sizes (positive odd)
    #[arg(short, long, value_delimiter = ',', default_value = "3,7,9")]
    windows: Vec<usize>,

    /// Border mode
    #[arg(long, default_value = "reflect")]
    border: BorderMode,
}

#[derive(Args)]
struct DeblurArgs {
    #[command(flatten)]
    io: InputArgs,

    /// PSF side length (positive odd)
    #[arg(long, default_value = "31")]
    psf_size: usize,

    /// PSF standard deviation
    #[arg(long, default_value = "7.0")]
    sigma: f32,

    /// Regularization constant K (0 = plain inverse filter)
    #[arg(short, long, default_value = "0.001")]
    k: f64,
}

#[derive(Args)]
struct BandsArgs {
    #[command(flatten)]
    io: InputArgs,

    /// R, G, B scale factors
    #[arg(long, value_delimiter = ',', default_value = "1.0,0.5,0.2")]
    factors: Vec<f64>,

    /// Low-pass PSF side length (positive odd)
    #[arg(long, default_value = "31")]
    psf_size: usize,

    /// Low-pass PSF standard deviation
    #[arg(long, default_value = "7.0")]
    sigma: f32,
}

#[derive(Args)]
struct AntialiasArgs {
    /// Output directory
    #[arg(short = 'o', long, default_value = ".")]
    out_dir: PathBuf,

    /// Grid size as WIDTHxHEIGHT
    #[arg(long, default_value = "10x10", value_parser = parse_size)]
    grid: (u32, u32),

    /// Edge slope
    #[arg(long, default_value = "0.3", allow_negative_numbers = true)]
    slope: f64,

    /// Edge intercept
    #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
    intercept: f64,

    /// Sub-pixel samples per axis for the box filter
    #[arg(long, default_value = "100")]
    subsamples: u32,

    /// Foreground level
    #[arg(long, default_value = "255")]
    fg: u8,

    /// Background level
    #[arg(long, default_value = "0")]
    bg: u8,

    /// Pixel replication factor of the written images
    #[arg(long, default_value = "32")]
    scale: u32,
}

/// Installs the tracing subscriber.
///
/// `RUST_LOG` wins; otherwise the level follows `-v`. The returned guard
/// flushes the file sink on drop.
fn init_tracing(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let console = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            (Some(fmt::layer().with_ansi(false).with_writer(writer)), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;
    Ok(guard)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_tracing(cli.verbose, cli.log_file.as_deref())?;

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    dispatch(cli.command, cli.verbose)
}

/// Runs one subcommand.
fn dispatch(command: Commands, verbose: u8) -> Result<()> {
    match command {
        Commands::Resample(args) => commands::resample::run(args, verbose),
        Commands::Gamma(args) => commands::gamma::run(args, verbose),
        Commands::Equalize(args) => commands::equalize::run(args, verbose),
        Commands::Smooth(args) => commands::smooth::run(args, verbose),
        Commands::Sharpen(args) => commands::sharpen::run(args, verbose),
        Commands::Spectrum(args) => commands::spectrum::run(args, verbose),
        Commands::Response(args) => commands::response::run(args, verbose),
        Commands::Denoise(args) => commands::denoise::run(args, verbose),
        Commands::Deblur(args) => commands::deblur::run(args, verbose),
        Commands::Bands(args) => commands::bands::run(args, verbose),
        Commands::Antialias(args) => commands::antialias::run(args, verbose),
    }
}
