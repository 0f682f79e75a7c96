//! imtools - image analysis and logo preparation CLI
//!
//! Accent colors, average color, trim, resize, blur and colorize.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "imtools")]
#[command(author, version, about = "Image analysis and logo preparation")]
#[command(long_about = "
Analyzes images for their accent and average colors and prepares logos for
display: trim borders, resize, blur, recolor, convert.

Examples:
  imtools info logo.png                       # Format, size, alpha
  imtools accents logo.png -n 3 --max-brightness 200
  imtools accents photo.jpg --trim --json
  imtools average photo.jpg
  imtools trim logo.png -o trimmed.png --fuzz 0.05
  imtools resize logo.png -o thumb.png -w 128 -H 128
  imtools blur photo.jpg -o soft.jpg --sigma 4 --gaussian
  imtools colorize logo.png -o logo-white.png --shade white
  imtools convert logo.png -o logo.jpg --background '#ffffff'
  imtools color '#f0a' 336699
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,

    /// Analyzer config file (YAML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Display image information
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Extract accent colors
    #[command(visible_alias = "a")]
    Accents(AccentsArgs),

    /// Compute the average color
    Average(AverageArgs),

    /// Trim uniform borders
    Trim(TrimArgs),

    /// Resize image
    #[command(visible_alias = "r")]
    Resize(ResizeArgs),

    /// Apply blur filter
    Blur(BlurArgs),

    /// Recolor towards black or white
    Colorize(ColorizeArgs),

    /// Convert image format
    #[command(visible_alias = "c")]
    Convert(ConvertArgs),

    /// Inspect hex colors: RGB, brightness, saturation
    Color(ColorArgs),
}

#[derive(Args)]
struct InfoArgs {
    /// Input image(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Machine-readable output (JSON)
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct AccentsArgs {
    /// Input image
    input: PathBuf,

    /// Number of colors to request
    #[arg(short = 'n', long)]
    count: Option<usize>,

    /// Longest side of the analyzed sample
    #[arg(short, long)]
    sample_size: Option<u32>,

    /// Drop colors at or above this perceived brightness (0-255)
    #[arg(short = 'b', long, allow_negative_numbers = true)]
    max_brightness: Option<f64>,

    /// Trim borders before analyzing
    #[arg(long)]
    trim: bool,

    /// Machine-readable output (JSON)
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct AverageArgs {
    /// Input image
    input: PathBuf,

    /// Machine-readable output (JSON)
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct TrimArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Color tolerance (0-1)
    #[arg(long)]
    fuzz: Option<f64>,

    /// Output format (default: from output extension)
    #[arg(short, long)]
    format: Option<String>,
}

#[derive(Args)]
struct ResizeArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Target width
    #[arg(short, long)]
    width: u32,

    /// Target height
    #[arg(short = 'H', long)]
    height: u32,

    /// Filter: nearest, bilinear, bicubic, gaussian, lanczos
    #[arg(short, long, default_value = "lanczos")]
    filter: String,

    /// Stretch to exactly width x height instead of fitting inside
    #[arg(long)]
    exact: bool,

    /// Output format (default: from output extension)
    #[arg(long)]
    format: Option<String>,
}

#[derive(Args)]
struct BlurArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Blur strength
    #[arg(short, long, default_value = "8")]
    sigma: f32,

    /// Window radius in pixels (0 = from sigma)
    #[arg(short, long, default_value = "0")]
    radius: u32,

    /// Gaussian kernel instead of box
    #[arg(short, long)]
    gaussian: bool,

    /// Output format (default: from output extension)
    #[arg(long)]
    format: Option<String>,
}

#[derive(Args)]
struct ColorizeArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Target shade: black, white
    #[arg(short, long, default_value = "black")]
    shade: String,

    /// Output format (default: from output extension)
    #[arg(long)]
    format: Option<String>,
}

#[derive(Args)]
struct ConvertArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Output format (default: from output extension)
    #[arg(short, long)]
    format: Option<String>,

    /// Background for formats without alpha (hex)
    #[arg(short, long)]
    background: Option<String>,
}

#[derive(Args)]
struct ColorArgs {
    /// Hex colors (`#rgb`, `rrggbb`, ...)
    #[arg(required = true)]
    hex: Vec<String>,

    /// Machine-readable output (JSON)
    #[arg(long)]
    json: bool,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    let config = commands::load_config(cli.config.as_deref())?;
    let verbose = cli.verbose;

    match cli.command {
        Commands::Info(args) => commands::info::run(args, verbose, &config),
        Commands::Accents(args) => commands::accents::run(args, verbose, &config),
        Commands::Average(args) => commands::average::run(args, verbose, &config),
        Commands::Trim(args) => commands::trim::run(args, verbose, &config),
        Commands::Resize(args) => commands::resize::run(args, verbose, &config),
        Commands::Blur(args) => commands::blur::run(args, verbose, &config),
        Commands::Colorize(args) => commands::colorize::run(args, verbose, &config),
        Commands::Convert(args) => commands::convert::run(args, verbose, &config),
        Commands::Color(args) => commands::color::run(args),
    }
}
