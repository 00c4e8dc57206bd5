use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use halftone_lines::assembly::Alignment;
use halftone_lines::canvas::Color;
use halftone_lines::{HalftoneConfig, Mode};

/// Generate halftone images with lines
#[derive(Debug, Parser)]
#[command(name = "halftone-lines", version, about)]
struct Cli {
    /// Input image (any format the decoder recognises from its contents)
    file: PathBuf,

    /// Output file; defaults to out-<FILE> next to the input
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TOML file with default settings; flags override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Side in pixels of each output square (default 20)
    #[arg(short, long)]
    side: Option<u32>,

    /// Side in pixels of each kernel (default 0.7% of the shorter image dimension)
    #[arg(short, long)]
    kernel: Option<u32>,

    /// Background color as (r,g,b) (default white)
    #[arg(long = "bg-color", alias = "bg_color")]
    bg_color: Option<Color>,

    /// Line color as (r,g,b) (default black)
    #[arg(long = "fg-color", alias = "fg_color")]
    fg_color: Option<Color>,

    /// Padding added above and below every line slice, greater than 0 (default 1.2)
    #[arg(short, long)]
    alpha: Option<f64>,

    /// Orientation of the lines in degrees (default 20)
    #[arg(long, allow_negative_numbers = true)]
    angle: Option<f64>,

    /// Points per transition between line slices, at least 2 (default 10)
    #[arg(short = 'n', long)]
    smoothness: Option<usize>,

    /// Steepness of the transitions between line slices (default 8)
    #[arg(long)]
    steepness: Option<f64>,

    /// Renderer
    #[arg(long, value_enum)]
    mode: Option<Mode>,

    /// Placement of the rotated lines on the canvas
    #[arg(long, value_enum)]
    align: Option<Alignment>,

    /// Disable progress messages
    #[arg(long = "no-verbose", alias = "nv")]
    no_verbose: bool,

    /// Disable adaptive histogram equalisation
    #[arg(long = "no-contrast", alias = "no_contrast")]
    no_contrast: bool,

    /// Log debug details
    #[arg(long)]
    debug: bool,

    /// Print the effective settings as TOML and exit
    #[arg(long)]
    print_config: bool,
}

impl Cli {
    /// Flags given on the command line replace file or default values
    fn apply(&self, config: &mut HalftoneConfig) {
        if let Some(side) = self.side {
            config.side = side;
        }
        if self.kernel.is_some() {
            config.kernel = self.kernel;
        }
        if let Some(color) = self.bg_color {
            config.bg_color = color;
        }
        if let Some(color) = self.fg_color {
            config.fg_color = color;
        }
        if let Some(alpha) = self.alpha {
            config.alpha = alpha;
        }
        if let Some(angle) = self.angle {
            config.angle = angle;
        }
        if let Some(smoothness) = self.smoothness {
            config.smoothness = smoothness;
        }
        if let Some(steepness) = self.steepness {
            config.steepness = steepness;
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(align) = self.align {
            config.align = align;
        }
        if self.no_verbose {
            config.verbose = false;
        }
        if self.no_contrast {
            config.contrast = false;
        }
    }
}

#[allow(clippy::print_stdout)]
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => HalftoneConfig::from_file(path)?,
        None => HalftoneConfig::default(),
    };
    cli.apply(&mut config);

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    // Set log level based on flags
    let log_level = if cli.debug {
        tracing::Level::DEBUG
    } else if config.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(log_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::debug!("Debug logging enabled");

    match halftone_lines::run(&cli.file, cli.output.as_deref(), &config)
        .with_context(|| format!("failed to render {}", cli.file.display()))
    {
        Ok(path) => {
            tracing::debug!("Wrote {}", path.display());
            Ok(())
        }
        Err(e) => {
            tracing::error!("{e:#}");
            Err(e)
        }
    }
}
