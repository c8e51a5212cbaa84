use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use eink7_dither::{DistanceMetric, KernelKind, Palette};
use sevenink::models::{AppConfig, Overrides, CONFIG_ENV_VAR};
use sevenink::services::{self, ImagePipeline, Mode, PipelineReport};

#[derive(Parser)]
#[command(name = "sevenink")]
#[command(about = "Sevenink - dither images for seven-color e-ink panels")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Dither a PNG onto the palette with error diffusion
    Dither {
        /// Input PNG file path
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Diffusion kernel: "fs" (Floyd-Steinberg) or "jjn" (Jarvis-Judice-Ninke)
        #[arg(short, long)]
        kernel: Option<KernelKind>,

        /// Color distance: "simplified-ciede2000", "cie76" or "rgb"
        #[arg(short, long)]
        metric: Option<DistanceMetric>,

        /// Also write the input and the result side by side to this PNG
        #[arg(long, value_name = "FILE")]
        compare: Option<PathBuf>,

        /// Boost saturation, contrast and brightness before dithering
        #[arg(long)]
        enhance: bool,

        /// Scan every row left-to-right
        #[arg(long)]
        no_serpentine: bool,

        /// YAML config file (defaults to $SEVENINK_CONFIG)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Map each pixel to its nearest palette color, without diffusion
    Quantize {
        /// Input PNG file path
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Color distance: "simplified-ciede2000", "cie76" or "rgb"
        #[arg(short, long)]
        metric: Option<DistanceMetric>,

        /// YAML config file (defaults to $SEVENINK_CONFIG)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the palette and optionally write a preview swatch
    Palette {
        /// Preview PNG file path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Preview width in pixels
        #[arg(long, default_value_t = 700)]
        width: usize,

        /// Preview height in pixels
        #[arg(long, default_value_t = 100)]
        height: usize,

        /// YAML config file (defaults to $SEVENINK_CONFIG)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the most common colors of a PNG
    Analyze {
        /// Input PNG file path
        #[arg(short, long)]
        input: PathBuf,

        /// Number of colors to list
        #[arg(short, long, default_value_t = 10)]
        top: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sevenink=info,eink7_dither=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    match cli.command {
        Some(Commands::Dither {
            input,
            output,
            kernel,
            metric,
            compare,
            enhance,
            no_serpentine,
            config,
        }) => {
            let overrides = Overrides {
                kernel,
                metric,
                no_serpentine,
                enhance,
            };
            run_map_command(
                &input,
                &output,
                compare.as_deref(),
                config.as_deref(),
                &overrides,
                Mode::Dither,
            )
        }
        Some(Commands::Quantize {
            input,
            output,
            metric,
            config,
        }) => {
            let overrides = Overrides {
                metric,
                ..Default::default()
            };
            run_map_command(
                &input,
                &output,
                None,
                config.as_deref(),
                &overrides,
                Mode::Quantize,
            )
        }
        Some(Commands::Palette {
            output,
            width,
            height,
            config,
        }) => run_palette_command(output.as_deref(), width, height, config.as_deref()),
        Some(Commands::Analyze { input, top }) => run_analyze_command(&input, top),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    AppConfig::load(path).context("Failed to load configuration")
}

/// Dither or quantize one PNG file
fn run_map_command(
    input: &Path,
    output: &Path,
    compare: Option<&Path>,
    config: Option<&Path>,
    overrides: &Overrides,
    mode: Mode,
) -> anyhow::Result<()> {
    let config = load_config(config)?.with_overrides(overrides);
    let mut pipeline = ImagePipeline::from_config(&config)?;

    let report = pipeline
        .process_file(input, output, mode, compare)
        .with_context(|| format!("Failed to process {}", input.display()))?;

    println!(
        "Wrote {} ({}x{}, {} bytes)",
        output.display(),
        report.width,
        report.height,
        report.bytes
    );
    if let Some(compare) = compare {
        println!("Wrote comparison {}", compare.display());
    }
    print_color_usage(pipeline.palette(), &report);
    Ok(())
}

fn print_color_usage(palette: &Palette, report: &PipelineReport) {
    let total = (report.width * report.height).max(1) as f64;
    for (idx, &count) in report.color_counts.iter().enumerate() {
        if count == 0 {
            continue;
        }
        println!(
            "  {:<8} {}  {:>6.2}%",
            palette.name(idx).unwrap_or("-"),
            palette.color(idx),
            count as f64 * 100.0 / total
        );
    }
}

/// Print the palette and optionally write a preview swatch
fn run_palette_command(
    output: Option<&Path>,
    width: usize,
    height: usize,
    config: Option<&Path>,
) -> anyhow::Result<()> {
    let palette = load_config(config)?.palette()?;

    println!("Palette ({} colors):", palette.len());
    for idx in 0..palette.len() {
        let lab = palette.lab(idx);
        println!(
            "  {idx}  {:<8} {}  L={:6.2} a={:7.2} b={:7.2}",
            palette.name(idx).unwrap_or("-"),
            palette.color(idx),
            lab.l,
            lab.a,
            lab.b
        );
    }

    if let Some(output) = output {
        let bytes = services::write_preview(&palette, output, width, height)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        println!("\nWrote {} ({bytes} bytes)", output.display());
    }
    Ok(())
}

/// Print the most common colors of a PNG
fn run_analyze_command(input: &Path, top: usize) -> anyhow::Result<()> {
    let (image, colors) = services::analyze_file(input, top)
        .with_context(|| format!("Failed to analyze {}", input.display()))?;

    let total = (image.width * image.height).max(1) as f64;
    println!(
        "{} ({}x{}), top {} colors:",
        input.display(),
        image.width,
        image.height,
        colors.len()
    );
    for entry in &colors {
        println!(
            "  {}  {:>8}  {:>6.2}%",
            entry.color,
            entry.count,
            entry.count as f64 * 100.0 / total
        );
    }
    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config_file = std::env::var(CONFIG_ENV_VAR).ok();

    println!("Sevenink v{VERSION}");
    println!("Dither images for seven-color e-ink panels\n");

    println!("Environment Variables:");
    println!(
        "  {CONFIG_ENV_VAR} = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );

    println!("\nDefaults:");
    println!("  Palette: {} colors", Palette::eink7().len());
    println!("  Kernel:  {}", KernelKind::default());
    println!("  Metric:  {}", DistanceMetric::default());

    println!("\nCommands:");
    println!("  sevenink dither    Dither a PNG with error diffusion");
    println!("  sevenink quantize  Map a PNG to the nearest palette colors");
    println!("  sevenink palette   Print the palette / write a swatch");
    println!("  sevenink analyze   List the most common colors of a PNG");
    println!("\nRun 'sevenink --help' for more details.");
}
