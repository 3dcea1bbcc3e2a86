use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use easel::config::Config;
use easel::draw::CanvasSurface;
use easel::filter::{Adjustments, NEUTRAL};
use easel::image::decode_png;
use easel::input::InputState;
use easel::script::{Script, ScriptCanvas};

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("EASEL_GIT_HASH"), ")");

#[derive(Parser, Debug)]
#[command(name = "easel")]
#[command(version, long_version = LONG_VERSION, about = "Raster drawing engine with a headless session runner")]
struct Cli {
    /// Read settings from this file instead of ~/.config/easel/config.toml
    #[arg(long, short = 'c', value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a TOML session script and write the resulting canvas as PNG
    Replay {
        /// Script to replay
        script: PathBuf,

        /// Where to write the PNG
        #[arg(long, short = 'o', value_name = "PNG")]
        output: PathBuf,
    },

    /// Apply brightness / contrast / saturation to a PNG file
    Filter {
        /// Source PNG
        input: PathBuf,

        /// Brightness percentage (0-200, 100 = unchanged)
        #[arg(long, default_value_t = NEUTRAL)]
        brightness: f64,

        /// Contrast percentage (0-200, 100 = unchanged)
        #[arg(long, default_value_t = NEUTRAL)]
        contrast: f64,

        /// Saturation percentage (0-200, 100 = unchanged)
        #[arg(long, default_value_t = NEUTRAL)]
        saturation: f64,

        /// Where to write the PNG
        #[arg(long, short = 'o', value_name = "PNG")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Some(Command::Replay { script, output }) => {
            let config = load_config(cli.config.as_deref())?;
            replay(&config, &script, &output).await?;
        }
        Some(Command::Filter {
            input,
            brightness,
            contrast,
            saturation,
            output,
        }) => {
            let adjustments = Adjustments::new(brightness, contrast, saturation);
            filter_file(&input, adjustments, &output)?;
        }
        None => {
            println!("easel: raster drawing engine");
            println!();
            println!("Usage:");
            println!("  easel replay <script.toml> --output <out.png>");
            println!("  easel filter <in.png> --brightness 120 --output <out.png>");
            println!("  easel --help");
            println!();
            println!("Settings are read from ~/.config/easel/config.toml when present.");
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

async fn replay(config: &Config, script_path: &Path, output: &Path) -> Result<()> {
    let script = Script::load(script_path)?;
    let base_dir = script_path.parent().unwrap_or_else(|| Path::new("."));

    let mut editor = InputState::new(config.tool_state());
    let summary = script
        .run(&mut editor, ScriptCanvas::from(&config.canvas), base_dir)
        .await?;
    if summary.rejected_properties > 0 {
        log::warn!(
            "{} property changes were rejected",
            summary.rejected_properties
        );
    }

    let png = editor
        .surface()
        .export_png()
        .context("Failed to encode canvas")?;
    fs::write(output, png).with_context(|| format!("Failed to write {}", output.display()))?;
    log::info!("Wrote {}", output.display());
    Ok(())
}

fn filter_file(input: &Path, adjustments: Adjustments, output: &Path) -> Result<()> {
    let bytes = fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let mut pixels =
        decode_png(&bytes).with_context(|| format!("Failed to decode {}", input.display()))?;

    adjustments.apply(&mut pixels);

    let mut surface = CanvasSurface::new();
    if !surface.resize(pixels.width() as f64, pixels.height() as f64, 1.0) {
        anyhow::bail!("{} has no pixels", input.display());
    }
    surface.put_buffer(&pixels)?;
    let png = surface.export_png().context("Failed to encode PNG")?;
    fs::write(output, png).with_context(|| format!("Failed to write {}", output.display()))?;

    log::info!(
        "Applied {} to {} -> {}",
        adjustments.css_filter(),
        input.display(),
        output.display()
    );
    Ok(())
}
