#![deny(unsafe_code)]
//! CLI binary for the wavy flow-field visualizer.
//!
//! Subcommands:
//! - `render [engine]`: run an engine for N frames, write the final canvas as PNG
//! - `list`: print available engines
//! - `schema [engine]`: print an engine's parameter schema

mod error;
mod params;

use clap::{Parser, Subcommand};
use error::CliError;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use wavy_core::{Canvas, Engine, Srgb};
use wavy_engines::{advance_frame, snapshot, EngineKind};

const DEFAULT_ENGINE: &str = "flow-field";

#[derive(Parser)]
#[command(name = "wavy", about = "Noise-driven flow-field visualizer")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run an engine for N frames and write a PNG snapshot.
    Render {
        /// Engine name.
        #[arg(default_value = DEFAULT_ENGINE)]
        engine: String,

        /// Canvas width in pixels.
        #[arg(short = 'W', long, default_value_t = 400)]
        width: usize,

        /// Canvas height in pixels.
        #[arg(short = 'H', long, default_value_t = 400)]
        height: usize,

        /// Number of frames to run.
        #[arg(short, long, default_value_t = 500)]
        frames: u64,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Background color as hex (e.g. "#000000").
        #[arg(short, long, default_value = "#000000")]
        background: String,

        /// Output file path.
        #[arg(short, long, default_value = "output.png")]
        output: PathBuf,

        /// Engine parameters as a JSON string; overrides --config.
        #[arg(long, default_value = "{}")]
        params: String,

        /// JSON file with engine parameters.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Also write intermediate frames into this directory.
        #[arg(long)]
        frame_dir: Option<PathBuf>,

        /// With --frame-dir, write every Nth frame.
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
        every: u64,
    },
    /// List available engines.
    List,
    /// Print an engine's parameter schema as JSON.
    Schema {
        /// Engine name.
        #[arg(default_value = DEFAULT_ENGINE)]
        engine: String,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Path of frame `index` inside `dir`, zero-padded so files sort in order.
fn frame_path(dir: &Path, index: u64) -> PathBuf {
    dir.join(format!("frame_{index:06}.png"))
}

struct RenderSummary {
    frames_written: u64,
    last_frame_commands: usize,
}

fn render(
    engine: &mut dyn Engine,
    canvas: &mut Canvas,
    frames: u64,
    output: &Path,
    frame_dir: Option<&Path>,
    every: u64,
) -> Result<RenderSummary, CliError> {
    if let Some(dir) = frame_dir {
        fs::create_dir_all(dir)
            .map_err(|e| CliError::Io(format!("{}: {e}", dir.display())))?;
    }

    let mut summary = RenderSummary {
        frames_written: 0,
        last_frame_commands: 0,
    };
    for frame in 1..=frames {
        summary.last_frame_commands = advance_frame(engine, canvas)?;
        if let Some(dir) = frame_dir {
            if frame % every == 0 {
                snapshot::write_png(canvas, &frame_path(dir, frame))?;
                summary.frames_written += 1;
            }
        }
        if frame % 100 == 0 {
            log::info!("frame {frame}/{frames}");
        }
    }

    snapshot::write_png(canvas, output)?;
    Ok(summary)
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let engines = EngineKind::list_engines();
            if cli.json {
                let info = serde_json::json!({ "engines": engines });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Engines:");
                for name in engines {
                    println!("  {name}");
                }
            }
        }
        Command::Schema { engine } => {
            let schema = EngineKind::schema_for(&engine)?;
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
        Command::Render {
            engine,
            width,
            height,
            frames,
            seed,
            background,
            output,
            params: inline_params,
            config,
            frame_dir,
            every,
        } => {
            let params = params::load(config.as_deref(), &inline_params)?;
            let background = Srgb::from_hex(&background)?;

            let mut eng = EngineKind::from_name(&engine, width, height, seed, &params)?;
            let mut canvas = Canvas::new(width, height, background)?;
            log::info!("rendering {engine} {width}x{height}, {frames} frames, seed {seed}");

            let summary = render(
                &mut eng,
                &mut canvas,
                frames,
                &output,
                frame_dir.as_deref(),
                every,
            )?;

            if cli.json {
                let info = serde_json::json!({
                    "engine": engine,
                    "width": width,
                    "height": height,
                    "frames": frames,
                    "seed": seed,
                    "background": background,
                    "output": output.display().to_string(),
                    "frames_written": summary.frames_written,
                    "points": summary.last_frame_commands,
                    "params": eng.params(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {engine} ({width}x{height}, {frames} frames, seed {seed}) -> {}",
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
