#![deny(unsafe_code)]
//! CLI binary for the flow-fields visualizer.
//!
//! Subcommands:
//! - `render`: run the simulation N frames headless, write PNG
//! - `config`: print the effective settings or the parameter schema
//! - `set <key> <value>`: edit one persisted setting

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use flow_fields_core::{
    BlendMode, FixedStepClock, FrameLoop, MemoryStore, SettingsStore, Simulation,
    SimulationConfig, TrailMode,
};
use flow_fields_export::snapshot::{export_file_name_now, write_png};
use flow_fields_export::JsonFileStore;
use log::info;
use serde_json::Value;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "flow-fields", about = "Noise flow-field particle visualizer")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Settings file. Without it, settings are not persisted.
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the simulation for N frames and write a PNG of the last one.
    Render {
        /// Display width in pixels.
        #[arg(short = 'W', long, default_value_t = 800)]
        width: usize,

        /// Display height in pixels.
        #[arg(short = 'H', long, default_value_t = 600)]
        height: usize,

        /// Number of frames to simulate.
        #[arg(short, long, default_value_t = 120)]
        frames: u64,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Frame rate of the simulated clock.
        #[arg(long, default_value_t = 60.0)]
        fps: f64,

        /// Setting edits applied before rendering, as key=value.
        /// Values are JSON; anything else is taken as a string.
        #[arg(long = "set", value_name = "KEY=VALUE")]
        edits: Vec<String>,

        /// Keep fading trails, retaining this fraction per frame (0 to 1).
        #[arg(long, value_name = "RETAIN")]
        trails: Option<f32>,

        /// Point blending: additive or normal.
        #[arg(long, default_value = "additive")]
        blend: String,

        /// Camera zoom.
        #[arg(long)]
        zoom: Option<f32>,

        /// Output file path. Defaults to fields-<unix millis>.png.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the effective settings.
    Config {
        /// Print the parameter schema instead.
        #[arg(long)]
        schema: bool,
    },
    /// Change one persisted setting.
    Set {
        /// Setting key (e.g. "noiseScale").
        key: String,

        /// New value; JSON, or a bare string.
        value: String,
    },
}

fn open_store(path: Option<PathBuf>) -> Box<dyn SettingsStore> {
    match path {
        Some(path) => Box::new(JsonFileStore::new(path)),
        None => Box::new(MemoryStore::new()),
    }
}

/// Reads a control value: JSON if it parses, otherwise a string.
fn parse_value(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Splits `key=value`.
fn parse_assignment(text: &str) -> Result<(&str, Value), CliError> {
    match text.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key, parse_value(value))),
        _ => Err(CliError::bad_assignment(text)),
    }
}

fn parse_blend(name: &str) -> Result<BlendMode, CliError> {
    serde_json::from_value(Value::String(name.to_string()))
        .map_err(|_| CliError::unknown_blend(name))
}

fn print_config(config: &SimulationConfig, json: bool) -> Result<(), CliError> {
    let raw = config.serialize();
    if json {
        println!("{}", serde_json::to_string_pretty(&raw)?);
    } else if let Value::Object(map) = raw {
        for (key, value) in map {
            println!("{key} = {value}");
        }
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut store = open_store(cli.settings);

    match cli.command {
        Command::Config { schema } => {
            if schema {
                let schema = SimulationConfig::schema();
                println!("{}", serde_json::to_string_pretty(&schema)?);
            } else {
                print_config(&SimulationConfig::from_store(&*store), cli.json)?;
            }
        }
        Command::Set { key, value } => {
            let config =
                SimulationConfig::from_store(&*store).edit(&key, parse_value(&value))?;
            store.save(&config.serialize())?;
            print_config(&config, cli.json)?;
        }
        Command::Render {
            width,
            height,
            frames,
            seed,
            fps,
            edits,
            trails,
            blend,
            zoom,
            output,
        } => {
            let blend = parse_blend(&blend)?;
            let mut sim = Simulation::from_store(&*store, width, height, seed)?;

            if !edits.is_empty() {
                let mut config = *sim.config();
                for edit in &edits {
                    let (key, value) = parse_assignment(edit)?;
                    config = config.edit(key, value)?;
                }
                sim.on_config_changed(config, &mut *store)?;
            }
            if let Some(zoom) = zoom {
                sim.set_zoom(zoom);
            }
            let compositor = sim.compositor_mut();
            compositor.set_blend_mode(blend);
            if let Some(retain) = trails {
                compositor.set_trail_mode(TrailMode::fade(retain));
            }

            let mut clock = FixedStepClock::new(fps);
            let ran = FrameLoop::new().run(&mut sim, &mut clock, frames);
            let frame = if ran == 0 {
                sim.render()
            } else {
                sim.compositor().frame()
            };

            let output = output.unwrap_or_else(|| PathBuf::from(export_file_name_now()));
            write_png(frame, &output)?;
            info!("rendered {ran} frames");

            if cli.json {
                let info = serde_json::json!({
                    "width": width,
                    "height": height,
                    "frames": ran,
                    "seed": seed,
                    "config": sim.config().serialize(),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {} particles ({width}x{height}, {ran} frames, seed {seed}) -> {}",
                    sim.store().len(),
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            eprintln!("{}", serde_json::to_string_pretty(&e.to_json()).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
