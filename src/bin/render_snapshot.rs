//! Render a JSON snapshot as wrapped text
//!
//! Loads either a DOM snapshot (a `RawElement` tree) or a list of positioned
//! containers and prints the resulting lines.
//!
//! Usage:
//!   cargo run --bin render_snapshot -- page.json
//!   cargo run --bin render_snapshot -- page.json --width 60 --title "Home"
//!   cargo run --bin render_snapshot -- boxes.json --containers --config engine.json

use readflow::config::EngineConfig;
use readflow::linearize::{Container, ViewBuilder};
use readflow::raw::RawElement;
use readflow::structure::DocumentBuilder;
use readflow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

struct RenderConfig {
    input: Option<PathBuf>,
    config: Option<PathBuf>,
    width: Option<usize>,
    title: String,
    containers: bool,
}

impl RenderConfig {
    fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();
        let mut config = Self {
            input: None,
            config: None,
            width: None,
            title: String::new(),
            containers: false,
        };

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--width" | "-w" => {
                    i += 1;
                    if i < args.len() {
                        config.width = args[i].parse().ok();
                    }
                },
                "--title" => {
                    i += 1;
                    if i < args.len() {
                        config.title = args[i].clone();
                    }
                },
                "--config" => {
                    i += 1;
                    if i < args.len() {
                        config.config = Some(PathBuf::from(&args[i]));
                    }
                },
                "--containers" => {
                    config.containers = true;
                },
                other if !other.starts_with('-') => {
                    config.input = Some(PathBuf::from(other));
                },
                other => {
                    eprintln!("Ignoring unknown option {}", other);
                },
            }
            i += 1;
        }
        config
    }
}

fn load_engine_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::from_json(&fs::read_to_string(path)?),
        None => Ok(EngineConfig::default()),
    }
}

fn render(args: &RenderConfig, input: &Path) -> Result<Vec<String>> {
    let mut engine = load_engine_config(args.config.as_deref())?;
    let json = fs::read_to_string(input)?;

    if args.containers {
        if let Some(width) = args.width {
            engine.linearize = engine.linearize.with_target_width(width);
        }
        let containers: Vec<Container> = serde_json::from_str(&json)?;
        let view = ViewBuilder::new(engine.linearize).linearize(containers)?;
        let mut lines = Vec::new();
        if !args.title.is_empty() {
            lines.push(args.title.clone());
        }
        lines.extend(view.lines());
        return Ok(lines);
    }

    let raw = RawElement::from_json(&json)?;
    let mut doc = DocumentBuilder::with_config(engine.builder)
        .build_document(&raw, &args.title)
        .with_view_config(engine.view);
    doc.build_view(args.width.unwrap_or(engine.linearize.target_width))?;
    if !doc.check_consistency(false) {
        log::warn!("document view is inconsistent");
    }
    Ok((0..doc.line_count()).filter_map(|i| doc.line(i)).collect())
}

fn main() -> ExitCode {
    env_logger::init();

    let args = RenderConfig::from_args();
    let Some(input) = args.input.clone() else {
        eprintln!("Usage: render_snapshot <snapshot.json> [--width N] [--title T] [--config FILE] [--containers]");
        return ExitCode::FAILURE;
    };

    match render(&args, &input) {
        Ok(lines) => {
            for line in lines {
                println!("{}", line);
            }
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        },
    }
}
