//! Replays a detections dump through the line counter.
//!
//! Every input line is `<timestamp seconds>:<json array of detections>`, one
//! line per frame, e.g. `0.04:[{"x1":10,"y1":20,"x2":50,"y2":90,"p":0.8,"c":0}]`.
//! Per-track records go to stdout as JSON lines, the final summary to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use crosstrack::{Config, Detection, Frame, LineCounter, Tracking};
use log::{info, warn};
use std::io::{BufRead, BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "count", about = "Count objects crossing a line in a detections dump")]
struct Args {
    /// Detections dump, one frame per line
    input: PathBuf,
    /// JSON configuration (tracker, line position, class map)
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value_t = 1280)]
    width: u32,
    #[arg(long, default_value_t = 720)]
    height: u32,
    /// Drop detections whose class is not in the class map
    #[arg(long)]
    known_only: bool,
}

fn parse_line(line: &str) -> Option<(f32, Vec<Detection>)> {
    let idx = line.find(':')?;
    let (ts, vector) = line.split_at(idx);

    match (ts.trim().parse::<f32>(), serde_json::from_str(&vector[1..])) {
        (Ok(ts), Ok(dets)) => Some((ts, dets)),
        (Ok(_), Err(err)) => {
            warn!("wrong line format: parse json failed: {}", err);
            None
        }
        _ => {
            warn!("wrong line format: parse timestamp failed");
            None
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::from_path(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default(),
    };

    for (class, label) in config.classes.iter() {
        info!("class {:>3} -> {}", class, label);
    }

    let src = args
        .input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "input".to_string());

    let file = std::fs::File::open(&args.input)
        .with_context(|| format!("failed to open {}", args.input.display()))?;

    let classes = config.classes.clone();
    let mut counter = LineCounter::new(config)?;
    let mut out = BufWriter::new(std::io::stdout().lock());
    let mut index = 0;

    for line in std::io::BufReader::new(file).lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let Some((timestamp, mut detections)) = parse_line(&line) else {
            continue;
        };

        if args.known_only {
            detections.retain(|d| classes.contains(d.class));
        }

        index += 1;
        let frame = Frame {
            index,
            dims: (args.width, args.height),
            detections,
            timestamp,
        };

        for record in counter.update(std::slice::from_ref(&frame), &src)? {
            serde_json::to_writer(&mut out, &record)?;
            writeln!(out)?;
        }
    }

    out.flush()?;

    info!("processed {} frames from `{}`", index, src);

    if let Some(stats) = counter.finish(&src) {
        eprintln!("\n=========== FINAL SUMMARY ===========");
        eprintln!("{}", stats);
    }

    Ok(())
}
