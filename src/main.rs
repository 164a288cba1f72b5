//! Entry point for the lorem scroll demo.
//!
//! Responsibilities here are intentionally minimal:
//! - Parse command-line arguments.
//! - Load user configuration from `conf/config.toml`.
//! - Replay a scroll trace through a session and print what it generated, or
//!   print a one-off sentence, chunk or paragraph set.

mod clipboard;
mod config;
mod error;
mod feed;
mod random;
mod scroll;
mod session;
mod telemetry;
mod text_generator;
mod text_utils;
mod viewport;
mod word_bank;

use crate::clipboard::{ClipboardManager, ClipboardSink, FileSink, StdoutSink};
use crate::config::{AppConfig, load_config};
use crate::scroll::{Clock, SystemClock};
use crate::session::{ScrollTrace, SessionReport, run_session};
use crate::text_generator::{create_text_generator, generate_lorem_sentence, generate_lorem_text};
use crate::text_utils::text_stats;
use anyhow::{Context, Result, anyhow};
use std::env;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

const USAGE: &str = "Usage: lorem-scroll [--config <path>] [--trace <path>] [--seconds <n>] \
[--speed <px/s>] [--copy-to <path|->] [--json] [--chunk | --sentence <words> | --paragraphs <n>]";

/// What to print. Everything but `Session` skips the scroll replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Session,
    Chunk,
    Sentence(usize),
    Paragraphs(usize),
}

#[derive(Debug)]
struct Args {
    mode: Mode,
    config_path: PathBuf,
    trace_path: Option<PathBuf>,
    seconds: f64,
    speed: f64,
    copy_to: Option<PathBuf>,
    json: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            mode: Mode::Session,
            config_path: PathBuf::from("conf/config.toml"),
            trace_path: None,
            seconds: 10.0,
            speed: 1200.0,
            copy_to: None,
            json: false,
        }
    }
}

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let args = parse_args(env::args().skip(1))?;
    let config = load_config(&args.config_path);
    set_log_level(reload_handle, config.log_level.as_filter_str());
    info!(
        config = %args.config_path.display(),
        level = %config.log_level,
        seed = %config.seed,
        mode = %config.generation_mode,
        "Starting lorem scroll"
    );

    if args.mode != Mode::Session {
        return print_generated(&config, args.mode);
    }

    let trace = match &args.trace_path {
        Some(path) => ScrollTrace::load(path)?,
        None => {
            info!(
                seconds = args.seconds,
                speed = args.speed,
                "Using synthetic scroll trace"
            );
            ScrollTrace::synthetic(args.seconds, args.speed, config.scroll_debounce_ms.max(1) as f64)?
        }
    };

    let wall = SystemClock::default();
    let report = run_session(&config, &trace).context("Scroll session failed")?;
    info!(wall_ms = wall.now_ms(), "Replay complete");
    log_summary(&report);

    if let Some(target) = &args.copy_to {
        let result = if target.as_os_str() == "-" {
            copy_report(StdoutSink, &report)
        } else {
            copy_report(FileSink::new(target), &report)
        };
        if !result {
            warn!(target = %target.display(), "Copy did not complete");
        }
    }

    print_report(&report, args.json)
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let mut parsed = Args::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => parsed.config_path = PathBuf::from(value(&mut args, &arg)?),
            "--trace" => parsed.trace_path = Some(PathBuf::from(value(&mut args, &arg)?)),
            "--seconds" => parsed.seconds = number(&mut args, &arg)?,
            "--speed" => parsed.speed = number(&mut args, &arg)?,
            "--copy-to" => parsed.copy_to = Some(PathBuf::from(value(&mut args, &arg)?)),
            "--json" => parsed.json = true,
            "--chunk" => parsed.mode = Mode::Chunk,
            "--sentence" => parsed.mode = Mode::Sentence(count(&mut args, &arg)?),
            "--paragraphs" => parsed.mode = Mode::Paragraphs(count(&mut args, &arg)?),
            "-h" | "--help" => return Err(anyhow!(USAGE)),
            other => return Err(anyhow!("Unknown argument: {other}\n{USAGE}")),
        }
    }
    Ok(parsed)
}

fn value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next()
        .ok_or_else(|| anyhow!("Missing value for {flag}\n{USAGE}"))
}

fn number(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<f64> {
    let raw = value(args, flag)?;
    let parsed: f64 = raw
        .parse()
        .with_context(|| format!("{flag} expects a number, got {raw:?}"))?;
    if !parsed.is_finite() || parsed < 0.0 {
        return Err(anyhow!("{flag} must be a non-negative number"));
    }
    Ok(parsed)
}

fn count(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<usize> {
    let raw = value(args, flag)?;
    raw.parse()
        .with_context(|| format!("{flag} expects a whole number, got {raw:?}"))
}

fn print_generated(config: &AppConfig, mode: Mode) -> Result<()> {
    match mode {
        Mode::Session => {}
        Mode::Chunk => {
            let mut generator = create_text_generator(Some(config.generation_config()))?;
            println!("{}", generator.generate_chunk()?);
        }
        Mode::Sentence(words) => {
            let words = i64::try_from(words).context("Sentence length is too large")?;
            println!("{}", generate_lorem_sentence(words, Some(config.seed.as_str()))?);
        }
        Mode::Paragraphs(count) => {
            for text in generate_lorem_text(count, Some(config.generation_config()))? {
                println!("{}\n", text.content);
            }
        }
    }
    Ok(())
}

fn copy_report(sink: impl ClipboardSink, report: &SessionReport) -> bool {
    ClipboardManager::new(sink).copy_all(&report.texts).success
}

fn log_summary(report: &SessionReport) {
    let stats = text_stats(&report.texts);
    info!(
        paragraphs = stats.paragraphs,
        sentences = stats.sentences,
        words = stats.words,
        bytes = stats.bytes,
        batches = report.batches,
        "Generated text"
    );
    info!(
        frames = report.frames,
        raw_events = report.raw_events,
        notifications = report.notifications,
        near_bottom = report.near_bottom_notifications,
        pct = report.final_position.scroll_percentage,
        velocity = report.final_position.scroll_velocity,
        "Scroll summary"
    );
    if let Some(range) = report.visible_range {
        info!(start = range.start, end = range.end, "Render window at end of trace");
    }
    if let Some(range) = report.on_screen {
        info!(start = range.start, end = range.end, "Paragraphs on screen at end of trace");
    }
    let metrics = report.metrics;
    info!(
        fps = metrics.fps,
        generation_ms = metrics.text_generation_time,
        memory_mb = metrics.memory_usage,
        performant = report.performant,
        "Performance"
    );
    if report.failed_callbacks > 0 {
        warn!(failed = report.failed_callbacks, "Some scroll subscribers failed");
    }
}

fn print_report(report: &SessionReport, json: bool) -> Result<()> {
    if json {
        let rendered =
            serde_json::to_string_pretty(report).context("Failed to render report as JSON")?;
        println!("{rendered}");
        return Ok(());
    }
    for text in &report.texts {
        println!("[{}] {}\n", text.position, text.content);
    }
    Ok(())
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    warn!("Logging initialized; override level with config.log_level or RUST_LOG");
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("debug"));
    if let Err(err) = handle.modify(|filter| *filter = parsed.clone()) {
        warn!(%level, "Failed to update log level from config: {err}");
    } else {
        info!(%level, "Applied log level from config");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn defaults_without_flags() {
        let parsed = args(&[]).expect("no flags");
        assert_eq!(parsed.config_path, PathBuf::from("conf/config.toml"));
        assert_eq!(parsed.seconds, 10.0);
        assert_eq!(parsed.speed, 1200.0);
        assert!(!parsed.json);
        assert_eq!(parsed.mode, Mode::Session);
    }

    #[test]
    fn generation_modes_are_parsed() {
        assert_eq!(args(&["--chunk"]).expect("chunk").mode, Mode::Chunk);
        assert_eq!(
            args(&["--sentence", "12"]).expect("sentence").mode,
            Mode::Sentence(12)
        );
        assert_eq!(
            args(&["--paragraphs", "3"]).expect("paragraphs").mode,
            Mode::Paragraphs(3)
        );
        assert!(args(&["--paragraphs", "-2"]).is_err());
    }

    #[test]
    fn generation_modes_print_without_error() {
        let config = AppConfig::default();
        for mode in [Mode::Chunk, Mode::Sentence(5), Mode::Paragraphs(2)] {
            print_generated(&config, mode).expect("generated output");
        }
    }

    #[test]
    fn flags_are_parsed() {
        let parsed = args(&[
            "--config", "alt.toml", "--trace", "t.json", "--seconds", "2.5", "--speed", "300",
            "--copy-to", "-", "--json",
        ])
        .expect("flags");
        assert_eq!(parsed.config_path, PathBuf::from("alt.toml"));
        assert_eq!(parsed.trace_path, Some(PathBuf::from("t.json")));
        assert_eq!(parsed.seconds, 2.5);
        assert_eq!(parsed.speed, 300.0);
        assert_eq!(parsed.copy_to, Some(PathBuf::from("-")));
        assert!(parsed.json);
    }

    #[test]
    fn bad_arguments_are_rejected() {
        assert!(args(&["--seconds"]).is_err());
        assert!(args(&["--speed", "fast"]).is_err());
        assert!(args(&["--seconds", "-1"]).is_err());
        assert!(args(&["--bogus"]).is_err());
    }
}
