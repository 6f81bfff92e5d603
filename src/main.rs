//! Command-line narrator for chapter text files.
//!
//! - `--plan` prints the segments and chunks as JSON instead of speaking.
//! - `--export-ts DIR` writes TypeScript bindings for the UI types.
//! - Otherwise the chapter is narrated through the console backend until it
//!   finishes or Ctrl+C is pressed.

mod console_backend;

use crate::console_backend::ConsoleBackend;
use anyhow::{Context, Result, anyhow, bail};
use drewpub_core::config::{AppConfig, load_config};
use drewpub_core::reader::{ToggleOutcome, progress_percent, voice_label};
use drewpub_core::runtime::spawn_narrator_for_language;
use drewpub_core::{
    ChapterNarrator, PlaybackCallbacks, PlaybackSnapshot, build_tts_chunks_with,
    parse_chapter_text_with,
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

const USAGE: &str = "Usage: drewpub [--config PATH] [--plan] [--export-ts DIR] <chapter.txt>";

#[derive(Debug)]
struct Args {
    config_path: PathBuf,
    plan_only: bool,
    export_ts: Option<PathBuf>,
    chapter: Option<PathBuf>,
}

enum Finish {
    Completed,
    Interrupted,
}

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let args = parse_args()?;
    let config = load_config(&args.config_path);
    set_log_level(reload_handle, config.log_level.as_filter_str());
    info!(
        config = %args.config_path.display(),
        level = %config.log_level,
        language = %config.language,
        speed = config.tts_speed,
        "Starting narrator"
    );

    if let Some(out_dir) = &args.export_ts {
        drewpub_core::bindings::export_ts_bindings(out_dir)?;
        info!(path = %out_dir.display(), "Exported TS bindings");
        if args.chapter.is_none() {
            return Ok(());
        }
    }

    let chapter_path = args.chapter.as_deref().ok_or_else(|| anyhow!(USAGE))?;
    let text = fs::read_to_string(chapter_path)
        .with_context(|| format!("Failed to read {}", chapter_path.display()))?;
    info!(path = %chapter_path.display(), bytes = text.len(), "Loaded chapter");

    if args.plan_only {
        print_plan(&text, &config)
    } else {
        narrate(&text, &config)
    }
}

fn print_plan(text: &str, config: &AppConfig) -> Result<()> {
    let segments = parse_chapter_text_with(text, config.context_window_chars);
    let chunks = build_tts_chunks_with(&segments, config.chunk_limits());
    let plan = serde_json::json!({
        "segments": segments,
        "chunks": chunks,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&plan).context("Failed to serialize plan")?
    );
    Ok(())
}

fn narrate(text: &str, config: &AppConfig) -> Result<()> {
    let (finish_tx, finish_rx) = mpsc::channel();

    let complete_tx = finish_tx.clone();
    let mut last_progress = PlaybackSnapshot::default();
    let callbacks = PlaybackCallbacks::new()
        .with_chunk_change(|index, chunk| {
            info!(index, voice = %voice_label(chunk), "Now reading");
        })
        .with_state_change(move |snapshot| {
            if *snapshot != last_progress {
                info!(
                    state = ?snapshot.state(),
                    index = snapshot.current_index,
                    total = snapshot.total_chunks,
                    progress = progress_percent(snapshot),
                    "Playback state"
                );
                last_progress = *snapshot;
            }
        })
        .with_complete(move || {
            let _ = complete_tx.send(Finish::Completed);
        })
        .with_error(|err| warn!("Narration error: {err}"));

    let handle =
        spawn_narrator_for_language(config.language.clone(), ConsoleBackend::new, callbacks)?;
    let mut narrator = ChapterNarrator::from_config(handle, config);
    narrator.set_voices(
        config
            .voice_assignment()
            .suggest(&ConsoleBackend::catalog(), &config.language),
    );

    if let Err(err) = ctrlc::set_handler(move || {
        let _ = finish_tx.send(Finish::Interrupted);
    }) {
        warn!("Failed to install Ctrl+C signal handler: {err}");
    }

    match narrator.toggle_play(text)? {
        ToggleOutcome::Started { chunks } => info!(chunks, "Narration started"),
        other => warn!(?other, "Unexpected toggle outcome"),
    }

    match finish_rx.recv() {
        Ok(Finish::Completed) => info!("Narration finished"),
        Ok(Finish::Interrupted) => info!("Received Ctrl+C; stopping narration"),
        Err(_) => warn!("Narration channel closed"),
    }
    narrator.close()?;
    Ok(())
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        config_path: PathBuf::from("conf/config.toml"),
        plan_only: false,
        export_ts: None,
        chapter: None,
    };
    let mut raw = env::args().skip(1);
    while let Some(arg) = raw.next() {
        match arg.as_str() {
            "--config" => {
                let value = raw.next().ok_or_else(|| anyhow!("--config needs a path"))?;
                args.config_path = PathBuf::from(value);
            }
            "--export-ts" => {
                let value = raw
                    .next()
                    .ok_or_else(|| anyhow!("--export-ts needs a directory"))?;
                args.export_ts = Some(PathBuf::from(value));
            }
            "--plan" => args.plan_only = true,
            "-h" | "--help" => bail!(USAGE),
            other if other.starts_with("--") => bail!("Unknown option {other}\n{USAGE}"),
            path => {
                if args.chapter.is_some() {
                    bail!(USAGE);
                }
                args.chapter = Some(PathBuf::from(path));
            }
        }
    }

    if args.chapter.is_none() && args.export_ts.is_none() {
        bail!(USAGE);
    }
    if let Some(chapter) = &args.chapter {
        ensure_exists(chapter)?;
    }
    Ok(args)
}

fn ensure_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(anyhow!("File not found: {}", path.display()));
    }
    Ok(())
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    if env::var_os("RUST_LOG").is_some() {
        info!("RUST_LOG is set; ignoring configured log level");
        return;
    }
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(err) = handle.modify(|filter| *filter = parsed.clone()) {
        warn!(%level, "Failed to update log level from config: {err}");
    } else {
        info!(%level, "Applied log level from config");
    }
}
