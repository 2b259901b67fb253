use std::{
    fs::File,
    io::{self, BufReader, Write as _},
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use serde::Deserialize;

#[derive(Parser, Debug)]
#[command(name = "scrollscene", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the built-in scene document as JSON.
    Preset,
    /// Print the settled snapshot at one scroll offset.
    Sample(SampleArgs),
    /// Apply a recorded event trace and print one snapshot per event.
    Replay(ReplayArgs),
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Viewport width in pixels.
    #[arg(long)]
    width: f64,

    /// Viewport height in pixels.
    #[arg(long)]
    height: f64,

    /// Scroll offset in pixels.
    #[arg(long)]
    offset: f64,

    /// Scene document JSON. Defaults to the built-in preset.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only print the target with this label.
    #[arg(long)]
    label: Option<String>,
}

#[derive(Parser, Debug)]
struct ReplayArgs {
    /// Event trace JSON.
    #[arg(long)]
    trace: PathBuf,

    /// Scene document JSON. Defaults to the built-in preset.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Deserialize, Debug)]
struct Trace {
    viewport: scrollscene::Viewport,
    events: Vec<TraceEvent>,
}

#[derive(Deserialize, Debug)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum TraceEvent {
    Scroll { at_ms: u64, offset: f64 },
    Resize { at_ms: u64, width: f64, height: f64 },
    Tick { at_ms: u64 },
}

impl TraceEvent {
    fn at(&self) -> Duration {
        let ms = match self {
            Self::Scroll { at_ms, .. } | Self::Resize { at_ms, .. } | Self::Tick { at_ms } => {
                *at_ms
            }
        };
        Duration::from_millis(ms)
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Scroll { .. } => "scroll",
            Self::Resize { .. } => "resize",
            Self::Tick { .. } => "tick",
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Preset => cmd_preset(),
        Command::Sample(args) => cmd_sample(args),
        Command::Replay(args) => cmd_replay(args),
    }
}

fn read_document(path: Option<&Path>) -> anyhow::Result<scrollscene::SceneDocument> {
    match path {
        Some(path) => scrollscene::SceneDocument::load(path)
            .with_context(|| format!("load scene document '{}'", path.display())),
        None => Ok(scrollscene::SceneDocument::portal_intro()),
    }
}

fn controller(
    doc: scrollscene::SceneDocument,
) -> anyhow::Result<scrollscene::ResponsiveRebuildController> {
    Ok(scrollscene::ResponsiveRebuildController::new(
        doc.scene,
        doc.elements,
    )?)
}

fn cmd_preset() -> anyhow::Result<()> {
    let json = scrollscene::SceneDocument::portal_intro().to_json()?;
    println!("{json}");
    Ok(())
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let doc = read_document(args.config.as_deref())?;
    let viewport = scrollscene::Viewport::new(args.width, args.height)?;

    let mut ctl = controller(doc)?;
    ctl.mount(viewport, Duration::ZERO);
    ctl.on_scroll(args.offset, Duration::ZERO);
    ctl.settle();

    let snapshot = ctl.snapshot();
    let json = match &args.label {
        Some(label) => {
            let target = snapshot
                .by_label(label)
                .with_context(|| format!("no target labelled '{label}'"))?;
            serde_json::to_string_pretty(target)?
        }
        None => serde_json::to_string_pretty(&snapshot)?,
    };
    println!("{json}");
    Ok(())
}

fn cmd_replay(args: ReplayArgs) -> anyhow::Result<()> {
    let doc = read_document(args.config.as_deref())?;
    let f = File::open(&args.trace)
        .with_context(|| format!("open trace '{}'", args.trace.display()))?;
    let trace: Trace =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse trace JSON")?;

    let viewport = scrollscene::Viewport::new(trace.viewport.width, trace.viewport.height)
        .with_context(|| "trace viewport")?;
    let mut ctl = controller(doc)?;
    ctl.mount(viewport, Duration::ZERO);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for event in &trace.events {
        let now = event.at();
        let outcome = match event {
            TraceEvent::Scroll { offset, .. } => {
                ctl.on_scroll(*offset, now);
                ctl.poll(now)
            }
            TraceEvent::Resize { width, height, .. } => {
                let viewport = scrollscene::Viewport::new(*width, *height)?;
                ctl.on_resize(viewport, now);
                ctl.poll(now)
            }
            TraceEvent::Tick { .. } => ctl.tick(now),
        };
        let line = serde_json::json!({
            "at_ms": now.as_millis() as u64,
            "event": event.kind(),
            "outcome": outcome,
            "state": ctl.region().state(),
            "progress": ctl.region().progress(),
            "rebuilds": ctl.rebuild_count(),
            "snapshot": ctl.snapshot(),
        });
        writeln!(out, "{line}").with_context(|| "write replay output")?;
    }
    Ok(())
}
