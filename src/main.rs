//! Terminal match-3 runner (default binary).
//!
//! Drives a `BoardSession` from the keyboard: move a cursor, grab a token,
//! grab its neighbor to swap. Cascades resolve one round per step so they
//! read as an animation instead of an instant settle.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use tui_match3::config::BoardConfig;
use tui_match3::core::{BoardSession, BoardSnapshot, Phase};
use tui_match3::input::{map_key, DragHandler, UiCommand};
use tui_match3::term::TerminalRenderer;
use tui_match3::types::{Pos, CASCADE_STEP_MS};

#[derive(Debug)]
struct CliArgs {
    seed: u32,
    config: Option<PathBuf>,
    snapshot: Option<PathBuf>,
}

fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut cli = CliArgs {
        seed: default_seed(),
        config: None,
        snapshot: None,
    };
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                cli.seed = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --seed value: {}", v))?;
            }
            "--config" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --config"))?;
                cli.config = Some(PathBuf::from(v));
            }
            "--snapshot" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --snapshot"))?;
                cli.snapshot = Some(PathBuf::from(v));
            }
            other => {
                return Err(anyhow!("unknown argument: {}", other));
            }
        }
        i += 1;
    }
    Ok(cli)
}

fn default_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(1)
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = parse_args(&args)?;

    let config = match &cli.config {
        Some(path) => BoardConfig::load(path)?,
        None => BoardConfig::default(),
    };
    let mut session = BoardSession::new(config, cli.seed)?;

    if let Some(path) = &cli.snapshot {
        if path.exists() {
            let snapshot = read_snapshot(path)?;
            if !session.restore(&snapshot) {
                return Err(anyhow!(
                    "snapshot {} does not fit the configured board",
                    path.display()
                ));
            }
        }
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session, cli.snapshot.as_deref());

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(
    term: &mut TerminalRenderer,
    session: &mut BoardSession,
    snapshot_path: Option<&Path>,
) -> Result<()> {
    let size = session.grid().size() as i8;
    let mut cursor = Pos::new(0, 0);
    let mut drag = DragHandler::new();

    let step = Duration::from_millis(CASCADE_STEP_MS);
    let mut last_step = Instant::now();

    loop {
        term.draw(session, cursor, drag.origin())?;
        // The shell redraws whole frames; the event stream is for frontends
        // that want diffs. Drain it so it cannot grow unbounded.
        session.take_events();

        if session.phase() == Phase::Resolving && last_step.elapsed() >= step {
            session.resolve_round();
            last_step = Instant::now();
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match map_key(key) {
                    Some(UiCommand::Quit) => return Ok(()),
                    Some(UiCommand::Cursor(dx, dy)) => {
                        cursor.x = (cursor.x + dx).clamp(0, size - 1);
                        cursor.y = (cursor.y + dy).clamp(0, size - 1);
                    }
                    Some(UiCommand::Grab) => {
                        if drag.grab(session, cursor) {
                            last_step = Instant::now();
                        }
                    }
                    Some(UiCommand::Cancel) => drag.cancel(),
                    Some(UiCommand::Save) => {
                        session.save();
                        if let Some(path) = snapshot_path {
                            write_snapshot(path, &session.snapshot())?;
                        }
                    }
                    Some(UiCommand::Reload) => {
                        drag.cancel();
                        session.reload();
                    }
                    None => {}
                }
            }
        }
    }
}

fn read_snapshot(path: &Path) -> Result<BoardSnapshot> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    let snapshot = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse snapshot {}", path.display()))?;
    Ok(snapshot)
}

fn write_snapshot(path: &Path, snapshot: &BoardSnapshot) -> Result<()> {
    let text = serde_json::to_string_pretty(snapshot)?;
    std::fs::write(path, text)
        .with_context(|| format!("failed to write snapshot {}", path.display()))?;
    Ok(())
}
