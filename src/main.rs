//! Terminal sandbox runner (default binary).
//!
//! Two threads: the input thread reads the terminal and queues intents, and
//! this thread owns the world, ticks it at a fixed rate and draws.
//!
//! Set `RUST_LOG` to write logs to `tui-sandbox.log`; set `TUI_SANDBOX_SEED`
//! to replay a specific world.

use std::fs::File;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tui_sandbox::core::{Flush, World, WorldConfig};
use tui_sandbox::input::{drain_tick, spawn_input_thread, IntentQueue};
use tui_sandbox::term::{FrameBuffer, TerminalRenderer, WorldView};
use tui_sandbox::types::TICK_MS;

const LOG_FILE: &str = "tui-sandbox.log";
const SEED_VAR: &str = "TUI_SANDBOX_SEED";

fn main() -> Result<()> {
    init_logging()?;

    let seed = pick_seed()?;
    info!(seed, "starting");
    let world = World::new(WorldConfig::default(), seed)
        .with_context(|| format!("world generation failed for seed {seed}"))?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, world);

    // Always try to restore terminal state.
    let _ = term.exit();
    info!("shutdown complete");
    result
}

/// Logging goes to a file so it never fights with the game screen.
fn init_logging() -> Result<()> {
    if std::env::var_os("RUST_LOG").is_none() {
        return Ok(());
    }
    let file = File::create(LOG_FILE).with_context(|| format!("cannot create {LOG_FILE}"))?;
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(EnvFilter::from_default_env())
        .init();
    Ok(())
}

fn pick_seed() -> Result<u64> {
    if let Ok(raw) = std::env::var(SEED_VAR) {
        return raw
            .trim()
            .parse()
            .with_context(|| format!("{SEED_VAR} must be an unsigned integer, got {raw:?}"));
    }
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?;
    Ok(now.as_nanos() as u64)
}

fn run(term: &mut TerminalRenderer, mut world: World) -> Result<()> {
    let queue = IntentQueue::default();
    let rx = queue.receiver();
    let stop = Arc::new(AtomicBool::new(false));
    let input = spawn_input_thread(queue.sender(), Arc::clone(&stop))?;
    // Only the input thread holds a sender now, so its exit disconnects `rx`.
    drop(queue);

    let view = WorldView::for_world(&world);
    let mut fb = FrameBuffer::new(0, 0);
    let tick = Duration::from_millis(TICK_MS as u64);

    let result = loop {
        let started = Instant::now();

        let drained = drain_tick(&rx);
        if drained.quit {
            break Ok(());
        }
        if drained.resized {
            world.invalidate();
        }
        if world.step(drained.intent) {
            if let Err(err) = present(term, &view, &mut world, &mut fb) {
                break Err(err);
            }
        }

        if let Some(rest) = tick.checked_sub(started.elapsed()) {
            thread::sleep(rest);
        }
    };

    stop.store(true, Ordering::Relaxed);
    // A full queue can park the input thread in a blocking send; dropping the
    // only receiver turns that send into a disconnect.
    drop(rx);
    let _ = input.join();
    result
}

fn present(
    term: &mut TerminalRenderer,
    view: &WorldView,
    world: &mut World,
    fb: &mut FrameBuffer,
) -> Result<()> {
    match world.flush() {
        Flush::Clean => Ok(()),
        Flush::Full => {
            view.render_into(world, fb);
            term.draw_full(fb)
        }
        Flush::Cells(cells) => {
            let status_row = view.patch_into(world, &cells, fb);
            term.draw_patch(fb, &cells, status_row)
        }
    }
}
