use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyEvent, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal,
    ExecutableCommand,
};
use log::{info, warn};
use rand::thread_rng;

use arena_shooter::compute::{init_state, snapshot, step};
use arena_shooter::config::GameConfig;
use arena_shooter::controller::{apply_key, KeyAction};
use arena_shooter::display;
use arena_shooter::entities::GameState;

// ── Logging ───────────────────────────────────────────────────────────────────

/// The game owns the terminal, so records go to `log_file` when one is set.
fn init_logging(config: &GameConfig) -> anyhow::Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(path) = &config.log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to open log file '{}'", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.try_init()?;
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Frame driver.  Returns when the player quits.
///
/// Every pending key event is applied once through `apply_key` before the
/// frame is stepped, so one keypress is one request.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let mut rng = thread_rng();
    let frame_len = Duration::from_millis(state.config.frame_millis);

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match apply_key(state, code, kind, modifiers) {
                KeyAction::Quit => return Ok(()),
                KeyAction::Update(next) => *state = next,
                KeyAction::Ignored => {}
            }
        }

        *state = step(state, &mut rng);

        let (width, height) = terminal::size()?;
        display::render(out, &snapshot(state), width, height)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_len {
            thread::sleep(frame_len - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let config = GameConfig::load()?;
    init_logging(&config)?;
    info!(
        "arena {}x{}, frame {} ms",
        config.arena_width, config.arena_height, config.frame_millis
    );

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Ask for typed key events so releases can be told apart from presses.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    if !keyboard_enhanced {
        warn!("terminal does not report key event types; repeats arrive as presses");
    }

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let (arena_width, arena_height) = (config.arena_width, config.arena_height);
    let mut state = init_state(config, arena_width, arena_height);
    let result = game_loop(&mut out, &mut state, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!("exiting with score {}", state.score);
    result?;
    Ok(())
}
