mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::Path;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal, ExecutableCommand,
};
use image::Rgba;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use unhappy_reptiles::assets::SpriteSet;
use unhappy_reptiles::audio::CueQueue;
use unhappy_reptiles::canvas::Canvas;
use unhappy_reptiles::compose::compose_frame;
use unhappy_reptiles::compute::{init_state, pointer_move, pointer_press, resize, tick};
use unhappy_reptiles::config::{Cli, GameConfig};

const BACKDROP: Rgba<u8> = Rgba([0, 0, 0, 255]);

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal belongs to the game, so logs only go to a file, if any.
fn init_logging(path: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns when the player quits.
///
/// Input is drained without blocking at the start of every frame; pointer
/// events act immediately, then the world advances one tick and the frame
/// is composed and presented.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
    sprites: SpriteSet,
) -> anyhow::Result<()> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let (cols, rows) = terminal::size().context("querying terminal size")?;
    let (width, height) = display::logical_size(cols, rows, config.scale);
    let mut state = init_state(sprites, config, width, height, &mut rng);
    let mut canvas = Canvas::new(width as u32, height as u32);
    let mut cues = CueQueue::default();
    info!(width, height, scale = config.scale, "game started");

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind: KeyEventKind::Press,
                    modifiers,
                    ..
                }) => match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(());
                    }
                    _ => {}
                },
                Event::Mouse(MouseEvent {
                    kind, column, row, ..
                }) => {
                    let (x, y) = display::cell_to_logical(column, row, config.scale);
                    match kind {
                        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                            pointer_move(&mut state, x, y);
                        }
                        MouseEventKind::Down(MouseButton::Left) => {
                            pointer_move(&mut state, x, y);
                            pointer_press(&mut state, x, y, &mut cues);
                        }
                        _ => {}
                    }
                }
                Event::Resize(cols, rows) => {
                    let (width, height) = display::logical_size(cols, rows, config.scale);
                    resize(&mut state, width, height);
                    canvas.resize(width as u32, height as u32);
                    display::clear(out)?;
                    info!(width, height, "resized");
                }
                _ => {}
            }
        }

        tick(&mut state, &mut rng);

        canvas.begin_frame(BACKDROP);
        compose_frame(&mut state, &mut canvas);
        display::render(out, &canvas, config.scale, cues.drain())?;

        let elapsed = frame_start.elapsed();
        if elapsed < config.frame {
            std::thread::sleep(config.frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let config = GameConfig::from(Cli::parse());
    init_logging(config.log_file.as_deref())?;

    let sprites = SpriteSet::load(&config.asset_dir);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, &rx, &config, sprites);

    // Always restore the terminal
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        tracing::error!(error = %e, "game loop failed");
    }
    result
}
