//! Terminal food Tetris runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from the `term`
//! crate. Settings come from `FOOD_TETRIS_*` environment variables.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use food_tetris::core::{GameSession, GameSnapshot, RandomSource};
use food_tetris::input::{handle_key_event, is_held_key, should_quit, InputHandler};
use food_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use food_tetris::types::{GameAction, TICK_MS};
use food_tetris::{EventLog, Settings};

fn main() -> Result<()> {
    let settings = Settings::from_env();

    let mut log_open_error = None;
    let mut log = match settings.log_path.as_deref().map(EventLog::open) {
        Some(Ok(log)) => Some(log),
        Some(Err(e)) => {
            log_open_error = Some(e);
            None
        }
        None => None,
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &settings, log.as_mut());

    // Always try to restore terminal state.
    let _ = term.exit();

    if let Some(e) = log_open_error {
        eprintln!("[food-tetris] could not open event log: {}", e);
    }
    if let Some(e) = log.as_ref().and_then(|l| l.error()) {
        eprintln!("[food-tetris] event log disabled after write error: {}", e);
    }
    result
}

fn run(term: &mut TerminalRenderer, settings: &Settings, mut log: Option<&mut EventLog>) -> Result<()> {
    let mut session = GameSession::with_config(settings.config, RandomSource::seeded(settings.seed));
    session.start();
    if let Some(log) = log.as_deref_mut() {
        log.record_start(settings.seed, settings.mode, session.config());
    }

    let view = GameView::default();
    let mut input = InputHandler::with_repeat_ms(session.config().horizontal_repeat_ms);
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        session.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            break;
                        }

                        let action = if is_held_key(key.code) {
                            input.handle_key_press(key.code)
                        } else {
                            handle_key_event(key)
                        };

                        if let Some(action) = action {
                            if matches!(action, GameAction::Pause | GameAction::Restart) {
                                let _ = input.reset();
                            }
                            session.apply_action(action);
                            record_lock(&mut session, log.as_deref_mut());
                        }
                    }
                    KeyEventKind::Repeat => {
                        // Terminal auto-repeat is ignored; the input handler repeats internally.
                    }
                    KeyEventKind::Release => {
                        if let Some(action) = input.handle_key_release(key.code) {
                            session.apply_action(action);
                            record_lock(&mut session, log.as_deref_mut());
                        }
                    }
                },
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            for action in input.update(TICK_MS) {
                session.apply_action(action);
                record_lock(&mut session, log.as_deref_mut());
            }
            session.advance(TICK_MS);
            record_lock(&mut session, log.as_deref_mut());
        }
    }

    if let Some(log) = log {
        log.record_end(&session);
    }
    Ok(())
}

/// Forward the session's last lock, if any, to the event log.
fn record_lock(session: &mut GameSession, log: Option<&mut EventLog>) {
    let Some(event) = session.take_last_event() else {
        return;
    };
    if let Some(log) = log {
        log.record_lock(&event);
    }
}
