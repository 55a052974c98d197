//! Opt-in JSON-lines event log.
//!
//! One JSON object per line: a `start` record, a `lock` record per committed
//! piece, and an `end` record with the final totals. Write failures disable
//! the log instead of interrupting play; the first error is kept for the
//! caller to report once the terminal is restored.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::core::{GameConfig, GameSession, PieceSource};
use crate::settings::Mode;
use crate::types::LockEvent;

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Record<'a> {
    Start {
        seed: u64,
        mode: Mode,
        config: &'a GameConfig,
    },
    Lock(&'a LockEvent),
    End {
        score: u32,
        level: u32,
        lines: u32,
        fullness: u32,
        play_ms: u32,
        pieces: u32,
        game_over: bool,
        won: bool,
    },
}

pub struct EventLog<W: Write = BufWriter<File>> {
    out: W,
    buf: Vec<u8>,
    error: Option<io::Error>,
}

impl EventLog<BufWriter<File>> {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::from_writer(BufWriter::new(file)))
    }
}

impl<W: Write> EventLog<W> {
    pub fn from_writer(out: W) -> Self {
        Self {
            out,
            buf: Vec::with_capacity(512),
            error: None,
        }
    }

    pub fn record_start(&mut self, seed: u64, mode: Mode, config: &GameConfig) {
        self.write(&Record::Start { seed, mode, config });
    }

    pub fn record_lock(&mut self, event: &LockEvent) {
        self.write(&Record::Lock(event));
    }

    /// Final totals for `session`; flushes the writer.
    pub fn record_end<S: PieceSource>(&mut self, session: &GameSession<S>) {
        self.write(&Record::End {
            score: session.score(),
            level: session.level(),
            lines: session.lines(),
            fullness: session.fullness(),
            play_ms: session.play_time_ms(),
            pieces: session.pieces_spawned(),
            game_over: session.game_over(),
            won: session.won(),
        });
        if self.error.is_none() {
            if let Err(e) = self.out.flush() {
                self.error = Some(e);
            }
        }
    }

    /// The first write error, if the log has been disabled.
    pub fn error(&self) -> Option<&io::Error> {
        self.error.as_ref()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write(&mut self, record: &Record<'_>) {
        if self.error.is_some() {
            return;
        }

        self.buf.clear();
        if let Err(e) = serde_json::to_writer(&mut self.buf, record) {
            self.error = Some(e.into());
            return;
        }
        self.buf.push(b'\n');

        if let Err(e) = self.out.write_all(&self.buf) {
            self.error = Some(e);
        }
    }
}
