//! Game session - turn-by-turn play on top of the board, checker and sequencer
//!
//! A session cycles Spawn → Falling → (Locking) → Spawn. Input arrives as
//! [`GameAction`]s and time as [`GameSession::advance`]. Paused, game-over and
//! won sessions ignore everything except the pause toggle and restart.
//!
//! Lock timing: a failed downward step arms the lock timer (if it is not
//! already armed); any successful move or rotation disarms it; the piece
//! commits once the armed timer reaches the configured lock delay.

use crate::board::Board;
use crate::collision::{fits, landing};
use crate::config::GameConfig;
use crate::piece::ActivePiece;
use crate::rotation::try_rotate;
use crate::scoring::Progress;
use crate::sequencer::{PieceSource, RandomSource, Sequencer};
use crate::snapshot::{GameSnapshot, TimersSnapshot};
use crate::types::{GameAction, LockEvent, PieceKind};

/// Complete state of one game.
#[derive(Debug, Clone)]
pub struct GameSession<S = RandomSource> {
    config: GameConfig,
    board: Board,
    active: Option<ActivePiece>,
    sequencer: Sequencer<S>,
    progress: Progress,
    fall_timer_ms: u32,
    /// Armed once the active piece has failed to move down.
    lock_timer_ms: Option<u32>,
    play_time_ms: u32,
    soft_dropping: bool,
    pieces_spawned: u32,
    /// Last lock (consumed by observers).
    last_event: Option<LockEvent>,
    started: bool,
    paused: bool,
    game_over: bool,
    won: bool,
}

impl GameSession<RandomSource> {
    /// Default rules with a seeded random source.
    pub fn new(seed: u64) -> Self {
        Self::with_config(GameConfig::default(), RandomSource::seeded(seed))
    }
}

impl<S: PieceSource> GameSession<S> {
    pub fn with_config(config: GameConfig, source: S) -> Self {
        Self::with_board(config, source, Board::new())
    }

    /// Session starting from a pre-filled board.
    pub fn with_board(config: GameConfig, source: S, board: Board) -> Self {
        let config = config.normalized();
        Self {
            sequencer: Sequencer::new(source, config.preview_len),
            config,
            board,
            active: None,
            progress: Progress::new(),
            fall_timer_ms: 0,
            lock_timer_ms: None,
            play_time_ms: 0,
            soft_dropping: false,
            pieces_spawned: 0,
            last_event: None,
            started: false,
            paused: false,
            game_over: false,
            won: false,
        }
    }

    /// Spawn the first piece. Does nothing once started.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.spawn();
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn won(&self) -> bool {
        self.won
    }

    /// Started, not paused and not finished.
    pub fn is_playing(&self) -> bool {
        self.started && !self.paused && !self.game_over && !self.won
    }

    pub fn score(&self) -> u32 {
        self.progress.score
    }

    pub fn level(&self) -> u32 {
        self.progress.level
    }

    pub fn lines(&self) -> u32 {
        self.progress.lines
    }

    pub fn fullness(&self) -> u32 {
        self.progress.fullness
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    /// Where the active piece would land if hard-dropped now.
    pub fn ghost(&self) -> Option<ActivePiece> {
        self.active.map(|piece| landing(&piece, &self.board))
    }

    pub fn preview(&self) -> &[PieceKind] {
        self.sequencer.preview()
    }

    pub fn held(&self) -> Option<PieceKind> {
        self.sequencer.held()
    }

    pub fn can_hold(&self) -> bool {
        self.sequencer.can_hold()
    }

    pub fn soft_dropping(&self) -> bool {
        self.soft_dropping
    }

    pub fn lock_timer_ms(&self) -> Option<u32> {
        self.lock_timer_ms
    }

    pub fn play_time_ms(&self) -> u32 {
        self.play_time_ms
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    /// Whether the active piece is resting on something.
    pub fn is_grounded(&self) -> bool {
        match self.active {
            Some(piece) => !fits(&piece.shifted(0, 1), &self.board),
            None => false,
        }
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);
        out.active = self.active;
        out.ghost = self.ghost();
        out.preview.clear();
        out.preview
            .extend(self.sequencer.preview().iter().copied());
        out.held = self.sequencer.held();
        out.can_hold = self.sequencer.can_hold();
        out.score = self.progress.score;
        out.level = self.progress.level;
        out.lines = self.progress.lines;
        out.fullness = self.progress.fullness;
        out.fullness_target = self.config.fullness_target;
        out.survival_limit_ms = self.config.survival_limit_ms;
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.won = self.won;
        out.timers = TimersSnapshot {
            fall_ms: self.fall_timer_ms,
            lock_ms: self.lock_timer_ms,
            play_ms: self.play_time_ms,
        };
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Apply one input command.
    ///
    /// Returns true when the command changed something. Illegal commands are
    /// ignored and return false.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Pause => self.toggle_pause(),
            GameAction::Restart => self.restart(),
            _ if !self.is_playing() => false,
            GameAction::MoveLeft => self.try_shift(-1, 0),
            GameAction::MoveRight => self.try_shift(1, 0),
            GameAction::SoftDropStart => {
                self.soft_dropping = true;
                self.fall_timer_ms = 0;
                self.step_down() || self.lock_if_due()
            }
            GameAction::SoftDropStop => {
                let was_dropping = self.soft_dropping;
                self.soft_dropping = false;
                self.fall_timer_ms = 0;
                was_dropping
            }
            GameAction::RotateCw => self.rotate(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::Hold => self.hold(),
        }
    }

    /// Advance timers by `elapsed_ms`, applying gravity and lock delay.
    ///
    /// Returns true when a piece locked during this call.
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        if !self.is_playing() {
            return false;
        }

        self.play_time_ms = self.play_time_ms.saturating_add(elapsed_ms);
        if let Some(limit) = self.config.survival_limit_ms {
            if self.play_time_ms >= limit {
                self.won = true;
                return false;
            }
        }

        if let Some(lock_ms) = self.lock_timer_ms.as_mut() {
            *lock_ms = lock_ms.saturating_add(elapsed_ms);
        }

        self.fall_timer_ms = self.fall_timer_ms.saturating_add(elapsed_ms);
        if self.fall_timer_ms >= self.fall_interval_ms() {
            self.fall_timer_ms = 0;
            self.step_down();
        }

        self.lock_if_due()
    }

    /// Interval between automatic one-row falls right now.
    pub fn fall_interval_ms(&self) -> u32 {
        if self.soft_dropping {
            self.config.soft_drop_interval_ms
        } else {
            self.config.fall_interval_ms
        }
    }

    fn toggle_pause(&mut self) -> bool {
        if !self.started || self.game_over || self.won {
            return false;
        }
        self.paused = !self.paused;
        self.soft_dropping = false;
        true
    }

    /// Start over; only allowed once the game has ended.
    fn restart(&mut self) -> bool {
        if !(self.game_over || self.won) {
            return false;
        }
        self.board.clear();
        self.sequencer.reset();
        self.progress = Progress::new();
        self.active = None;
        self.fall_timer_ms = 0;
        self.lock_timer_ms = None;
        self.play_time_ms = 0;
        self.soft_dropping = false;
        self.last_event = None;
        self.paused = false;
        self.game_over = false;
        self.won = false;
        self.started = true;
        self.spawn();
        true
    }

    /// Draw the next kind and place it at the spawn origin.
    fn spawn(&mut self) -> bool {
        let kind = self.sequencer.next();
        self.place_new(kind)
    }

    /// Put a fresh piece of `kind` at the spawn origin, ending the game if it
    /// does not fit.
    fn place_new(&mut self, kind: PieceKind) -> bool {
        let piece = ActivePiece::spawn(kind);
        self.fall_timer_ms = 0;
        self.lock_timer_ms = None;

        if !fits(&piece, &self.board) {
            self.active = None;
            self.game_over = true;
            return false;
        }

        self.active = Some(piece);
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);
        true
    }

    fn try_shift(&mut self, dx: i8, dy: i8) -> bool {
        let Some(piece) = self.active else {
            return false;
        };

        let moved = piece.shifted(dx, dy);
        if !fits(&moved, &self.board) {
            return false;
        }

        self.active = Some(moved);
        self.lock_timer_ms = None;
        true
    }

    /// One row down; arms the lock timer on failure.
    fn step_down(&mut self) -> bool {
        if self.try_shift(0, 1) {
            return true;
        }
        if self.active.is_some() {
            self.lock_timer_ms.get_or_insert(0);
        }
        false
    }

    fn lock_if_due(&mut self) -> bool {
        match self.lock_timer_ms {
            Some(lock_ms) if lock_ms >= self.config.lock_delay_ms => {
                self.commit();
                true
            }
            _ => false,
        }
    }

    fn rotate(&mut self) -> bool {
        let Some(mut piece) = self.active else {
            return false;
        };

        if !try_rotate(&mut piece, &self.board) {
            return false;
        }

        self.active = Some(piece);
        self.lock_timer_ms = None;
        true
    }

    fn hard_drop(&mut self) -> bool {
        let Some(piece) = self.active else {
            return false;
        };
        self.active = Some(landing(&piece, &self.board));
        self.commit();
        true
    }

    fn hold(&mut self) -> bool {
        let Some(piece) = self.active else {
            return false;
        };
        let Some(swap) = self.sequencer.hold(piece.kind) else {
            return false;
        };
        self.place_new(swap.current);
        true
    }

    /// Merge the active piece, clear rows, score, and bring in the next piece.
    fn commit(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        self.board.merge(&piece);
        let cleared = self.board.clear_full_rows();
        let points = self
            .progress
            .apply_clear(cleared, self.config.fullness_target);
        self.sequencer.release_hold();
        self.fall_timer_ms = 0;
        self.lock_timer_ms = None;

        if self.progress.is_full(self.config.fullness_target) {
            self.won = true;
        } else {
            self.spawn();
        }

        self.last_event = Some(LockEvent {
            kind: piece.kind,
            lines_cleared: cleared as u32,
            points,
            score: self.progress.score,
            level: self.progress.level,
            lines: self.progress.lines,
            fullness: self.progress.fullness,
            game_over: self.game_over,
            won: self.won,
        });
    }
}

impl Default for GameSession<RandomSource> {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequencer::ScriptedSource;
    use crate::types::{Rotation, BOARD_HEIGHT, BOARD_WIDTH};

    fn scripted(kinds: &[PieceKind], config: GameConfig) -> GameSession<ScriptedSource> {
        let mut s = GameSession::with_config(config, ScriptedSource::new(kinds.to_vec()));
        s.start();
        s
    }

    fn burgers() -> GameSession<ScriptedSource> {
        scripted(&[PieceKind::Burger], GameConfig::default())
    }

    #[test]
    fn test_new_session() {
        let s = GameSession::new(12345);
        assert!(!s.started());
        assert!(!s.game_over());
        assert!(!s.paused());
        assert!(!s.won());
        assert_eq!(s.score(), 0);
        assert_eq!(s.level(), 1);
        assert_eq!(s.lines(), 0);
        assert!(s.active().is_none());
        assert!(s.held().is_none());
        assert_eq!(s.preview().len(), 3);
    }

    #[test]
    fn test_start_spawns_from_preview() {
        let mut s = GameSession::new(12345);
        let first = s.preview()[0];
        s.start();
        let active = s.active().unwrap();
        assert_eq!(active.kind, first);
        assert_eq!(active.rotation, Rotation::North);
        assert_eq!((active.x, active.y), (3, 0));
        assert_eq!(s.pieces_spawned(), 1);
    }

    #[test]
    fn test_actions_before_start_are_ignored() {
        let mut s = GameSession::new(1);
        assert!(!s.apply_action(GameAction::MoveLeft));
        assert!(!s.apply_action(GameAction::Pause));
        assert!(!s.advance(5000));
    }

    #[test]
    fn test_move_left_right() {
        let mut s = burgers();
        assert!(s.apply_action(GameAction::MoveRight));
        assert_eq!(s.active().unwrap().x, 4);
        assert!(s.apply_action(GameAction::MoveLeft));
        assert_eq!(s.active().unwrap().x, 3);
    }

    #[test]
    fn test_move_stops_at_wall() {
        let mut s = burgers();
        // Burger occupies mask columns 1..=2, so origin x can reach -1.
        let mut moved = 0;
        for _ in 0..10 {
            if s.apply_action(GameAction::MoveLeft) {
                moved += 1;
            }
        }
        assert_eq!(moved, 4);
        assert_eq!(s.active().unwrap().x, -1);
    }

    #[test]
    fn test_gravity_moves_one_row_per_interval() {
        let mut s = burgers();
        assert!(!s.advance(999));
        assert_eq!(s.active().unwrap().y, 0);
        s.advance(1);
        assert_eq!(s.active().unwrap().y, 1);
    }

    #[test]
    fn test_lock_delay_after_landing() {
        let mut s = burgers();
        let floor_y = s.ghost().unwrap().y;
        s.active = s.active.map(|p| ActivePiece { y: floor_y, ..p });

        // Gravity step fails and arms the timer.
        assert!(!s.advance(1000));
        assert_eq!(s.lock_timer_ms(), Some(0));

        assert!(!s.advance(499));
        assert!(s.advance(1));
        assert_eq!(s.board().filled_count(), 4);
        assert_eq!(s.active().unwrap().y, 0);
    }

    #[test]
    fn test_move_disarms_lock_timer() {
        let mut s = burgers();
        let floor_y = s.ghost().unwrap().y;
        s.active = s.active.map(|p| ActivePiece { y: floor_y, ..p });

        s.advance(1000);
        assert!(s.lock_timer_ms().is_some());
        assert!(s.apply_action(GameAction::MoveRight));
        assert_eq!(s.lock_timer_ms(), None);

        // Not committed even after the lock delay would have expired.
        assert!(!s.advance(600));
        assert_eq!(s.board().filled_count(), 0);
    }

    #[test]
    fn test_zero_lock_delay_locks_on_failed_step() {
        let mut s = scripted(&[PieceKind::Burger], GameConfig::classic());
        let floor_y = s.ghost().unwrap().y;
        s.active = s.active.map(|p| ActivePiece { y: floor_y, ..p });
        assert!(s.advance(1000));
        assert_eq!(s.board().filled_count(), 4);
    }

    #[test]
    fn test_soft_drop_speeds_up_fall() {
        let mut s = burgers();
        assert!(s.apply_action(GameAction::SoftDropStart));
        assert_eq!(s.active().unwrap().y, 1);
        assert_eq!(s.fall_interval_ms(), 16);
        s.advance(16);
        assert_eq!(s.active().unwrap().y, 2);

        assert!(s.apply_action(GameAction::SoftDropStop));
        assert_eq!(s.fall_interval_ms(), 1000);
        assert!(!s.apply_action(GameAction::SoftDropStop));
    }

    #[test]
    fn test_hard_drop_locks_immediately() {
        let mut s = burgers();
        assert!(s.apply_action(GameAction::HardDrop));
        assert_eq!(s.board().get(4, 19), Some(Some(PieceKind::Burger)));
        assert_eq!(s.board().get(5, 18), Some(Some(PieceKind::Burger)));
        assert_eq!(s.pieces_spawned(), 2);

        let ev = s.take_last_event().unwrap();
        assert_eq!(ev.kind, PieceKind::Burger);
        assert_eq!(ev.lines_cleared, 0);
        assert!(s.take_last_event().is_none());
    }

    #[test]
    fn test_rotate_resets_lock_timer() {
        let mut s = scripted(&[PieceKind::Chicken], GameConfig::default());
        s.apply_action(GameAction::HardDrop);
        let floor_y = s.ghost().unwrap().y;
        s.active = s.active.map(|p| ActivePiece { y: floor_y, ..p });
        s.advance(1000);
        assert!(s.lock_timer_ms().is_some());
        assert!(s.apply_action(GameAction::RotateCw));
        assert_eq!(s.lock_timer_ms(), None);
    }

    #[test]
    fn test_hold_twice_is_noop() {
        let mut s = scripted(
            &[PieceKind::Fries, PieceKind::Burger, PieceKind::Chicken],
            GameConfig::default(),
        );
        assert!(s.apply_action(GameAction::Hold));
        assert_eq!(s.held(), Some(PieceKind::Fries));
        assert_eq!(s.active().unwrap().kind, PieceKind::Burger);

        assert!(!s.apply_action(GameAction::Hold));
        assert_eq!(s.held(), Some(PieceKind::Fries));
        assert_eq!(s.active().unwrap().kind, PieceKind::Burger);
    }

    #[test]
    fn test_hold_swaps_after_lock() {
        let mut s = scripted(
            &[PieceKind::Fries, PieceKind::Burger, PieceKind::Chicken],
            GameConfig::default(),
        );
        s.apply_action(GameAction::Hold);
        s.apply_action(GameAction::HardDrop);
        assert!(s.can_hold());
        let before = s.active().unwrap().kind;
        assert!(s.apply_action(GameAction::Hold));
        assert_eq!(s.active().unwrap().kind, PieceKind::Fries);
        assert_eq!(s.held(), Some(before));
    }

    #[test]
    fn test_hold_resets_position() {
        let mut s = scripted(&[PieceKind::Fries, PieceKind::Burger], GameConfig::default());
        s.apply_action(GameAction::MoveRight);
        s.apply_action(GameAction::SoftDropStart);
        assert!(s.apply_action(GameAction::Hold));
        let active = s.active().unwrap();
        assert_eq!((active.x, active.y), (3, 0));
        assert_eq!(active.rotation, Rotation::North);
    }

    #[test]
    fn test_pause_freezes_play() {
        let mut s = burgers();
        assert!(s.apply_action(GameAction::Pause));
        assert!(s.paused());
        assert!(!s.apply_action(GameAction::MoveLeft));
        assert!(!s.apply_action(GameAction::HardDrop));
        assert!(!s.advance(5000));
        assert_eq!(s.active().unwrap().y, 0);
        assert_eq!(s.play_time_ms(), 0);

        assert!(s.apply_action(GameAction::Pause));
        assert!(!s.paused());
        assert!(s.apply_action(GameAction::MoveLeft));
    }

    #[test]
    fn test_restart_only_after_game_end() {
        let mut s = burgers();
        assert!(!s.apply_action(GameAction::Restart));

        s.game_over = true;
        assert!(s.apply_action(GameAction::Restart));
        assert!(!s.game_over());
        assert!(s.active().is_some());
        assert_eq!(s.board().filled_count(), 0);
    }

    #[test]
    fn test_spawn_collision_ends_game() {
        let mut board = Board::new();
        board.set(4, 3, Some(PieceKind::Pasta));
        let mut s = GameSession::with_board(
            GameConfig::default(),
            ScriptedSource::new(vec![PieceKind::Burger]),
            board,
        );
        s.start();
        assert!(s.game_over());
        assert!(s.active().is_none());
        assert_eq!(s.score(), 0);
        assert_eq!(s.level(), 1);
        assert_eq!(s.lines(), 0);
        assert!(!s.apply_action(GameAction::Pause));
    }

    #[test]
    fn test_line_clear_scores() {
        let mut board = Board::new();
        // Leave columns 4 and 5 open in the bottom two rows.
        for y in 18..BOARD_HEIGHT as i8 {
            for x in 0..BOARD_WIDTH as i8 {
                if x != 4 && x != 5 {
                    board.set(x, y, Some(PieceKind::Carrot));
                }
            }
        }
        let mut s = GameSession::with_board(
            GameConfig::default(),
            ScriptedSource::new(vec![PieceKind::Burger]),
            board,
        );
        s.start();
        s.apply_action(GameAction::HardDrop);

        assert_eq!(s.lines(), 2);
        assert_eq!(s.score(), 300);
        assert_eq!(s.level(), 1);
        assert_eq!(s.board().filled_count(), 0);
        let ev = s.take_last_event().unwrap();
        assert_eq!(ev.lines_cleared, 2);
        assert_eq!(ev.points, 300);
    }

    #[test]
    fn test_fullness_target_wins() {
        let mut board = Board::new();
        for y in 18..BOARD_HEIGHT as i8 {
            for x in 0..BOARD_WIDTH as i8 {
                if x != 4 && x != 5 {
                    board.set(x, y, Some(PieceKind::Carrot));
                }
            }
        }
        let config = GameConfig {
            fullness_target: Some(40),
            ..GameConfig::default()
        };
        let mut s = GameSession::with_board(config, ScriptedSource::new(vec![PieceKind::Burger]), board);
        s.start();
        s.apply_action(GameAction::HardDrop);

        assert!(s.won());
        assert_eq!(s.fullness(), 40);
        assert!(s.active().is_none());
        assert!(!s.apply_action(GameAction::MoveLeft));
        assert!(s.take_last_event().unwrap().won);
    }

    #[test]
    fn test_survival_limit_wins() {
        let config = GameConfig {
            survival_limit_ms: Some(100),
            ..GameConfig::default()
        };
        let mut s = scripted(&[PieceKind::Burger], config);
        s.advance(60);
        assert!(!s.won());
        s.advance(40);
        assert!(s.won());
        assert!(!s.apply_action(GameAction::Pause));
        assert!(s.apply_action(GameAction::Restart));
        assert!(!s.won());
        assert_eq!(s.play_time_ms(), 0);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut s = burgers();
        s.apply_action(GameAction::HardDrop);
        let snap = s.snapshot();
        assert_eq!(snap.board[19][4], Some(PieceKind::Burger));
        assert_eq!(snap.active, s.active());
        assert_eq!(snap.ghost.unwrap().y, 14);
        assert_eq!(snap.preview.as_slice(), s.preview());
        assert!(snap.playable());
    }
}
