//! Piece sequencing - random draws, preview queue and hold slot
//!
//! Kinds are drawn independently and uniformly with replacement (no bag), so
//! repeats are possible. The randomness sits behind [`PieceSource`] so tests
//! and demos can script exact sequences.

use arrayvec::ArrayVec;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::{PieceKind, DEFAULT_PREVIEW_LEN, MAX_PREVIEW};

/// Supplier of piece kinds.
pub trait PieceSource {
    fn draw(&mut self) -> PieceKind;
}

/// Uniform i.i.d. draws over the seven kinds.
#[derive(Debug, Clone)]
pub struct RandomSource<R = StdRng> {
    rng: R,
}

impl RandomSource<StdRng> {
    /// Deterministic source for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RandomSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> PieceSource for RandomSource<R> {
    fn draw(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.gen_range(0..PieceKind::ALL.len())]
    }
}

/// Cycles through a fixed list of kinds.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    kinds: Vec<PieceKind>,
    next: usize,
}

impl ScriptedSource {
    /// Source that repeats `kinds` in order.
    ///
    /// # Panics
    ///
    /// Panics if `kinds` is empty.
    pub fn new(kinds: impl Into<Vec<PieceKind>>) -> Self {
        let kinds = kinds.into();
        assert!(!kinds.is_empty(), "scripted source needs at least one kind");
        Self { kinds, next: 0 }
    }
}

impl PieceSource for ScriptedSource {
    fn draw(&mut self) -> PieceKind {
        let kind = self.kinds[self.next];
        self.next = (self.next + 1) % self.kinds.len();
        kind
    }
}

/// Result of a successful hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoldSwap {
    /// Kind that becomes the active piece.
    pub current: PieceKind,
    /// What the hold slot contained before the swap.
    pub previous_held: Option<PieceKind>,
}

/// Preview queue plus hold slot over a piece source.
#[derive(Debug, Clone)]
pub struct Sequencer<S = RandomSource> {
    source: S,
    preview: ArrayVec<PieceKind, MAX_PREVIEW>,
    preview_len: usize,
    held: Option<PieceKind>,
    can_hold: bool,
}

impl<S: PieceSource> Sequencer<S> {
    /// New sequencer with `preview_len` upcoming kinds (clamped to
    /// `1..=MAX_PREVIEW`) drawn up front.
    pub fn new(source: S, preview_len: usize) -> Self {
        let mut seq = Self {
            source,
            preview: ArrayVec::new(),
            preview_len: preview_len.clamp(1, MAX_PREVIEW),
            held: None,
            can_hold: true,
        };
        seq.refill();
        seq
    }

    fn refill(&mut self) {
        while self.preview.len() < self.preview_len {
            let kind = self.source.draw();
            self.preview.push(kind);
        }
    }

    /// Take the front of the preview and draw a replacement at the back.
    pub fn next(&mut self) -> PieceKind {
        let kind = self.preview.remove(0);
        self.refill();
        kind
    }

    /// Up to `n` upcoming kinds, soonest first.
    pub fn peek(&self, n: usize) -> &[PieceKind] {
        &self.preview[..n.min(self.preview.len())]
    }

    /// The whole preview queue.
    pub fn preview(&self) -> &[PieceKind] {
        &self.preview
    }

    pub fn preview_len(&self) -> usize {
        self.preview_len
    }

    pub fn held(&self) -> Option<PieceKind> {
        self.held
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    /// Swap `current` into the hold slot.
    ///
    /// Returns None when holding was already used for this piece. With an
    /// empty slot the replacement comes from [`Sequencer::next`].
    pub fn hold(&mut self, current: PieceKind) -> Option<HoldSwap> {
        if !self.can_hold {
            return None;
        }
        self.can_hold = false;

        let previous_held = self.held.replace(current);
        let next = match previous_held {
            Some(kind) => kind,
            None => self.next(),
        };
        Some(HoldSwap {
            current: next,
            previous_held,
        })
    }

    /// Re-enable holding; called when a piece locks.
    pub fn release_hold(&mut self) {
        self.can_hold = true;
    }

    /// Empty the hold slot and redraw the preview. The source keeps its state.
    pub fn reset(&mut self) {
        self.held = None;
        self.can_hold = true;
        self.preview.clear();
        self.refill();
    }
}

impl Default for Sequencer<RandomSource> {
    fn default() -> Self {
        Self::new(RandomSource::seeded(1), DEFAULT_PREVIEW_LEN)
    }
}
