//! Spawner module - uniform random piece generation with one-step lookahead
//!
//! Kind and color are drawn independently and uniformly. The pair on display
//! as "next" is always valid: it is generated eagerly, and a fresh pair is
//! drawn the moment the current one is taken.
//!
//! Uses a simple seedable LCG so games are reproducible in tests.

use crate::types::{CellColor, PieceKind};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Random value in [0, max).
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }
}

/// Produces kind/color pairs one step ahead of need.
#[derive(Debug, Clone)]
pub struct Spawner {
    rng: SimpleRng,
    next_kind: PieceKind,
    next_color: CellColor,
}

impl Spawner {
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let next_kind = Self::draw_kind(&mut rng);
        let next_color = Self::draw_color(&mut rng);
        Self {
            rng,
            next_kind,
            next_color,
        }
    }

    fn draw_kind(rng: &mut SimpleRng) -> PieceKind {
        PieceKind::ALL[rng.next_range(PieceKind::ALL.len() as u32) as usize]
    }

    fn draw_color(rng: &mut SimpleRng) -> CellColor {
        CellColor::PLAYABLE[rng.next_range(CellColor::PLAYABLE.len() as u32) as usize]
    }

    /// The pair the preview shows.
    pub fn preview(&self) -> (PieceKind, CellColor) {
        (self.next_kind, self.next_color)
    }

    /// Consume the preview pair for the new active piece and refill it.
    pub fn take(&mut self) -> (PieceKind, CellColor) {
        let pair = (self.next_kind, self.next_color);
        self.next_kind = Self::draw_kind(&mut self.rng);
        self.next_color = Self::draw_color(&mut self.rng);
        pair
    }
}
