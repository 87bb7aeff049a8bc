//! RNG module - piece selection
//!
//! Pieces are drawn uniformly and independently from the seven kinds; there
//! is no bag, so streaks and droughts are possible. The source is injected
//! into the game state through [`PieceSource`], which keeps games
//! reproducible from a seed and lets tests script the exact sequence.

use crate::types::PieceKind;

/// Order kinds are indexed in when drawing
pub const SPAWN_ORDER: [PieceKind; 7] = [
    PieceKind::I,
    PieceKind::L,
    PieceKind::J,
    PieceKind::O,
    PieceKind::T,
    PieceKind::S,
    PieceKind::Z,
];

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales by the high bits; the low bits of an LCG cycle with short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Current internal state
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Supplies the kind of every spawned piece
pub trait PieceSource: Send {
    fn next_kind(&mut self) -> PieceKind;
}

/// Uniform, independent draws over the seven kinds
#[derive(Debug, Clone)]
pub struct UniformSource {
    rng: SimpleRng,
}

impl UniformSource {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }
}

impl Default for UniformSource {
    fn default() -> Self {
        Self::new(1)
    }
}

impl PieceSource for UniformSource {
    fn next_kind(&mut self) -> PieceKind {
        SPAWN_ORDER[self.rng.next_range(SPAWN_ORDER.len() as u32) as usize]
    }
}

/// Replays a fixed list of kinds, wrapping around at the end
#[derive(Debug, Clone)]
pub struct SequenceSource {
    kinds: Vec<PieceKind>,
    index: usize,
}

impl SequenceSource {
    /// Falls back to a single `O` when `kinds` is empty
    pub fn new(kinds: impl IntoIterator<Item = PieceKind>) -> Self {
        let mut kinds: Vec<PieceKind> = kinds.into_iter().collect();
        if kinds.is_empty() {
            kinds.push(PieceKind::O);
        }
        Self { kinds, index: 0 }
    }

    /// Always the same kind
    pub fn repeat(kind: PieceKind) -> Self {
        Self::new([kind])
    }
}

impl PieceSource for SequenceSource {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.index % self.kinds.len()];
        self.index = (self.index + 1) % self.kinds.len();
        kind
    }
}
