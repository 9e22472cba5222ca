use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Zobrist keys for tile layouts with a fixed number of cells.
///
/// There is one key per (cell, tile value) pair. The seed is fixed, so the key of a layout is
/// the same in every table built for the same cell count.
pub struct Zobrist {
    cells: usize,
    keys: Vec<u64>,
}

impl Zobrist {
    pub fn new(cells: usize) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(0x123456789abcdef0);
        let keys = (0..cells * cells).map(|_| rng.next_u64()).collect();
        Zobrist { cells, keys }
    }

    /// Key for `value` sitting at `cell`
    pub fn tile_hash(&self, cell: usize, value: u32) -> u64 {
        self.keys[cell * self.cells + value as usize]
    }

    /// Compute the hash of a whole layout. Every value must be below `cells`.
    pub fn compute_hash(&self, tiles: &[u32]) -> u64 {
        tiles
            .iter()
            .enumerate()
            .fold(0, |hash, (cell, &value)| hash ^ self.tile_hash(cell, value))
    }

    /// Hash after swapping the values at `a` and `b`, given the hash before the swap
    pub fn swap_hash(&self, hash: u64, a: (usize, u32), b: (usize, u32)) -> u64 {
        hash ^ self.tile_hash(a.0, a.1)
            ^ self.tile_hash(b.0, b.1)
            ^ self.tile_hash(a.0, b.1)
            ^ self.tile_hash(b.0, a.1)
    }
}
