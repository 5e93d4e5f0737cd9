/// Frightened-ghost direction generator.
///
/// The arcade hardware picks frightened directions by stepping an index with
/// `i = (i * 5 + 1) mod 8192` and reading a byte out of the code ROM at that
/// address; the low two bits select a direction. The recurrence and the
/// two-bit decode are reproduced exactly. The ROM page itself is not
/// redistributable, so the table contents are a fixed deterministic stand-in
/// built once at compile time — the generator is still fully deterministic
/// and regression-tested against golden sequences.

use super::vector::Vec2;

pub const TABLE_LEN: usize = 8192;

const fn build_table() -> [u8; TABLE_LEN] {
    let mut t = [0u8; TABLE_LEN];
    let mut i = 0;
    while i < TABLE_LEN {
        t[i] = ((i * 13) ^ (i >> 5)) as u8;
        i += 1;
    }
    t
}

static ROM_TABLE: [u8; TABLE_LEN] = build_table();

/// Two-bit decode order used by the arcade routine.
const DIRECTIONS: [Vec2; 4] = [Vec2::RIGHT, Vec2::DOWN, Vec2::LEFT, Vec2::UP];

#[derive(Clone, Debug)]
pub struct FrightRng {
    index: usize,
}

impl FrightRng {
    pub fn new() -> Self {
        FrightRng { index: 0 }
    }

    #[cfg(test)]
    pub fn seeded(index: usize) -> Self {
        FrightRng { index: index % TABLE_LEN }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Advance the index and fetch the table byte at the new position.
    pub fn next_byte(&mut self) -> u8 {
        self.index = (self.index * 5 + 1) % TABLE_LEN;
        ROM_TABLE[self.index]
    }

    /// Draw a direction suggestion for a frightened ghost.
    pub fn next_direction(&mut self) -> Vec2 {
        DIRECTIONS[(self.next_byte() & 3) as usize]
    }
}

impl Default for FrightRng {
    fn default() -> Self {
        FrightRng::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_recurrence_golden() {
        let mut rng = FrightRng::new();
        let mut indices = vec![];
        for _ in 0..8 {
            rng.next_byte();
            indices.push(rng.index());
        }
        assert_eq!(indices, vec![1, 6, 31, 156, 781, 3906, 3147, 7544]);
    }

    #[test]
    fn byte_sequence_golden() {
        let mut rng = FrightRng::new();
        let bytes: Vec<u8> = (0..8).map(|_| rng.next_byte()).collect();
        assert_eq!(bytes, vec![13, 78, 147, 232, 177, 32, 173, 243]);
    }

    #[test]
    fn direction_sequence_golden() {
        let mut rng = FrightRng::new();
        let dirs: Vec<Vec2> = (0..8).map(|_| rng.next_direction()).collect();
        assert_eq!(
            dirs,
            vec![
                Vec2::DOWN,  // 13 & 3 == 1
                Vec2::LEFT,  // 78 & 3 == 2
                Vec2::UP,    // 147 & 3 == 3
                Vec2::RIGHT, // 232 & 3 == 0
                Vec2::DOWN,
                Vec2::RIGHT,
                Vec2::DOWN,
                Vec2::UP,
            ]
        );
    }

    #[test]
    fn index_wraps_within_table() {
        let mut rng = FrightRng::seeded(TABLE_LEN - 1);
        for _ in 0..10_000 {
            rng.next_byte();
            assert!(rng.index() < TABLE_LEN);
        }
    }
}
