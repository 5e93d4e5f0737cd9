/// Per-level tuning: scatter/chase schedule, fright duration, speed
/// fractions and house-release timings. Everything is expressed in frames
/// of the fixed 60 Hz tick, matching the cabinet's frame counting.

use crate::domain::ghost::Mode;

pub const TICKS_PER_SECOND: u32 = 60;
pub const TICK_SECONDS: f32 = 1.0 / TICKS_PER_SECOND as f32;

/// Top speed in tiles/second that all speed fractions scale:
/// 75.757576 px/s on 8 px tiles.
pub const FULL_SPEED: f32 = 75.757576 / 8.0;

/// Eaten-ghost eyes run at a fixed multiple of full speed, level-independent.
pub const EYES_SPEED_FACTOR: f32 = 1.5;

/// Speed of the scripted in-house bob and door transit, as a fraction.
pub const HOUSE_SPEED_FRACTION: f32 = 0.40;

/// Pellet count thresholds at which the bonus fruit appears.
pub const FRUIT_TRIGGERS: [u32; 2] = [70, 170];
/// Frames the fruit stays on screen before despawning.
pub const FRUIT_FRAMES: u32 = 570;

/// Score at which the single extra life is granted.
pub const EXTRA_LIFE_SCORE: u32 = 10_000;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FruitKind {
    Cherry,
    Strawberry,
    Orange,
    Apple,
    Melon,
    Galaxian,
    Bell,
    Key,
}

impl FruitKind {
    pub fn points(self) -> u32 {
        match self {
            FruitKind::Cherry => 100,
            FruitKind::Strawberry => 300,
            FruitKind::Orange => 500,
            FruitKind::Apple => 700,
            FruitKind::Melon => 1000,
            FruitKind::Galaxian => 2000,
            FruitKind::Bell => 3000,
            FruitKind::Key => 5000,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            FruitKind::Cherry => '%',
            FruitKind::Strawberry => '&',
            FruitKind::Orange => 'o',
            FruitKind::Apple => '@',
            FruitKind::Melon => 'W',
            FruitKind::Galaxian => 'A',
            FruitKind::Bell => '8',
            FruitKind::Key => 'F',
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct LevelSpec {
    /// Alternating scatter/chase phase lengths, starting with scatter.
    /// The final entry is effectively infinite (chase forever).
    pub phases: [u32; 8],
    /// Fright duration; 0 means power pellets only force a reversal.
    pub fright_frames: u32,
    pub pac_speed: f32,
    pub pac_fright_speed: f32,
    pub ghost_speed: f32,
    pub ghost_fright_speed: f32,
    pub ghost_tunnel_speed: f32,
    /// Frames without a pellet before the next housed ghost is forced out.
    pub pellet_timeout: u32,
    pub fruit: FruitKind,
}

pub fn level_spec(level: u32) -> LevelSpec {
    let fruit = match level {
        0 | 1 => FruitKind::Cherry,
        2 => FruitKind::Strawberry,
        3 | 4 => FruitKind::Orange,
        5 | 6 => FruitKind::Apple,
        7 | 8 => FruitKind::Melon,
        9 | 10 => FruitKind::Galaxian,
        11 | 12 => FruitKind::Bell,
        _ => FruitKind::Key,
    };
    match level {
        0 | 1 => LevelSpec {
            phases: [420, 1200, 420, 1200, 300, 1200, 300, u32::MAX],
            fright_frames: 360,
            pac_speed: 0.80,
            pac_fright_speed: 0.90,
            ghost_speed: 0.75,
            ghost_fright_speed: 0.50,
            ghost_tunnel_speed: 0.40,
            pellet_timeout: 240,
            fruit,
        },
        2..=4 => LevelSpec {
            phases: [420, 1200, 420, 1200, 300, 61980, 1, u32::MAX],
            fright_frames: match level {
                2 => 300,
                3 => 240,
                _ => 180,
            },
            pac_speed: 0.90,
            pac_fright_speed: 0.95,
            ghost_speed: 0.85,
            ghost_fright_speed: 0.55,
            ghost_tunnel_speed: 0.45,
            pellet_timeout: 240,
            fruit,
        },
        _ => LevelSpec {
            phases: [300, 1200, 300, 1200, 300, 62262, 1, u32::MAX],
            fright_frames: if level <= 8 { 120 } else { 60 },
            pac_speed: 1.00,
            pac_fright_speed: 1.00,
            ghost_speed: 0.95,
            ghost_fright_speed: 0.60,
            ghost_tunnel_speed: 0.50,
            pellet_timeout: 180,
            fruit,
        },
    }
}

/// Which mode the schedule dictates after `frames` of non-frightened play.
pub fn mode_at(spec: &LevelSpec, frames: u32) -> Mode {
    let mut elapsed: u64 = 0;
    for (i, &len) in spec.phases.iter().enumerate() {
        elapsed += len as u64;
        if (frames as u64) < elapsed {
            return if i % 2 == 0 { Mode::Scatter } else { Mode::Chase };
        }
    }
    Mode::Chase
}

/// Personal dot limit before a housed ghost is released (arcade table).
pub fn personal_dot_limit(name: crate::domain::ghost::GhostName, level: u32) -> u32 {
    use crate::domain::ghost::GhostName;
    match name {
        GhostName::Inky => match level {
            0 | 1 => 30,
            _ => 0,
        },
        GhostName::Clyde => match level {
            0 | 1 => 60,
            2 => 50,
            _ => 0,
        },
        _ => 0,
    }
}

/// Global dot-counter limit (in effect after a life is lost).
pub fn global_dot_limit(name: crate::domain::ghost::GhostName) -> u32 {
    use crate::domain::ghost::GhostName;
    match name {
        GhostName::Pinky => 7,
        GhostName::Inky => 17,
        GhostName::Clyde => 32,
        GhostName::Blinky => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_level_schedule() {
        let spec = level_spec(1);
        assert_eq!(spec.phases, [420, 1200, 420, 1200, 300, 1200, 300, u32::MAX]);
        assert_eq!(mode_at(&spec, 0), Mode::Scatter);
        assert_eq!(mode_at(&spec, 419), Mode::Scatter);
        assert_eq!(mode_at(&spec, 420), Mode::Chase);
        assert_eq!(mode_at(&spec, 1619), Mode::Chase);
        assert_eq!(mode_at(&spec, 1620), Mode::Scatter);
    }

    #[test]
    fn late_levels_end_in_permanent_chase() {
        let spec = level_spec(7);
        assert_eq!(mode_at(&spec, 10_000_000), Mode::Chase);
    }

    #[test]
    fn fright_shrinks_with_level() {
        assert!(level_spec(1).fright_frames > level_spec(3).fright_frames);
        assert!(level_spec(3).fright_frames > level_spec(9).fright_frames);
    }

    #[test]
    fn fruit_progression() {
        assert_eq!(level_spec(1).fruit, FruitKind::Cherry);
        assert_eq!(level_spec(2).fruit, FruitKind::Strawberry);
        assert_eq!(level_spec(13).fruit, FruitKind::Key);
        assert_eq!(level_spec(40).fruit, FruitKind::Key);
        assert_eq!(FruitKind::Key.points(), 5000);
    }

    #[test]
    fn dot_limits_relax_with_level() {
        use crate::domain::ghost::GhostName;
        assert_eq!(personal_dot_limit(GhostName::Pinky, 1), 0);
        assert_eq!(personal_dot_limit(GhostName::Inky, 1), 30);
        assert_eq!(personal_dot_limit(GhostName::Clyde, 1), 60);
        assert_eq!(personal_dot_limit(GhostName::Clyde, 2), 50);
        assert_eq!(personal_dot_limit(GhostName::Clyde, 3), 0);
    }
}
