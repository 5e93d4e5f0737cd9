/// Shared sub-tile movement for Pac-Man and the ghosts.
///
/// One `advance` call moves a point a scalar distance along its direction,
/// probing half a tile ahead for walls. A blocked step clips the coordinate
/// along the axis of motion to the nearest tile center instead of advancing.
/// The warp-tunnel row wraps x by the true overflow amount, never a clamp.
///
/// Callers split a tick into short segments (≤ `MAX_SEGMENT` tiles) and
/// carry the unused time forward, so a speed change (entering the tunnel,
/// fright wearing off) takes effect mid-step rather than at the next tick.

use super::maze::{Maze, COLS, TUNNEL_ROW, WARP_MARGIN};
use super::vector::Vec2;

/// Forward probe distance: half a tile, biased forward. The exact bias
/// matters — a plain 0.5 probe lands on tile boundaries and reports
/// spurious walls, which changes cornering timing.
pub const COLLISION_LOOKAHEAD: f32 = 0.5000001;

/// Longest segment a single `advance` may cover, so at most one tile edge
/// and one tile center can be crossed per call.
pub const MAX_SEGMENT: f32 = 0.4;

#[derive(Clone, Copy, Debug, Default)]
pub struct MoveOutcome {
    /// Crossed a tile boundary (entered a new tile).
    pub crossed_edge: bool,
    /// Crossed (or was clipped exactly onto) a tile center.
    pub crossed_center: bool,
    /// Step was blocked and the position clipped to a tile center.
    pub stuck: bool,
}

fn blocked_at(maze: &Maze, p: Vec2, pass_door: bool) -> bool {
    let (col, row) = p.tile();
    maze.blocked_cell(col, row, pass_door)
}

pub fn advance(maze: &Maze, pos: &mut Vec2, dir: Vec2, distance: f32, pass_door: bool) -> MoveOutcome {
    let mut out = MoveOutcome::default();
    if dir == Vec2::NULL || distance <= 0.0 {
        return out;
    }
    debug_assert!(dir.is_direction(), "advance called with non-canonical direction");

    let horizontal = dir.x != 0.0;
    let along0 = if horizontal { pos.x } else { pos.y };

    let candidate = *pos + dir * distance;
    let probe = candidate + dir * COLLISION_LOOKAHEAD;

    let mut next = candidate;
    if blocked_at(maze, probe, pass_door) {
        // Clip to the nearest tile center along the axis of motion.
        if horizontal {
            next.x = candidate.x.floor() + 0.5;
        } else {
            next.y = candidate.y.floor() + 0.5;
        }
        out.stuck = true;
    }

    let along1 = if horizontal { next.x } else { next.y };
    let positive = dir.x + dir.y > 0.0;
    out.crossed_edge = along1.floor() != along0.floor();
    out.crossed_center = if positive {
        (along1 - 0.5).floor() != (along0 - 0.5).floor()
    } else {
        (along0 - 0.5).ceil() != (along1 - 0.5).ceil()
    };

    // Warp tunnel: wrap by the overflow amount once past the margin.
    if next.y.floor() as i32 == TUNNEL_ROW {
        let span = COLS as f32 + 2.0 * WARP_MARGIN;
        if next.x > COLS as f32 + WARP_MARGIN {
            next.x -= span;
        } else if next.x < -WARP_MARGIN {
            next.x += span;
        }
    }

    *pos = next;
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_corridor_moves_full_distance() {
        let maze = Maze::new();
        // Row 5 is an open corridor.
        let mut pos = Vec2::new(10.5, 5.5);
        let out = advance(&maze, &mut pos, Vec2::RIGHT, 0.3, false);
        assert!((pos.x - 10.8).abs() < 1e-5);
        assert!(!out.stuck);
        assert!(!out.crossed_edge);
    }

    #[test]
    fn wall_clips_to_tile_center() {
        let maze = Maze::new();
        // Col 1 of row 1: wall immediately to the left at col 0.
        let mut pos = Vec2::new(1.5, 1.5);
        let out = advance(&maze, &mut pos, Vec2::LEFT, 0.2, false);
        assert!(out.stuck);
        assert!((pos.x - 1.5).abs() < 1e-5, "clipped back to center, got {}", pos.x);
    }

    #[test]
    fn clip_reports_center_landing() {
        let maze = Maze::new();
        let mut pos = Vec2::new(1.8, 1.5);
        let out = advance(&maze, &mut pos, Vec2::LEFT, 0.4, false);
        // Candidate 1.4 probes into the wall at col 0; clip to 1.5.
        assert!(out.stuck);
        assert!(out.crossed_center);
        assert!((pos.x - 1.5).abs() < 1e-5);
    }

    #[test]
    fn edge_and_center_crossings() {
        let maze = Maze::new();
        let mut pos = Vec2::new(10.9, 5.5);
        let out = advance(&maze, &mut pos, Vec2::RIGHT, 0.2, false);
        assert!(out.crossed_edge);
        assert!(!out.crossed_center);

        let out = advance(&maze, &mut pos, Vec2::RIGHT, 0.4, false);
        assert!(out.crossed_center);
    }

    #[test]
    fn warp_right_offsets_by_overflow() {
        let maze = Maze::new();
        let mut pos = Vec2::new(COLS as f32 + WARP_MARGIN - 0.1, TUNNEL_ROW as f32 + 0.5);
        advance(&maze, &mut pos, Vec2::RIGHT, 0.3, false);
        // Overflow 0.2 past the margin reappears 0.2 inside the left margin.
        let expected = -WARP_MARGIN + 0.2;
        assert!((pos.x - expected).abs() < 1e-4, "got {}", pos.x);
    }

    #[test]
    fn warp_round_trip_returns_to_start() {
        let maze = Maze::new();
        let y = TUNNEL_ROW as f32 + 0.5;
        let start = Vec2::new(25.5, y);
        let mut pos = start;
        // Out through the right tunnel and back in again from the left,
        // then retrace the same distance.
        for _ in 0..28 {
            advance(&maze, &mut pos, Vec2::RIGHT, 0.25, false);
        }
        assert!((pos.x - 0.5).abs() < 1e-3, "expected to re-enter at the left edge, got {}", pos.x);
        for _ in 0..28 {
            advance(&maze, &mut pos, Vec2::LEFT, 0.25, false);
        }
        assert!((pos.x - start.x).abs() < 1e-3, "got {}", pos.x);
        assert!((pos.y - start.y).abs() < 1e-5);
    }
}
