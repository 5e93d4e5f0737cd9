/// The player entity.
///
/// Input arrives as discrete direction requests; the requested direction is
/// held until it can be taken. A perpendicular turn snaps the coordinate
/// along the old axis to the tile center (arcade cornering), a reversal is
/// honored immediately. Eating applies a short movement penalty that is
/// consumed before the next step, reproducing the arcade's per-pellet
/// pause.

use super::maze::Maze;
use super::movement::{self, MAX_SEGMENT};
use super::vector::Vec2;

pub const PACMAN_SPAWN: Vec2 = Vec2::new(14.0, 23.5);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PacState {
    Spawning,
    Moving,
    Stuck,
    Turning,
    Dead,
}

#[derive(Clone, Debug)]
pub struct Pacman {
    pub pos: Vec2,
    pub dir: Vec2,
    desired_dir: Vec2,
    pub state: PacState,
    /// Seconds of movement still forfeited from recent pellets.
    penalty: f32,
}

impl Pacman {
    pub fn new() -> Self {
        Pacman {
            pos: PACMAN_SPAWN,
            dir: Vec2::LEFT,
            desired_dir: Vec2::NULL,
            state: PacState::Spawning,
            penalty: 0.0,
        }
    }

    pub fn respawn(&mut self) {
        *self = Pacman::new();
    }

    pub fn tile(&self) -> (i32, i32) {
        self.pos.tile()
    }

    /// Queue a direction request from the input layer.
    pub fn request_direction(&mut self, dir: Vec2) {
        debug_assert!(dir.is_direction() && dir != Vec2::NULL);
        self.desired_dir = dir;
    }

    /// Forfeit `seconds` of upcoming movement (pellet-eat pause).
    pub fn add_penalty(&mut self, seconds: f32) {
        self.penalty += seconds;
    }

    /// Advance one tick's worth of movement at `speed` tiles/second.
    pub fn step(&mut self, maze: &Maze, speed: f32, dt: f32) {
        if self.state == PacState::Dead {
            return;
        }

        let mut remaining = dt;
        if self.penalty > 0.0 {
            let pause = self.penalty.min(remaining);
            self.penalty -= pause;
            remaining -= pause;
            if remaining <= 0.0 {
                return;
            }
        }

        self.try_turn(maze);
        if self.dir == Vec2::NULL {
            return;
        }

        while remaining > 1e-6 {
            let d = (speed * remaining).min(MAX_SEGMENT);
            let out = movement::advance(maze, &mut self.pos, self.dir, d, false);
            if out.stuck {
                self.state = PacState::Stuck;
                return;
            }
            if self.state != PacState::Turning {
                self.state = PacState::Moving;
            }
            remaining -= d / speed;
        }
        if self.state == PacState::Turning {
            self.state = PacState::Moving;
        }
    }

    /// Take the queued direction if it is available from the current tile.
    fn try_turn(&mut self, maze: &Maze) {
        let want = self.desired_dir;
        if want == Vec2::NULL || want == self.dir {
            return;
        }
        if self.dir == Vec2::NULL || want == -self.dir {
            self.dir = want;
            return;
        }
        // Perpendicular: only when the adjacent tile that way is open.
        let (col, row) = self.tile();
        let target = (col + want.x as i32, row + want.y as i32);
        if maze.blocked_cell(target.0, target.1, false) {
            return;
        }
        // Snap the old axis onto the tile center so the new lane lines up.
        if self.dir.x != 0.0 {
            self.pos.x = self.pos.x.floor() + 0.5;
        } else {
            self.pos.y = self.pos.y.floor() + 0.5;
        }
        self.dir = want;
        self.state = PacState::Turning;
    }
}

impl Default for Pacman {
    fn default() -> Self {
        Pacman::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn penalty_pauses_movement() {
        let maze = Maze::new();
        let mut pac = Pacman::new();
        pac.pos = Vec2::new(10.5, 5.5);
        pac.dir = Vec2::RIGHT;
        pac.add_penalty(1.0 / 60.0);
        let x0 = pac.pos.x;
        pac.step(&maze, 6.0, 1.0 / 60.0);
        assert!((pac.pos.x - x0).abs() < 1e-6, "penalty tick should not move");
        pac.step(&maze, 6.0, 1.0 / 60.0);
        assert!(pac.pos.x > x0, "movement resumes after penalty");
    }

    #[test]
    fn reversal_is_immediate() {
        let maze = Maze::new();
        let mut pac = Pacman::new();
        pac.pos = Vec2::new(10.5, 5.5);
        pac.dir = Vec2::RIGHT;
        pac.request_direction(Vec2::LEFT);
        pac.step(&maze, 6.0, 1.0 / 60.0);
        assert_eq!(pac.dir, Vec2::LEFT);
    }

    #[test]
    fn perpendicular_turn_waits_for_open_tile() {
        let maze = Maze::new();
        let mut pac = Pacman::new();
        // Row 5 corridor; below col 10 at row 6 is a wall, so DOWN is
        // unavailable here and the request stays queued.
        pac.pos = Vec2::new(10.2, 5.5);
        pac.dir = Vec2::RIGHT;
        pac.request_direction(Vec2::DOWN);
        pac.step(&maze, 6.0, 1.0 / 60.0);
        assert_eq!(pac.dir, Vec2::RIGHT);
    }

    #[test]
    fn perpendicular_turn_snaps_to_center() {
        let maze = Maze::new();
        let mut pac = Pacman::new();
        // Col 6 of row 5 opens downward (corridor on col 6).
        pac.pos = Vec2::new(6.3, 5.5);
        pac.dir = Vec2::RIGHT;
        pac.request_direction(Vec2::DOWN);
        pac.step(&maze, 6.0, 1.0 / 60.0);
        assert_eq!(pac.dir, Vec2::DOWN);
        assert!((pac.pos.x - 6.5).abs() < 1e-5, "snapped onto the lane");
    }

    #[test]
    fn wall_marks_stuck() {
        let maze = Maze::new();
        let mut pac = Pacman::new();
        pac.pos = Vec2::new(1.5, 1.5);
        pac.dir = Vec2::LEFT;
        pac.step(&maze, 6.0, 1.0 / 60.0);
        assert_eq!(pac.state, PacState::Stuck);
        assert!((pac.pos.x - 1.5).abs() < 1e-5);
    }
}
