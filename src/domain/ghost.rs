/// Ghost entities: the target-tile chooser, the per-ghost personalities and
/// the scripted house choreography.
///
/// A ghost never re-plans continuously. Its route is a two-slot queue:
/// `dir` is what it is moving along right now, `next_dir` applies at the
/// center of the tile it is in, and `next_next_dir` is computed the moment
/// it crosses a tile edge, by looking one tile ahead of `next_dir`. Reversal
/// requests and frightened random draws preempt the queue at the edge event.
///
/// House entry/exit and the in-pen bob are scripted straight-line moves that
/// ignore the tile chooser entirely.

use super::maze::{
    Maze, EYES_TARGET, HOUSE_BOB_BOTTOM, HOUSE_BOB_TOP, HOUSE_CENTER_X, HOUSE_CENTER_Y,
    HOUSE_EXIT_Y, NO_UP_TILES,
};
use super::movement::{self, MAX_SEGMENT};
use super::rng::FrightRng;
use super::vector::Vec2;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GhostName {
    Blinky,
    Pinky,
    Inky,
    Clyde,
}

impl GhostName {
    pub const ALL: [GhostName; 4] = [
        GhostName::Blinky,
        GhostName::Pinky,
        GhostName::Inky,
        GhostName::Clyde,
    ];

    pub fn scatter_corner(self) -> (i32, i32) {
        match self {
            GhostName::Blinky => (25, 0),
            GhostName::Pinky => (2, 0),
            GhostName::Inky => (27, 30),
            GhostName::Clyde => (0, 30),
        }
    }

    /// Resting x inside the pen; eyes return here before reviving.
    pub fn home_x(self) -> f32 {
        match self {
            GhostName::Inky => 12.0,
            GhostName::Clyde => 16.0,
            _ => HOUSE_CENTER_X,
        }
    }
}

/// Scatter/chase, driven globally by the coordinator's mode timer.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mode {
    Scatter,
    Chase,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HouseState {
    /// Bobbing in the pen, waiting for release.
    InHouse,
    /// Scripted path: align to the door column, rise through the door.
    ExitingHouse,
    /// Loose in the maze.
    Active,
    /// Eaten; eyes navigating back to the door.
    GoingToHouse,
    /// Scripted path: descend through the door, slide to the home slot.
    EnteringHouse,
}

/// Per-state speeds in tiles/second, chosen by the caller per level.
#[derive(Clone, Copy, Debug)]
pub struct GhostSpeeds {
    pub active: f32,
    pub frightened: f32,
    pub tunnel: f32,
    pub eyes: f32,
    pub house: f32,
}

#[derive(Clone, Debug)]
pub struct Ghost {
    pub name: GhostName,
    pub pos: Vec2,
    pub dir: Vec2,
    pub next_dir: Vec2,
    pub next_next_dir: Vec2,
    pub state: HouseState,
    pub frightened: bool,
    /// Set by the coordinator on a mode change; consumed at the next edge.
    pub reverse_pending: bool,
    /// Pellets counted against this ghost's personal release limit.
    pub dot_counter: u32,
}

impl Ghost {
    pub fn new(name: GhostName) -> Self {
        let (pos, state, dir) = match name {
            GhostName::Blinky => (Vec2::new(14.0, HOUSE_EXIT_Y), HouseState::Active, Vec2::LEFT),
            GhostName::Pinky => (Vec2::new(14.0, HOUSE_CENTER_Y), HouseState::InHouse, Vec2::DOWN),
            GhostName::Inky => (Vec2::new(12.0, HOUSE_CENTER_Y), HouseState::InHouse, Vec2::UP),
            GhostName::Clyde => (Vec2::new(16.0, HOUSE_CENTER_Y), HouseState::InHouse, Vec2::UP),
        };
        Ghost {
            name,
            pos,
            dir,
            next_dir: dir,
            next_next_dir: dir,
            state,
            frightened: false,
            reverse_pending: false,
            dot_counter: 0,
        }
    }

    pub fn respawn(&mut self) {
        let dots = self.dot_counter;
        *self = Ghost::new(self.name);
        self.dot_counter = dots;
    }

    pub fn tile(&self) -> (i32, i32) {
        self.pos.tile()
    }

    /// Direction the sprite's eyes face.
    pub fn eyes_direction(&self) -> Vec2 {
        if self.dir == Vec2::NULL { Vec2::LEFT } else { self.dir }
    }

    /// Release from the pen onto the exit script.
    pub fn release(&mut self) {
        if self.state == HouseState::InHouse {
            self.state = HouseState::ExitingHouse;
        }
    }

    /// Eyes state after being eaten during fright.
    pub fn send_home(&mut self) {
        self.frightened = false;
        self.reverse_pending = false;
        self.state = HouseState::GoingToHouse;
        // Route is replanned from scratch at the next edge.
        self.next_dir = self.dir;
        self.next_next_dir = self.dir;
    }

    /// Target tile for the chooser, given the rest of the world.
    pub fn target_tile(
        &self,
        mode: Mode,
        pac_tile: (i32, i32),
        pac_dir: Vec2,
        blinky_tile: (i32, i32),
    ) -> (i32, i32) {
        if self.state == HouseState::GoingToHouse {
            return EYES_TARGET;
        }
        if mode == Mode::Scatter {
            return self.name.scatter_corner();
        }
        match self.name {
            GhostName::Blinky => pac_tile,
            GhostName::Pinky => offset_ahead(pac_tile, pac_dir, 4),
            GhostName::Inky => {
                let pivot = offset_ahead(pac_tile, pac_dir, 2);
                (2 * pivot.0 - blinky_tile.0, 2 * pivot.1 - blinky_tile.1)
            }
            GhostName::Clyde => {
                if Vec2::tile_dist_sq(self.tile(), pac_tile) >= 64 {
                    pac_tile
                } else {
                    self.name.scatter_corner()
                }
            }
        }
    }

    /// Advance one tick. `target` is this ghost's current target tile;
    /// unused while frightened or inside the house scripts.
    pub fn step(
        &mut self,
        maze: &Maze,
        rng: &mut FrightRng,
        target: (i32, i32),
        speeds: &GhostSpeeds,
        dt: f32,
    ) {
        match self.state {
            HouseState::InHouse => self.step_bob(speeds.house, dt),
            HouseState::ExitingHouse => self.step_exit(speeds.house, dt),
            HouseState::EnteringHouse => self.step_enter(speeds.house, dt),
            HouseState::Active | HouseState::GoingToHouse => {
                self.step_corridors(maze, rng, target, speeds, dt)
            }
        }
    }

    fn current_speed(&self, maze: &Maze, speeds: &GhostSpeeds) -> f32 {
        if self.state == HouseState::GoingToHouse {
            speeds.eyes
        } else if self.frightened {
            speeds.frightened
        } else if maze.is_warp_tunnel(self.pos) {
            speeds.tunnel
        } else {
            speeds.active
        }
    }

    fn step_corridors(
        &mut self,
        maze: &Maze,
        rng: &mut FrightRng,
        target: (i32, i32),
        speeds: &GhostSpeeds,
        dt: f32,
    ) {
        let mut remaining = dt;
        while remaining > 1e-6 {
            let speed = self.current_speed(maze, speeds);
            let d = (speed * remaining).min(MAX_SEGMENT);
            let out = movement::advance(maze, &mut self.pos, self.dir, d, false);

            if out.crossed_edge {
                self.on_edge(maze, rng, target);
            }
            if out.crossed_center {
                self.on_center();
            }
            remaining -= d / speed;
        }

        if self.state == HouseState::GoingToHouse {
            let (_, row) = self.tile();
            if row == EYES_TARGET.1 && (self.pos.x - HOUSE_CENTER_X).abs() <= 0.5 {
                self.pos.x = HOUSE_CENTER_X;
                self.dir = Vec2::DOWN;
                self.state = HouseState::EnteringHouse;
            }
        }
    }

    /// Entered a new tile: pick what happens at the tile after this one.
    fn on_edge(&mut self, maze: &Maze, rng: &mut FrightRng, target: (i32, i32)) {
        if self.reverse_pending {
            self.reverse_pending = false;
            self.next_dir = -self.dir;
            self.next_next_dir = self.next_dir;
            return;
        }
        if self.frightened {
            let tile = self.tile();
            self.next_dir = random_direction(maze, tile, self.dir, rng);
            self.next_next_dir = self.next_dir;
            return;
        }
        let tile = self.tile();
        let decision = (
            tile.0 + self.next_dir.x as i32,
            tile.1 + self.next_dir.y as i32,
        );
        let allow_up = self.state == HouseState::GoingToHouse;
        self.next_next_dir =
            choose_direction(maze, decision, self.next_dir, target, allow_up);
    }

    /// Crossed a tile center: the queued direction takes effect.
    fn on_center(&mut self) {
        if self.next_dir != self.dir {
            // Align the old axis on the center just crossed before turning.
            if self.dir.x != 0.0 {
                self.pos.x = (self.pos.x - 0.5).round() + 0.5;
            } else {
                self.pos.y = (self.pos.y - 0.5).round() + 0.5;
            }
        }
        self.dir = self.next_dir;
        self.next_dir = self.next_next_dir;
    }

    /// Idle bob between the pen bounds.
    fn step_bob(&mut self, speed: f32, dt: f32) {
        self.pos.y += self.dir.y * speed * dt;
        if self.pos.y <= HOUSE_BOB_TOP {
            self.pos.y = HOUSE_BOB_TOP;
            self.dir = Vec2::DOWN;
        } else if self.pos.y >= HOUSE_BOB_BOTTOM {
            self.pos.y = HOUSE_BOB_BOTTOM;
            self.dir = Vec2::UP;
        }
    }

    /// Slide to the door column, then rise through the door. Hands off to
    /// Active facing left, with the whole queue primed left (the arcade
    /// exit quirk).
    fn step_exit(&mut self, speed: f32, dt: f32) {
        let d = speed * dt;
        if (self.pos.x - HOUSE_CENTER_X).abs() > 1e-4 {
            let step = d.min((self.pos.x - HOUSE_CENTER_X).abs());
            self.dir = if self.pos.x > HOUSE_CENTER_X { Vec2::LEFT } else { Vec2::RIGHT };
            self.pos.x += self.dir.x * step;
            return;
        }
        self.pos.x = HOUSE_CENTER_X;
        self.dir = Vec2::UP;
        self.pos.y -= d;
        if self.pos.y <= HOUSE_EXIT_Y {
            self.pos.y = HOUSE_EXIT_Y;
            self.state = HouseState::Active;
            self.dir = Vec2::LEFT;
            self.next_dir = Vec2::LEFT;
            self.next_next_dir = Vec2::LEFT;
        }
    }

    /// Descend through the door, then slide to the home slot and revive.
    fn step_enter(&mut self, speed: f32, dt: f32) {
        let d = speed * dt;
        if self.pos.y < HOUSE_CENTER_Y {
            self.dir = Vec2::DOWN;
            self.pos.y = (self.pos.y + d).min(HOUSE_CENTER_Y);
            return;
        }
        let home = self.name.home_x();
        if (self.pos.x - home).abs() > 1e-4 {
            let step = d.min((self.pos.x - home).abs());
            self.dir = if self.pos.x > home { Vec2::LEFT } else { Vec2::RIGHT };
            self.pos.x += self.dir.x * step;
            return;
        }
        self.pos.x = home;
        self.state = HouseState::ExitingHouse;
    }
}

fn offset_ahead(tile: (i32, i32), dir: Vec2, n: i32) -> (i32, i32) {
    // Facing up projects left instead of up, reproducing the cabinet's
    // axis-swap bug in the offset arithmetic.
    if dir == Vec2::UP {
        return (tile.0 - n, tile.1);
    }
    (tile.0 + dir.x as i32 * n, tile.1 + dir.y as i32 * n)
}

/// Chooser preference order; also the tie-break order.
const PREFERENCE: [Vec2; 4] = [Vec2::UP, Vec2::LEFT, Vec2::DOWN, Vec2::RIGHT];

/// Pick the exit from `decision` tile that minimizes squared Euclidean
/// distance to `target`, never reversing `incoming`. UP is barred on the
/// four restricted tiles unless `allow_up` (returning eyes).
pub fn choose_direction(
    maze: &Maze,
    decision: (i32, i32),
    incoming: Vec2,
    target: (i32, i32),
    allow_up: bool,
) -> Vec2 {
    let mut best = incoming;
    let mut best_dist = i64::MAX;
    for &cand in &PREFERENCE {
        if cand == -incoming {
            continue;
        }
        if cand == Vec2::UP && !allow_up && NO_UP_TILES.contains(&decision) {
            continue;
        }
        let next = (decision.0 + cand.x as i32, decision.1 + cand.y as i32);
        if maze.blocked_cell(next.0, next.1, false) {
            continue;
        }
        let dist = Vec2::tile_dist_sq(next, target);
        if dist < best_dist {
            best_dist = dist;
            best = cand;
        }
    }
    best
}

/// Clockwise scan order used when resolving a frightened suggestion.
const CLOCKWISE: [Vec2; 4] = [Vec2::UP, Vec2::RIGHT, Vec2::DOWN, Vec2::LEFT];

/// Frightened pick: draw a suggestion from the generator, then scan
/// clockwise from it for the first exit that is open and not a reversal.
/// A dead end falls back to reversing.
pub fn random_direction(maze: &Maze, tile: (i32, i32), dir: Vec2, rng: &mut FrightRng) -> Vec2 {
    let suggestion = rng.next_direction();
    let start = CLOCKWISE.iter().position(|&d| d == suggestion).unwrap_or(0);
    for i in 0..4 {
        let cand = CLOCKWISE[(start + i) % 4];
        if cand == -dir {
            continue;
        }
        let next = (tile.0 + cand.x as i32, tile.1 + cand.y as i32);
        if !maze.blocked_cell(next.0, next.1, false) {
            return cand;
        }
    }
    -dir
}
