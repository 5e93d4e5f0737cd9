/// Ghost coordination: the global scatter/chase clock, fright windows,
/// house-release bookkeeping and ghost/Pac-Man contact.
///
/// Release works on dot counters, not time. Each housed ghost has a
/// personal counter fed while it is the preferred (longest-waiting) housed
/// ghost; after a lost life a single global counter takes over until it
/// reaches Clyde's threshold. A starvation timer forces the next ghost out
/// if no pellet is eaten for too long.

use crate::domain::ghost::{Ghost, GhostName, GhostSpeeds, HouseState, Mode};
use crate::domain::maze::Maze;
use crate::domain::rng::FrightRng;
use crate::domain::vector::Vec2;
use crate::sim::event::GameEvent;
use crate::sim::level::{
    global_dot_limit, personal_dot_limit, LevelSpec, EYES_SPEED_FACTOR, FULL_SPEED,
    HOUSE_SPEED_FRACTION, TICK_SECONDS,
};

/// Release preference when several ghosts wait in the pen.
const RELEASE_ORDER: [GhostName; 3] = [GhostName::Pinky, GhostName::Inky, GhostName::Clyde];

/// Fright flashes white for its last two seconds.
const FLASH_FRAMES: u32 = 120;

#[derive(Clone, Copy, Debug)]
pub enum Contact {
    Eaten { name: GhostName, chain: u32 },
    Caught,
}

#[derive(Clone, Debug)]
pub struct GhostCoordinator {
    pub ghosts: [Ghost; 4],
    rng: FrightRng,
    mode_frames: u32,
    applied_mode: Mode,
    fright_frames_left: u32,
    ghosts_eaten: u32,
    global_counter: u32,
    global_counter_active: bool,
    frames_since_pellet: u32,
}

impl GhostCoordinator {
    pub fn new() -> Self {
        GhostCoordinator {
            ghosts: GhostName::ALL.map(Ghost::new),
            rng: FrightRng::new(),
            mode_frames: 0,
            applied_mode: Mode::Scatter,
            fright_frames_left: 0,
            ghosts_eaten: 0,
            global_counter: 0,
            global_counter_active: false,
            frames_since_pellet: 0,
        }
    }

    /// Fresh level: everything resets, personal counters included.
    pub fn reset_for_level(&mut self) {
        *self = GhostCoordinator {
            rng: self.rng.clone(),
            ..GhostCoordinator::new()
        };
    }

    /// After a lost life: positions and clock reset, personal counters
    /// survive, and the global counter takes over release duty.
    pub fn reset_after_death(&mut self) {
        for g in &mut self.ghosts {
            g.respawn();
        }
        self.mode_frames = 0;
        self.applied_mode = Mode::Scatter;
        self.fright_frames_left = 0;
        self.ghosts_eaten = 0;
        self.global_counter = 0;
        self.global_counter_active = true;
        self.frames_since_pellet = 0;
    }

    pub fn mode(&self) -> Mode {
        self.applied_mode
    }

    pub fn fright_active(&self) -> bool {
        self.fright_frames_left > 0
    }

    pub fn fright_flashing(&self) -> bool {
        self.fright_active() && self.fright_frames_left <= FLASH_FRAMES
    }

    pub fn ghost(&self, name: GhostName) -> &Ghost {
        // Construction order follows GhostName::ALL.
        &self.ghosts[name as usize]
    }

    fn blinky_tile(&self) -> (i32, i32) {
        self.ghosts[0].tile()
    }

    fn housed(&self) -> Option<usize> {
        RELEASE_ORDER.iter().find_map(|&name| {
            self.ghosts
                .iter()
                .position(|g| g.name == name && g.state == HouseState::InHouse)
        })
    }

    /// A pellet was eaten: feed the release counters.
    pub fn on_pellet(&mut self) {
        self.frames_since_pellet = 0;
        if self.global_counter_active {
            self.global_counter += 1;
            if let Some(i) = self.housed() {
                let name = self.ghosts[i].name;
                if name == GhostName::Clyde && self.global_counter >= global_dot_limit(name) {
                    // Clyde's threshold retires the global counter instead
                    // of releasing him; his personal counter resumes.
                    self.global_counter_active = false;
                    self.global_counter = 0;
                } else if self.global_counter >= global_dot_limit(name) {
                    self.ghosts[i].release();
                }
            }
        } else if let Some(i) = self.housed() {
            self.ghosts[i].dot_counter += 1;
        }
    }

    /// A power pellet was eaten: open a fright window.
    pub fn start_fright(&mut self, spec: &LevelSpec, events: &mut Vec<GameEvent>) {
        for g in &mut self.ghosts {
            match g.state {
                HouseState::GoingToHouse | HouseState::EnteringHouse => {}
                HouseState::Active => {
                    g.reverse_pending = true;
                    g.frightened = spec.fright_frames > 0;
                }
                _ => {
                    g.frightened = spec.fright_frames > 0;
                }
            }
        }
        if spec.fright_frames > 0 {
            self.fright_frames_left = spec.fright_frames;
            self.ghosts_eaten = 0;
            events.push(GameEvent::FrightStarted { frames: spec.fright_frames });
        }
    }

    /// One tick: clocks, releases, then ghost movement.
    pub fn step(
        &mut self,
        maze: &Maze,
        spec: &LevelSpec,
        level: u32,
        pac_tile: (i32, i32),
        pac_dir: Vec2,
        speed_scale: f32,
        events: &mut Vec<GameEvent>,
    ) {
        // Fright clock pauses the scatter/chase schedule.
        if self.fright_frames_left > 0 {
            self.fright_frames_left -= 1;
            if self.fright_frames_left == 0 {
                for g in &mut self.ghosts {
                    g.frightened = false;
                }
                events.push(GameEvent::FrightEnded);
            }
        } else {
            self.mode_frames += 1;
            let mode = crate::sim::level::mode_at(spec, self.mode_frames);
            if mode != self.applied_mode {
                self.applied_mode = mode;
                for g in &mut self.ghosts {
                    if g.state == HouseState::Active && !g.frightened {
                        g.reverse_pending = true;
                    }
                }
            }
        }

        // Personal-counter release (the global counter releases on pellets).
        if !self.global_counter_active {
            if let Some(i) = self.housed() {
                let g = &mut self.ghosts[i];
                if g.dot_counter >= personal_dot_limit(g.name, level) {
                    g.release();
                }
            }
        }

        // Pellet starvation forces the next ghost out.
        self.frames_since_pellet += 1;
        if self.frames_since_pellet >= spec.pellet_timeout {
            if let Some(i) = self.housed() {
                self.ghosts[i].release();
            }
            self.frames_since_pellet = 0;
        }

        let speeds = GhostSpeeds {
            active: spec.ghost_speed * FULL_SPEED * speed_scale,
            frightened: spec.ghost_fright_speed * FULL_SPEED * speed_scale,
            tunnel: spec.ghost_tunnel_speed * FULL_SPEED * speed_scale,
            eyes: EYES_SPEED_FACTOR * FULL_SPEED * speed_scale,
            house: HOUSE_SPEED_FRACTION * FULL_SPEED * speed_scale,
        };
        let blinky_tile = self.blinky_tile();
        for i in 0..self.ghosts.len() {
            let target =
                self.ghosts[i].target_tile(self.applied_mode, pac_tile, pac_dir, blinky_tile);
            self.ghosts[i].step(maze, &mut self.rng, target, &speeds, TICK_SECONDS);
        }
    }

    /// Tile-overlap contacts, in ghost order. At most one `Caught` is
    /// reported; eyes in transit never collide.
    pub fn contacts(&mut self, pac_tile: (i32, i32)) -> Vec<Contact> {
        let mut out = vec![];
        for g in &mut self.ghosts {
            if g.tile() != pac_tile {
                continue;
            }
            match g.state {
                HouseState::GoingToHouse | HouseState::EnteringHouse => {}
                HouseState::Active if g.frightened => {
                    let chain = self.ghosts_eaten;
                    self.ghosts_eaten += 1;
                    g.send_home();
                    out.push(Contact::Eaten { name: g.name, chain });
                }
                HouseState::Active => {
                    out.push(Contact::Caught);
                    break;
                }
                _ => {}
            }
        }
        out
    }
}

impl Default for GhostCoordinator {
    fn default() -> Self {
        GhostCoordinator::new()
    }
}
