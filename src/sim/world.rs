/// World state: everything the simulation mutates, plus read-only views
/// for the renderer. Pure state and transitions; the per-tick pipeline
/// lives in `sim::step`.

use crate::config::SimConfig;
use crate::domain::ghost::HouseState;
use crate::domain::maze::Maze;
use crate::domain::pacman::Pacman;
use crate::domain::vector::Vec2;
use crate::sim::coordinator::GhostCoordinator;
use crate::sim::level::{level_spec, FruitKind, LevelSpec};
use crate::sim::score::Score;

/// Outer game phase. The simulation proper only runs during `Playing`;
/// the other phases are timed interstitials.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Title,
    Ready,
    Playing,
    Dying,
    LevelComplete,
    GameOver,
}

/// Interstitial lengths in frames.
pub const READY_FRAMES: u32 = 120;
pub const DYING_FRAMES: u32 = 110;
pub const LEVEL_COMPLETE_FRAMES: u32 = 120;

/// Where the bonus fruit appears, just below the ghost house.
pub const FRUIT_POS: Vec2 = Vec2::new(14.0, 17.5);

#[derive(Clone, Copy, Debug)]
pub struct Fruit {
    pub kind: FruitKind,
    pub pos: Vec2,
    pub frames_left: u32,
}

/// Renderer-facing snapshot of one ghost.
#[derive(Clone, Copy, Debug)]
pub struct GhostView {
    pub name: crate::domain::ghost::GhostName,
    pub pos: Vec2,
    pub facing: Vec2,
    pub frightened: bool,
    pub eyes_only: bool,
    pub flashing: bool,
}

pub struct WorldState {
    pub maze: Maze,
    pub pacman: Pacman,
    pub ghosts: GhostCoordinator,
    pub score: Score,
    pub lives: u32,
    pub level: u32,
    pub spec: LevelSpec,
    pub phase: Phase,
    pub phase_frames: u32,
    pub tick: u64,
    /// Fractional frames carried over between `update` calls.
    pub frame_accum: f64,
    pub fruit: Option<Fruit>,
    pub pellets_eaten: u32,
    pub extra_life_awarded: bool,
    pub speed_scale: f32,
    pub starting_lives: u32,
    pub start_level: u32,
}

impl WorldState {
    pub fn new(config: &SimConfig) -> Self {
        let level = config.start_level.max(1);
        WorldState {
            maze: Maze::new(),
            pacman: Pacman::new(),
            ghosts: GhostCoordinator::new(),
            score: Score::new(),
            lives: config.starting_lives,
            level,
            spec: level_spec(level),
            phase: Phase::Title,
            phase_frames: 0,
            tick: 0,
            frame_accum: 0.0,
            fruit: None,
            pellets_eaten: 0,
            extra_life_awarded: false,
            speed_scale: config.speed_scale,
            starting_lives: config.starting_lives,
            start_level: config.start_level.max(1),
        }
    }

    /// Title screen → a fresh game.
    pub fn start_game(&mut self) {
        self.score.reset_for_new_game();
        self.lives = self.starting_lives;
        self.level = self.start_level;
        self.extra_life_awarded = false;
        self.enter_level(self.start_level);
    }

    /// Set up `level` from scratch and enter the Ready pause.
    pub fn enter_level(&mut self, level: u32) {
        self.level = level;
        self.spec = level_spec(level);
        self.maze = Maze::new();
        self.pacman.respawn();
        self.ghosts.reset_for_level();
        self.fruit = None;
        self.pellets_eaten = 0;
        self.phase = Phase::Ready;
        self.phase_frames = READY_FRAMES;
    }

    pub fn advance_level(&mut self) {
        self.enter_level(self.level + 1);
    }

    /// Respawn after a lost life; pellets stay eaten.
    pub fn restart_after_death(&mut self) {
        self.pacman.respawn();
        self.ghosts.reset_after_death();
        self.fruit = None;
        self.phase = Phase::Ready;
        self.phase_frames = READY_FRAMES;
    }

    pub fn ghost_views(&self) -> Vec<GhostView> {
        let flashing = self.ghosts.fright_flashing();
        self.ghosts
            .ghosts
            .iter()
            .map(|g| GhostView {
                name: g.name,
                pos: g.pos,
                facing: g.eyes_direction(),
                frightened: g.frightened,
                eyes_only: matches!(
                    g.state,
                    HouseState::GoingToHouse | HouseState::EnteringHouse
                ),
                flashing: flashing && g.frightened,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;

    fn world() -> WorldState {
        WorldState::new(&SimConfig::default())
    }

    #[test]
    fn new_game_starts_on_the_title_screen() {
        let w = world();
        assert_eq!(w.phase, Phase::Title);
        assert_eq!(w.lives, 3);
        assert_eq!(w.level, 1);
    }

    #[test]
    fn entering_a_level_resets_the_board_but_not_the_score() {
        let mut w = world();
        w.start_game();
        w.score.score = 1234;
        w.pellets_eaten = 70;
        w.advance_level();
        assert_eq!(w.level, 2);
        assert_eq!(w.pellets_eaten, 0);
        assert_eq!(w.maze.pellets_left(), crate::domain::maze::PELLET_TOTAL);
        assert_eq!(w.score.score, 1234);
        assert_eq!(w.phase, Phase::Ready);
    }

    #[test]
    fn death_restart_keeps_the_maze() {
        let mut w = world();
        w.start_game();
        w.maze.consume_pellet_at(Vec2::new(1.5, 1.5));
        let left = w.maze.pellets_left();
        w.restart_after_death();
        assert_eq!(w.maze.pellets_left(), left);
        assert_eq!(w.phase, Phase::Ready);
    }

    #[test]
    fn views_mark_travelling_eyes() {
        let mut w = world();
        w.ghosts.ghosts[0].send_home();
        let views = w.ghost_views();
        assert!(views[0].eyes_only);
        assert!(!views[1].eyes_only);
    }
}
