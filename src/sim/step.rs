/// The fixed-rate tick pipeline.
///
/// `update` accepts arbitrary wall-clock deltas and subdivides them into
/// whole 60 Hz ticks. Deltas are converted to frames up front and carried
/// in a wide accumulator, so a given elapsed time runs the same number of
/// ticks however the caller slices it, and one large delta leaves the
/// world in the same state as the equivalent run of small ones.

use crate::domain::tile::Tile;
use crate::domain::vector::Vec2;
use crate::sim::coordinator::Contact;
use crate::sim::event::GameEvent;
use crate::sim::level::{
    EXTRA_LIFE_SCORE, FRUIT_FRAMES, FRUIT_TRIGGERS, FULL_SPEED, TICKS_PER_SECOND, TICK_SECONDS,
};
use crate::sim::score::ScoreAction;
use crate::sim::world::{Fruit, Phase, WorldState, DYING_FRAMES, FRUIT_POS, LEVEL_COMPLETE_FRAMES};

/// Movement forfeited per pellet, in frames.
const PELLET_PENALTY_FRAMES: f32 = 1.0;
const POWER_PELLET_PENALTY_FRAMES: f32 = 3.0;

pub fn update(world: &mut WorldState, dt: f32, input: Option<Vec2>) -> Vec<GameEvent> {
    if let Some(dir) = input {
        world.pacman.request_direction(dir);
    }
    let mut events = vec![];
    world.frame_accum += dt as f64 * TICKS_PER_SECOND as f64;
    while world.frame_accum >= 1.0 {
        world.frame_accum -= 1.0;
        step_once(world, &mut events);
        world.tick += 1;
    }
    events
}

fn step_once(world: &mut WorldState, events: &mut Vec<GameEvent>) {
    match world.phase {
        Phase::Title | Phase::GameOver => {}
        Phase::Ready => {
            world.phase_frames = world.phase_frames.saturating_sub(1);
            if world.phase_frames == 0 {
                world.phase = Phase::Playing;
            }
        }
        Phase::Dying => {
            world.phase_frames = world.phase_frames.saturating_sub(1);
            if world.phase_frames == 0 {
                if world.lives == 0 {
                    world.score.persist();
                    world.phase = Phase::GameOver;
                } else {
                    world.restart_after_death();
                }
            }
        }
        Phase::LevelComplete => {
            world.phase_frames = world.phase_frames.saturating_sub(1);
            if world.phase_frames == 0 {
                world.advance_level();
            }
        }
        Phase::Playing => play_tick(world, events),
    }
}

fn play_tick(world: &mut WorldState, events: &mut Vec<GameEvent>) {
    // Pac-Man moves first; everything else reacts to where he ends up.
    let fright = world.ghosts.fright_active();
    let fraction = if fright {
        world.spec.pac_fright_speed
    } else {
        world.spec.pac_speed
    };
    let speed = fraction * FULL_SPEED * world.speed_scale;
    world
        .pacman
        .step(&world.maze, speed, TICK_SECONDS);

    let eaten = world.maze.consume_pellet_at(world.pacman.pos);
    match eaten {
        Some(Tile::Pellet) => {
            world.score.add(ScoreAction::Pellet);
            world.pacman.add_penalty(PELLET_PENALTY_FRAMES * TICK_SECONDS);
            world.pellets_eaten += 1;
            world.ghosts.on_pellet();
            events.push(GameEvent::PelletEaten);
        }
        Some(Tile::PowerPellet) => {
            world.score.add(ScoreAction::PowerPellet);
            world
                .pacman
                .add_penalty(POWER_PELLET_PENALTY_FRAMES * TICK_SECONDS);
            world.pellets_eaten += 1;
            world.ghosts.on_pellet();
            world.ghosts.start_fright(&world.spec, events);
            events.push(GameEvent::PowerPelletEaten);
        }
        _ => {}
    }

    step_fruit(world, eaten.is_some(), events);

    let pac_tile = world.pacman.tile();
    let pac_dir = world.pacman.dir;
    world.ghosts.step(
        &world.maze,
        &world.spec,
        world.level,
        pac_tile,
        pac_dir,
        world.speed_scale,
        events,
    );

    for contact in world.ghosts.contacts(world.pacman.tile()) {
        match contact {
            Contact::Eaten { name, chain } => {
                let points = world.score.add(ScoreAction::Ghost { chain });
                events.push(GameEvent::GhostEaten { name, points });
            }
            Contact::Caught => {
                world.lives = world.lives.saturating_sub(1);
                world.pacman.state = crate::domain::pacman::PacState::Dead;
                world.phase = Phase::Dying;
                world.phase_frames = DYING_FRAMES;
                events.push(GameEvent::PacmanCaught);
                return;
            }
        }
    }

    if !world.extra_life_awarded && world.score.score >= EXTRA_LIFE_SCORE {
        world.extra_life_awarded = true;
        world.lives += 1;
        events.push(GameEvent::ExtraLife);
    }

    if world.maze.completed() {
        world.phase = Phase::LevelComplete;
        world.phase_frames = LEVEL_COMPLETE_FRAMES;
        events.push(GameEvent::LevelCompleted);
    }
}

fn step_fruit(world: &mut WorldState, pellet_eaten: bool, events: &mut Vec<GameEvent>) {
    // The trigger fires on the exact pellet count, once: the count moves
    // past the threshold with the next pellet.
    if pellet_eaten && world.fruit.is_none() && FRUIT_TRIGGERS.contains(&world.pellets_eaten) {
        let kind = world.spec.fruit;
        world.fruit = Some(Fruit {
            kind,
            pos: FRUIT_POS,
            frames_left: FRUIT_FRAMES,
        });
        events.push(GameEvent::FruitSpawned { kind });
    }

    if let Some(fruit) = world.fruit {
        let delta = world.pacman.pos - fruit.pos;
        if delta.x * delta.x + delta.y * delta.y < 1.0 {
            let points = world.score.add(ScoreAction::Fruit(fruit.kind));
            events.push(GameEvent::FruitEaten { kind: fruit.kind, points });
            world.fruit = None;
        } else if fruit.frames_left <= 1 {
            events.push(GameEvent::FruitExpired);
            world.fruit = None;
        } else {
            world.fruit = Some(Fruit {
                frames_left: fruit.frames_left - 1,
                ..fruit
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::sim::world::READY_FRAMES;

    fn playing_world() -> WorldState {
        let mut w = WorldState::new(&SimConfig::default());
        w.start_game();
        w.phase = Phase::Playing;
        w
    }

    #[test]
    fn one_large_delta_matches_many_small_ones() {
        // Five seconds of play, sliced as half-second updates on one world
        // and single-frame updates on the other, must land on the same
        // tick count and the same state.
        let mut a = playing_world();
        let mut b = playing_world();
        for _ in 0..10 {
            update(&mut a, 0.5, Some(Vec2::LEFT));
            for _ in 0..30 {
                update(&mut b, TICK_SECONDS, Some(Vec2::LEFT));
            }
        }
        assert_eq!(a.tick, 300);
        assert_eq!(a.tick, b.tick);
        assert_eq!(a.pacman.pos, b.pacman.pos);
        assert_eq!(a.score.score, b.score.score);
        assert_eq!(a.maze.pellets_left(), b.maze.pellets_left());
    }

    #[test]
    fn large_delta_runs_a_whole_ticks_worth() {
        let mut w = playing_world();
        update(&mut w, 0.5, None);
        assert_eq!(w.tick, 30);
    }

    #[test]
    fn sub_tick_deltas_accumulate() {
        let mut w = playing_world();
        update(&mut w, TICK_SECONDS * 0.6, None);
        assert_eq!(w.tick, 0);
        update(&mut w, TICK_SECONDS * 0.6, None);
        assert_eq!(w.tick, 1);
    }

    #[test]
    fn ready_phase_counts_down_to_playing() {
        let mut w = WorldState::new(&SimConfig::default());
        w.start_game();
        assert_eq!(w.phase, Phase::Ready);
        update(&mut w, (READY_FRAMES + 2) as f32 * TICK_SECONDS, None);
        assert_eq!(w.phase, Phase::Playing);
    }

    #[test]
    fn eating_pellets_scores_and_feeds_the_counters() {
        let mut w = playing_world();
        // Head left along the spawn row; it is lined with pellets.
        let mut total_events = 0;
        for _ in 0..120 {
            let events = update(&mut w, TICK_SECONDS, Some(Vec2::LEFT));
            total_events += events
                .iter()
                .filter(|e| matches!(e, GameEvent::PelletEaten))
                .count();
        }
        assert!(total_events > 0, "moving along row 23 must eat pellets");
        assert_eq!(w.score.score, 10 * w.pellets_eaten);
        assert_eq!(
            w.maze.pellets_left(),
            crate::domain::maze::PELLET_TOTAL - w.pellets_eaten
        );
    }

    #[test]
    fn power_pellet_opens_a_fright_window() {
        let mut w = playing_world();
        w.pacman.pos = Vec2::new(2.5, 23.5);
        let mut saw_fright = false;
        for _ in 0..60 {
            let events = update(&mut w, TICK_SECONDS, Some(Vec2::LEFT));
            if events
                .iter()
                .any(|e| matches!(e, GameEvent::FrightStarted { .. }))
            {
                saw_fright = true;
                break;
            }
        }
        assert!(saw_fright, "the power pellet at (1,23) must trigger fright");
        assert!(w.ghosts.fright_active());
    }

    #[test]
    fn caught_pacman_loses_a_life_and_enters_dying() {
        let mut w = playing_world();
        let lives = w.lives;
        w.ghosts.ghosts[0].pos = w.pacman.pos;
        update(&mut w, TICK_SECONDS, None);
        assert_eq!(w.lives, lives - 1);
        assert_eq!(w.phase, Phase::Dying);
        // The dying pause then hands back to Ready with the maze intact.
        let pellets = w.maze.pellets_left();
        update(&mut w, (DYING_FRAMES + 2) as f32 * TICK_SECONDS, None);
        assert_eq!(w.phase, Phase::Ready);
        assert_eq!(w.maze.pellets_left(), pellets);
    }

    #[test]
    fn last_life_ends_the_game() {
        let mut w = playing_world();
        w.lives = 1;
        w.ghosts.ghosts[0].pos = w.pacman.pos;
        update(&mut w, TICK_SECONDS, None);
        assert_eq!(w.phase, Phase::Dying);
        update(&mut w, (DYING_FRAMES + 2) as f32 * TICK_SECONDS, None);
        assert_eq!(w.phase, Phase::GameOver);
    }

    #[test]
    fn fruit_spawns_on_the_seventieth_pellet() {
        let mut w = playing_world();
        // Fake the first 69 pellets, then eat one for real.
        w.pellets_eaten = 69;
        let mut saw_spawn = false;
        for _ in 0..120 {
            let events = update(&mut w, TICK_SECONDS, Some(Vec2::LEFT));
            if events
                .iter()
                .any(|e| matches!(e, GameEvent::FruitSpawned { .. }))
            {
                saw_spawn = true;
                break;
            }
        }
        assert!(saw_spawn);
        assert!(w.fruit.is_some());
    }

    #[test]
    fn fruit_expires_when_ignored() {
        let mut w = playing_world();
        w.fruit = Some(Fruit {
            kind: w.spec.fruit,
            pos: FRUIT_POS,
            frames_left: 3,
        });
        let mut expired = false;
        for _ in 0..5 {
            let events = update(&mut w, TICK_SECONDS, None);
            if events.iter().any(|e| matches!(e, GameEvent::FruitExpired)) {
                expired = true;
            }
        }
        assert!(expired);
        assert!(w.fruit.is_none());
    }

    #[test]
    fn extra_life_is_granted_once() {
        let mut w = playing_world();
        let lives = w.lives;
        w.score.score = EXTRA_LIFE_SCORE - 5;
        // Eat a pellet to push past the threshold.
        let mut ticks = 0;
        while w.score.score < EXTRA_LIFE_SCORE && ticks < 300 {
            update(&mut w, TICK_SECONDS, Some(Vec2::LEFT));
            ticks += 1;
        }
        assert_eq!(w.lives, lives + 1);
        assert!(w.extra_life_awarded);
        // Further scoring never grants another.
        w.score.score += 50_000;
        update(&mut w, TICK_SECONDS, None);
        assert_eq!(w.lives, lives + 1);
    }
}
