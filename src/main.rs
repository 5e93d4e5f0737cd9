/// Entry point and game loop.

mod config;
mod domain;
mod sim;
mod ui;

use std::time::{Duration, Instant};

use crossterm::event::KeyCode;

use config::GameConfig;
use sim::step;
use sim::world::{Phase, WorldState};
use ui::input::InputState;
use ui::renderer::Renderer;

const FRAME_SLEEP: Duration = Duration::from_millis(4);

fn main() {
    let config = GameConfig::load();
    let mut world = WorldState::new(&config.sim);

    let mut renderer = Renderer::new();
    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let result = game_loop(&mut world, &mut renderer);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }
    if let Err(e) = result {
        eprintln!("Game error: {e}");
    }

    world.score.persist();
    println!();
    println!("Final score: {}", world.score.score);
}

fn game_loop(world: &mut WorldState, renderer: &mut Renderer) -> std::io::Result<()> {
    let mut input = InputState::new();
    let mut last = Instant::now();

    loop {
        input.drain_events();

        if input.ctrl_c_pressed() || input.any_pressed(&[KeyCode::Esc, KeyCode::Char('q')]) {
            return Ok(());
        }

        match world.phase {
            Phase::Title | Phase::GameOver => {
                if input.any_pressed(&[KeyCode::Enter, KeyCode::Char(' ')]) {
                    world.start_game();
                }
            }
            _ => {}
        }

        let now = Instant::now();
        let dt = now.duration_since(last).as_secs_f32();
        last = now;

        // Clamp huge deltas (suspend, terminal resize pause) so the sim
        // never fast-forwards by seconds at once.
        let dt = dt.min(0.25);
        step::update(world, dt, input.requested_direction());

        renderer.draw(world)?;
        std::thread::sleep(FRAME_SLEEP);
    }
}
