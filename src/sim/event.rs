/// Events emitted by a simulation tick, in order of occurrence.
/// The UI layer turns these into flashes and score popups; the sim
/// itself never looks at them again.

use crate::domain::ghost::GhostName;
use crate::sim::level::FruitKind;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameEvent {
    PelletEaten,
    PowerPelletEaten,
    FrightStarted { frames: u32 },
    FrightEnded,
    GhostEaten { name: GhostName, points: u32 },
    PacmanCaught,
    FruitSpawned { kind: FruitKind },
    FruitEaten { kind: FruitKind, points: u32 },
    FruitExpired,
    ExtraLife,
    LevelCompleted,
}
