pub mod coordinator;
pub mod event;
pub mod level;
pub mod score;
pub mod step;
pub mod world;
