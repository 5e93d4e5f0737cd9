pub mod ghost;
pub mod maze;
pub mod movement;
pub mod pacman;
pub mod rng;
pub mod tile;
pub mod vector;
