/// Tile types and their properties.
/// Properties are queried via methods, not stored as flags,
/// so tile semantics are centralized here.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tile {
    Wall,
    Empty,
    Pellet,
    PowerPellet,
    /// Ghost-house door: solid for everyone except ghosts on a scripted
    /// house entry/exit path.
    Door,
}

impl Tile {
    /// Does this tile block normal movement?
    pub fn blocks(self) -> bool {
        matches!(self, Tile::Wall | Tile::Door)
    }

    /// Is there something edible here?
    pub fn is_pellet(self) -> bool {
        matches!(self, Tile::Pellet | Tile::PowerPellet)
    }
}

impl Default for Tile {
    fn default() -> Self {
        Tile::Empty
    }
}
