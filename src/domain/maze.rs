/// The maze: a fixed 31×28 tile grid plus pellet bookkeeping.
///
/// The grid is initialized from `LAYOUT` at level start and reset
/// identically for every new level. The only runtime mutation is pellet
/// consumption (Pellet/PowerPellet → Empty), so the pellet count only
/// ever decreases.
///
/// Coordinate conventions: x = column, y = row, tile centers at k + 0.5.
/// Out-of-bounds tile queries are contract violations and panic; the
/// movement code uses `cell()`, which treats the warp-tunnel row as open
/// beyond both edges.

use super::tile::Tile;
use super::vector::Vec2;

pub const ROWS: usize = 31;
pub const COLS: usize = 28;

/// Row along which the left/right warp tunnel runs.
pub const TUNNEL_ROW: i32 = 14;
/// How far beyond the visible maze the tunnel extends before teleporting.
pub const WARP_MARGIN: f32 = 2.0;

/// Ghost-house geometry.
pub const HOUSE_CENTER_X: f32 = 14.0;
pub const HOUSE_CENTER_Y: f32 = 14.5;
/// Tile-center y just above the door, where exiting ghosts hand off.
pub const HOUSE_EXIT_Y: f32 = 11.5;
/// Vertical bounds for the in-house idle bob.
pub const HOUSE_BOB_TOP: f32 = 14.0;
pub const HOUSE_BOB_BOTTOM: f32 = 15.0;
/// Target tile for eaten ghosts returning home (just above the door).
pub const EYES_TARGET: (i32, i32) = (13, 11);

/// Tiles where the target-tile algorithm may not choose UP
/// (arcade restriction near the house and the lower corridor).
pub const NO_UP_TILES: [(i32, i32); 4] = [(12, 11), (15, 11), (12, 23), (15, 23)];

/// `#` wall, `.` pellet, `o` power pellet, `=` door, space empty.
const LAYOUT: [&str; ROWS] = [
    "############################",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#o####.#####.##.#####.####o#",
    "#.####.#####.##.#####.####.#",
    "#..........................#",
    "#.####.##.########.##.####.#",
    "#.####.##.########.##.####.#",
    "#......##....##....##......#",
    "######.##### ## #####.######",
    "     #.##### ## #####.#     ",
    "     #.##          ##.#     ",
    "     #.## ###==### ##.#     ",
    "######.## #      # ##.######",
    "      .   #      #   .      ",
    "######.## #      # ##.######",
    "     #.## ######## ##.#     ",
    "     #.##          ##.#     ",
    "     #.## ######## ##.#     ",
    "######.## ######## ##.######",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#.####.#####.##.#####.####.#",
    "#o..##.......  .......##..o#",
    "###.##.##.########.##.##.###",
    "###.##.##.########.##.##.###",
    "#......##....##....##......#",
    "#.##########.##.##########.#",
    "#.##########.##.##########.#",
    "#..........................#",
    "############################",
];

/// Pellets (240) plus power pellets (4) in the standard layout.
pub const PELLET_TOTAL: u32 = 244;

pub struct Maze {
    tiles: [[Tile; COLS]; ROWS],
    pellets_left: u32,
}

impl Maze {
    pub fn new() -> Self {
        let mut tiles = [[Tile::Empty; COLS]; ROWS];
        let mut pellets = 0;
        for (y, row) in LAYOUT.iter().enumerate() {
            debug_assert_eq!(row.len(), COLS, "layout row {y} has wrong width");
            for (x, ch) in row.bytes().enumerate() {
                tiles[y][x] = match ch {
                    b'#' => Tile::Wall,
                    b'.' => Tile::Pellet,
                    b'o' => Tile::PowerPellet,
                    b'=' => Tile::Door,
                    _ => Tile::Empty,
                };
                if tiles[y][x].is_pellet() {
                    pellets += 1;
                }
            }
        }
        Maze { tiles, pellets_left: pellets }
    }

    /// Tile at a continuous position. Panics outside [0,rows)×[0,cols):
    /// out-of-bounds access here is a programmer error, not a runtime
    /// condition.
    pub fn tile_at(&self, pos: Vec2) -> Tile {
        let (col, row) = pos.tile();
        assert!(
            row >= 0 && (row as usize) < ROWS && col >= 0 && (col as usize) < COLS,
            "tile_at out of bounds: ({col}, {row})"
        );
        self.tiles[row as usize][col as usize]
    }

    /// Tile at integer (col, row), tolerant of off-grid coordinates:
    /// everything outside the grid is Wall, except the warp-tunnel row,
    /// which stays open so characters can run out to the teleport margin.
    pub fn cell(&self, col: i32, row: i32) -> Tile {
        if row < 0 || row as usize >= ROWS {
            return Tile::Wall;
        }
        if col < 0 || col as usize >= COLS {
            return if row == TUNNEL_ROW { Tile::Empty } else { Tile::Wall };
        }
        self.tiles[row as usize][col as usize]
    }

    /// Does the cell block movement? Doors block unless the caller is on a
    /// scripted house path.
    pub fn blocked_cell(&self, col: i32, row: i32, pass_door: bool) -> bool {
        let t = self.cell(col, row);
        if t == Tile::Door {
            return !pass_door;
        }
        t.blocks()
    }

    /// Is the tile under `pos` a wall? Doors are not walls; off-grid
    /// positions follow `cell`'s convention.
    pub fn is_wall(&self, pos: Vec2) -> bool {
        let (col, row) = pos.tile();
        self.cell(col, row) == Tile::Wall
    }

    pub fn is_warp_tunnel(&self, pos: Vec2) -> bool {
        pos.y.floor() as i32 == TUNNEL_ROW
    }

    pub fn is_ghost_house_door(&self, pos: Vec2) -> bool {
        self.tile_at(pos) == Tile::Door
    }

    /// Inside the pen (between the door and the back wall).
    pub fn is_ghost_house_interior(&self, pos: Vec2) -> bool {
        let (col, row) = pos.tile();
        (13..=15).contains(&row) && (11..=16).contains(&col)
    }

    /// Consume the pellet under `pos`, if any. Returns what was eaten.
    pub fn consume_pellet_at(&mut self, pos: Vec2) -> Option<Tile> {
        let (col, row) = pos.tile();
        assert!(
            row >= 0 && (row as usize) < ROWS && col >= 0 && (col as usize) < COLS,
            "consume_pellet_at out of bounds: ({col}, {row})"
        );
        let t = self.tiles[row as usize][col as usize];
        if t.is_pellet() {
            self.tiles[row as usize][col as usize] = Tile::Empty;
            self.pellets_left -= 1;
            Some(t)
        } else {
            None
        }
    }

    pub fn pellets_left(&self) -> u32 {
        self.pellets_left
    }

    pub fn completed(&self) -> bool {
        self.pellets_left == 0
    }

    /// For rendering: raw tile rows.
    pub fn rows(&self) -> &[[Tile; COLS]; ROWS] {
        &self.tiles
    }
}
