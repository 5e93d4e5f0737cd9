/// Presentation layer: batched full-frame terminal renderer.
///
/// Every frame is queued into a BufWriter row by row and flushed once, so
/// the terminal sees a single write per frame. The maze is static enough
/// that full redraws at 60 Hz stay well under a millisecond of output.

use std::io::{self, BufWriter, Stdout, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::ghost::GhostName;
use crate::domain::maze::{COLS, ROWS};
use crate::domain::tile::Tile;
use crate::domain::vector::Vec2;
use crate::sim::world::{GhostView, Phase, WorldState};

/// Rows above the maze used for the score line.
const HUD_ROWS: u16 = 2;

pub struct Renderer {
    writer: BufWriter<Stdout>,
    /// Frame counter for blink effects (power pellets, fright flash).
    frame: u64,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(64 * 1024, io::stdout()),
            frame: 0,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            Clear(ClearType::All)
        )
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    pub fn draw(&mut self, world: &WorldState) -> io::Result<()> {
        self.frame += 1;
        self.draw_hud(world)?;
        self.draw_maze(world)?;
        self.draw_fruit(world)?;
        self.draw_actors(world)?;
        self.draw_banner(world)?;
        self.writer.flush()
    }

    fn draw_hud(&mut self, world: &WorldState) -> io::Result<()> {
        let lives = vec!["C"; world.lives as usize].join(" ");
        queue!(
            self.writer,
            MoveTo(0, 0),
            Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::White),
            Print(format!(
                "SCORE {:>7}   HIGH {:>7}   LEVEL {:>2}   ",
                world.score.score, world.score.high_score, world.level
            )),
            SetForegroundColor(Color::Yellow),
            Print(lives)
        )
    }

    fn draw_maze(&mut self, world: &WorldState) -> io::Result<()> {
        let rows = world.maze.rows();
        for (y, row) in rows.iter().enumerate() {
            queue!(self.writer, MoveTo(0, y as u16 + HUD_ROWS))?;
            for tile in row.iter().take(COLS) {
                let (ch, color) = match tile {
                    Tile::Wall => ('#', Color::Blue),
                    Tile::Door => ('-', Color::Magenta),
                    Tile::Pellet => ('.', Color::Rgb { r: 255, g: 200, b: 160 }),
                    // Power pellets blink at ~4 Hz.
                    Tile::PowerPellet => {
                        if self.frame / 8 % 2 == 0 {
                            ('o', Color::Rgb { r: 255, g: 200, b: 160 })
                        } else {
                            (' ', Color::Reset)
                        }
                    }
                    Tile::Empty => (' ', Color::Reset),
                };
                queue!(self.writer, SetForegroundColor(color), Print(ch))?;
            }
        }
        Ok(())
    }

    fn draw_fruit(&mut self, world: &WorldState) -> io::Result<()> {
        if let Some(fruit) = world.fruit {
            self.put(
                fruit.pos,
                fruit.kind.glyph(),
                Color::Rgb { r: 255, g: 80, b: 80 },
            )?;
        }
        Ok(())
    }

    fn draw_actors(&mut self, world: &WorldState) -> io::Result<()> {
        for view in world.ghost_views() {
            let (ch, color) = ghost_glyph(&view);
            self.put(view.pos, ch, color)?;
        }

        if world.phase != Phase::GameOver {
            let ch = pacman_glyph(world.pacman.dir, self.frame);
            self.put(world.pacman.pos, ch, Color::Yellow)?;
        }
        Ok(())
    }

    fn draw_banner(&mut self, world: &WorldState) -> io::Result<()> {
        let banner = match world.phase {
            Phase::Title => Some("  PACTERM - PRESS ENTER  "),
            Phase::Ready => Some("        READY!        "),
            Phase::GameOver => Some("      GAME  OVER      "),
            _ => None,
        };
        let y = HUD_ROWS + 17; // centered-ish, below the ghost house
        if let Some(text) = banner {
            let x = (COLS.saturating_sub(text.len()) / 2) as u16;
            queue!(
                self.writer,
                MoveTo(x, y),
                SetForegroundColor(Color::Yellow),
                Print(text)
            )?;
        }
        Ok(())
    }

    /// Place one character at a world position.
    fn put(&mut self, pos: Vec2, ch: char, color: Color) -> io::Result<()> {
        let (col, row) = pos.tile();
        if col < 0 || col >= COLS as i32 || row < 0 || row >= ROWS as i32 {
            return Ok(()); // off-screen in the warp margin
        }
        queue!(
            self.writer,
            MoveTo(col as u16, row as u16 + HUD_ROWS),
            SetForegroundColor(color),
            Print(ch)
        )
    }
}

fn ghost_glyph(view: &GhostView) -> (char, Color) {
    if view.eyes_only {
        return ('"', Color::White);
    }
    if view.frightened {
        let color = if view.flashing { Color::White } else { Color::Blue };
        return ('M', color);
    }
    let color = match view.name {
        GhostName::Blinky => Color::Red,
        GhostName::Pinky => Color::Rgb { r: 255, g: 150, b: 200 },
        GhostName::Inky => Color::Cyan,
        GhostName::Clyde => Color::Rgb { r: 255, g: 160, b: 60 },
    };
    ('M', color)
}

/// Chomping mouth: alternate between open (direction-specific) and closed.
fn pacman_glyph(dir: Vec2, frame: u64) -> char {
    if frame / 4 % 2 == 0 {
        return 'O';
    }
    if dir == Vec2::LEFT {
        '>'
    } else if dir == Vec2::RIGHT {
        '<'
    } else if dir == Vec2::UP {
        'v'
    } else if dir == Vec2::DOWN {
        '^'
    } else {
        'O'
    }
}
