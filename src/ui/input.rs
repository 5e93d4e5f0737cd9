/// Input state tracker.
///
/// Drains pending terminal key events once per frame and remembers the most
/// recent direction request, so a tap between ticks is never lost. Direction
/// keys are level-triggered through a short hold window; menu keys are
/// edge-triggered.

use std::time::{Duration, Instant};

use crossterm::event::{self, poll, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::domain::vector::Vec2;

/// After this long without a Press/Repeat, a held key counts as released.
const HOLD_TIMEOUT: Duration = Duration::from_millis(160);

pub struct InputState {
    /// Latest direction request and when it arrived.
    pending_dir: Option<(Vec2, Instant)>,
    /// Keys freshly pressed during the last drain (edge trigger).
    fresh_presses: Vec<KeyCode>,
    raw_events: Vec<KeyEvent>,
}

impl InputState {
    pub fn new() -> Self {
        InputState {
            pending_dir: None,
            fresh_presses: Vec::with_capacity(8),
            raw_events: Vec::with_capacity(8),
        }
    }

    /// Drain all pending terminal events. Call once per frame, before the
    /// simulation tick.
    pub fn drain_events(&mut self) {
        self.fresh_presses.clear();
        self.raw_events.clear();

        while poll(Duration::ZERO).unwrap_or(false) {
            if let Ok(Event::Key(key)) = event::read() {
                self.raw_events.push(key);
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                self.fresh_presses.push(key.code);
                if let Some(dir) = direction_for(key.code) {
                    self.pending_dir = Some((dir, Instant::now()));
                }
            }
        }

        // Expire stale direction requests so a released key stops steering.
        if let Some((_, t)) = self.pending_dir {
            if t.elapsed() >= HOLD_TIMEOUT {
                self.pending_dir = None;
            }
        }
    }

    /// The direction the player is currently asking for, if any.
    pub fn requested_direction(&self) -> Option<Vec2> {
        self.pending_dir.map(|(d, _)| d)
    }

    /// Was this key freshly pressed this frame? (edge trigger)
    pub fn was_pressed(&self, code: KeyCode) -> bool {
        self.fresh_presses.contains(&code)
    }

    pub fn any_pressed(&self, codes: &[KeyCode]) -> bool {
        codes.iter().any(|c| self.was_pressed(*c))
    }

    pub fn ctrl_c_pressed(&self) -> bool {
        self.raw_events.iter().any(|k| {
            k.modifiers.contains(KeyModifiers::CONTROL)
                && (k.code == KeyCode::Char('c') || k.code == KeyCode::Char('C'))
        })
    }
}

fn direction_for(code: KeyCode) -> Option<Vec2> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Vec2::UP),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Vec2::DOWN),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Vec2::LEFT),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Vec2::RIGHT),
        _ => None,
    }
}
