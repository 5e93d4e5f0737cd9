/// Scoring and the persisted high score.
///
/// The high score is four big-endian bytes in `highscore.dat`, looked up
/// with the same directory strategy as the config file: the executable's
/// directory when writable, else the XDG data home, else the CWD. A
/// missing or malformed file silently reads as zero; losing a high score
/// is never worth failing a launch over.

use std::path::PathBuf;

use crate::sim::level::FruitKind;

const HIGH_SCORE_FILE: &str = "highscore.dat";

#[derive(Clone, Copy, Debug)]
pub enum ScoreAction {
    Pellet,
    PowerPellet,
    /// `chain` counts ghosts already eaten in the current fright window.
    Ghost { chain: u32 },
    Fruit(FruitKind),
}

pub fn points_for(action: ScoreAction) -> u32 {
    match action {
        ScoreAction::Pellet => 10,
        ScoreAction::PowerPellet => 50,
        ScoreAction::Ghost { chain } => 200 << chain.min(3),
        ScoreAction::Fruit(kind) => kind.points(),
    }
}

#[derive(Clone, Debug)]
pub struct Score {
    pub score: u32,
    pub high_score: u32,
}

impl Score {
    pub fn new() -> Self {
        Score {
            score: 0,
            high_score: load_high_score(),
        }
    }

    /// Apply an action; returns the points it was worth.
    pub fn add(&mut self, action: ScoreAction) -> u32 {
        let points = points_for(action);
        self.score += points;
        if self.score > self.high_score {
            self.high_score = self.score;
        }
        points
    }

    pub fn reset_for_new_game(&mut self) {
        self.score = 0;
    }

    pub fn persist(&self) {
        save_high_score(self.high_score);
    }
}

impl Default for Score {
    fn default() -> Self {
        Score::new()
    }
}

// ── Persistence ──

fn encode_high_score(v: u32) -> [u8; 4] {
    v.to_be_bytes()
}

fn decode_high_score(bytes: &[u8]) -> Option<u32> {
    let arr: [u8; 4] = bytes.try_into().ok()?;
    Some(u32::from_be_bytes(arr))
}

fn data_dir() -> PathBuf {
    // 1. Exe directory when writable (portable installs)
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            let probe = parent.join(".write_test_pacterm");
            if std::fs::write(&probe, "").is_ok() {
                let _ = std::fs::remove_file(&probe);
                return parent.to_path_buf();
            }
        }
    }
    // 2. XDG data home for system installs
    if let Ok(home) = std::env::var("HOME") {
        let xdg = PathBuf::from(&home).join(".local/share/pacterm");
        if std::fs::create_dir_all(&xdg).is_ok() {
            return xdg;
        }
    }
    // 3. CWD
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

pub fn load_high_score() -> u32 {
    let path = data_dir().join(HIGH_SCORE_FILE);
    match std::fs::read(&path) {
        Ok(bytes) => decode_high_score(&bytes).unwrap_or(0),
        Err(_) => 0,
    }
}

pub fn save_high_score(v: u32) {
    let path = data_dir().join(HIGH_SCORE_FILE);
    if let Err(e) = std::fs::write(&path, encode_high_score(v)) {
        eprintln!("Could not save high score: {e}");
    }
}
