use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use log::{error, info};

const PREFS_FILE: &str = "flappy_prefs.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct Prefs {
    #[serde(default)]
    high_score: u32,
}

/// Best score across runs, kept in a small JSON preferences file.
pub struct HighScoreStore {
    path: Option<PathBuf>,
    best: u32,
}

impl HighScoreStore {
    /// Opens the store in the platform config directory and reads the saved score.
    pub fn open() -> io::Result<Self> {
        let project_dirs = ProjectDirs::from("", "", "vibe-flappy").ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "Could not determine config directory")
        })?;
        let config_dir = project_dirs.config_dir();
        fs::create_dir_all(config_dir)?;
        Ok(Self::at(config_dir.join(PREFS_FILE)))
    }

    pub fn at(path: PathBuf) -> Self {
        let best = match read_prefs(&path) {
            Ok(prefs) => prefs.high_score,
            Err(e) if e.kind() == io::ErrorKind::NotFound => 0,
            Err(e) => {
                error!("Failed to read high score from {}: {}", path.display(), e);
                0
            }
        };
        info!("High score store at {} (best: {})", path.display(), best);
        HighScoreStore { path: Some(path), best }
    }

    /// A store that never touches the disk.
    pub fn in_memory() -> Self {
        HighScoreStore { path: None, best: 0 }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Records `score` if it beats the best. Returns whether it did.
    pub fn submit(&mut self, score: u32) -> io::Result<bool> {
        if score <= self.best {
            return Ok(false);
        }
        self.best = score;
        info!("New high score: {}", score);
        if let Some(path) = &self.path {
            let data = serde_json::to_string_pretty(&Prefs { high_score: score })?;
            fs::write(path, data)?;
        }
        Ok(true)
    }
}

fn read_prefs(path: &Path) -> io::Result<Prefs> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}
