use std::io::ErrorKind;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::log;

/// On-disk record, a single key-value pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
struct HighScoreRecord {
    #[serde(rename = "snakeHighScore")]
    snake_high_score: u32,
}

/// Best-effort persistence for the high score. A missing or unreadable
/// file reads as zero and write failures are logged and swallowed.
pub struct HighScoreStore {
    file_path: PathBuf,
}

impl HighScoreStore {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    pub fn load(&self) -> u32 {
        let content = match std::fs::read_to_string(&self.file_path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return 0,
            Err(e) => {
                log!(
                    "Failed to read high score file {}: {}",
                    self.file_path.display(),
                    e
                );
                return 0;
            }
        };

        match serde_yaml_ng::from_str::<HighScoreRecord>(&content) {
            Ok(record) => record.snake_high_score,
            Err(e) => {
                log!(
                    "Ignoring malformed high score file {}: {}",
                    self.file_path.display(),
                    e
                );
                0
            }
        }
    }

    pub fn save(&self, high_score: u32) {
        let record = HighScoreRecord {
            snake_high_score: high_score,
        };
        let content = match serde_yaml_ng::to_string(&record) {
            Ok(content) => content,
            Err(e) => {
                log!("Failed to serialize high score: {}", e);
                return;
            }
        };
        if let Err(e) = std::fs::write(&self.file_path, content) {
            log!(
                "Failed to write high score file {}: {}",
                self.file_path.display(),
                e
            );
        }
    }
}
