use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::Difficulty;

/// One recorded best: completion time and the day it was set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestEntry {
    pub secs: u64,
    pub date: String,
}

/// Best completion times per preset difficulty, persisted as TOML in the
/// platform config directory.
///
/// The engine never touches this store; the host records a time after
/// observing a won game. A missing, unreadable, or malformed file is treated
/// as an empty record set, and save failures are logged and swallowed, so
/// score I/O can never take the session down.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BestTimes {
    pub beginner: Option<BestEntry>,
    pub intermediate: Option<BestEntry>,
    pub expert: Option<BestEntry>,
}

impl BestTimes {
    /// Default on-disk location.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "sapper", "sapper")
            .map(|dirs| dirs.config_dir().join("best_times.toml"))
    }

    pub fn load() -> Self {
        Self::default_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => toml::from_str(&text).unwrap_or_else(|err| {
                log::warn!("ignoring malformed score file {}: {err}", path.display());
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) {
        if let Some(path) = Self::default_path() {
            self.save_to(&path);
        }
    }

    pub fn save_to(&self, path: &Path) {
        match toml::to_string(self) {
            Ok(text) => {
                if let Some(parent) = path.parent() {
                    let _ = fs::create_dir_all(parent);
                }
                if let Err(err) = fs::write(path, text) {
                    log::warn!("could not save score file {}: {err}", path.display());
                }
            }
            Err(err) => log::warn!("could not encode score file: {err}"),
        }
    }

    /// Keep `secs` if it beats the stored best for this difficulty. Custom
    /// games are never recorded. Returns whether a new best was stored.
    pub fn record(&mut self, difficulty: Difficulty, secs: u64) -> bool {
        let Some(slot) = self.slot_mut(difficulty) else {
            return false;
        };
        if slot.as_ref().is_none_or(|best| secs < best.secs) {
            *slot = Some(BestEntry {
                secs,
                date: Local::now().format("%Y-%m-%d").to_string(),
            });
            true
        } else {
            false
        }
    }

    pub fn best(&self, difficulty: Difficulty) -> Option<u64> {
        self.best_entry(difficulty).map(|entry| entry.secs)
    }

    pub fn best_entry(&self, difficulty: Difficulty) -> Option<&BestEntry> {
        match difficulty {
            Difficulty::Beginner => self.beginner.as_ref(),
            Difficulty::Intermediate => self.intermediate.as_ref(),
            Difficulty::Expert => self.expert.as_ref(),
            Difficulty::Custom { .. } => None,
        }
    }

    fn slot_mut(&mut self, difficulty: Difficulty) -> Option<&mut Option<BestEntry>> {
        match difficulty {
            Difficulty::Beginner => Some(&mut self.beginner),
            Difficulty::Intermediate => Some(&mut self.intermediate),
            Difficulty::Expert => Some(&mut self.expert),
            Difficulty::Custom { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("sapper-core-{}-{name}.toml", std::process::id()))
    }

    #[test]
    fn record_keeps_the_minimum() {
        let mut times = BestTimes::default();

        assert!(times.record(Difficulty::Beginner, 100));
        assert!(!times.record(Difficulty::Beginner, 120));
        assert!(times.record(Difficulty::Beginner, 80));

        assert_eq!(times.best(Difficulty::Beginner), Some(80));
        assert_eq!(times.best(Difficulty::Expert), None);
    }

    #[test]
    fn custom_games_are_never_recorded() {
        let mut times = BestTimes::default();
        let custom = Difficulty::Custom {
            width: 10,
            height: 10,
            mines: 12,
        };

        assert!(!times.record(custom, 5));
        assert_eq!(times.best(custom), None);
        assert_eq!(times, BestTimes::default());
    }

    #[test]
    fn missing_file_degrades_to_empty_records() {
        let times = BestTimes::load_from(Path::new("/nonexistent/sapper/best_times.toml"));
        assert_eq!(times, BestTimes::default());
    }

    #[test]
    fn malformed_file_degrades_to_empty_records() {
        let path = temp_path("malformed");
        fs::write(&path, "this is not a score file {{{").unwrap();

        let times = BestTimes::load_from(&path);

        assert_eq!(times, BestTimes::default());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn records_survive_a_save_and_load_cycle() {
        let path = temp_path("roundtrip");
        let mut times = BestTimes::default();
        times.record(Difficulty::Intermediate, 73);
        times.record(Difficulty::Expert, 311);

        times.save_to(&path);
        let reloaded = BestTimes::load_from(&path);

        assert_eq!(reloaded, times);
        assert_eq!(reloaded.best(Difficulty::Intermediate), Some(73));
        assert!(reloaded.best_entry(Difficulty::Expert).unwrap().date.len() == 10);
        let _ = fs::remove_file(&path);
    }
}
