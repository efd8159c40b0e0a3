//! Question source
//!
//! Loads the question pool once at startup and hands out uniformly random
//! picks for the lifetime of the process.

use crate::config::ConfigError;
use rand::seq::SliceRandom;
use std::path::Path;

/// Immutable pool of candidate questions, one per non-blank file line.
#[derive(Debug, Clone)]
pub struct QuestionSet {
    entries: Vec<String>,
}

impl QuestionSet {
    /// Load questions from `path`, one per line. Lines are trimmed, blank
    /// lines are dropped, and file order is preserved. An unreadable file
    /// or a file with no usable lines is a startup error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::QuestionsUnreadable {
            path: path.to_path_buf(),
            source,
        })?;

        let entries: Vec<String> = raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();

        if entries.is_empty() {
            return Err(ConfigError::QuestionsEmpty {
                path: path.to_path_buf(),
            });
        }

        Ok(Self { entries })
    }

    /// Number of loaded questions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One uniformly random question from the set.
    pub fn pick(&self) -> &str {
        self.entries
            .choose(&mut rand::thread_rng())
            .expect("load() rejects empty question sets")
    }
}
