//! # CSV Store
//!
//! Flat file holding every registered user, one row each.
//!
//! ## Layout
//!
//! - Header row is always `name,interests`
//! - Interests are stored normalized: trimmed, lowercased, comma joined
//! - Rows are only ever appended, file order is registration order
//!
//! ## Notes
//! - A file with a broken header is reset to an empty roster on startup rather than
//!   guessed at.
//! - Duplicate detection is case-insensitive and ignores surrounding whitespace.
use std::{
    fs::{File, OpenOptions},
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, info};

use crate::models::{INTERESTS_FIELD, NAME_FIELD, User};

pub const HEADER: &str = "name,interests";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV file {0} missing required headers")]
    MissingHeaders(PathBuf),
}

#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Makes sure the file exists and starts with the expected header.
    pub fn initialize(&self) -> Result<(), StoreError> {
        if !self.path.exists() {
            self.reset()?;
            info!("Created {} with headers", self.path.display());

            return Ok(());
        }

        let first_line = BufReader::new(File::open(&self.path)?)
            .lines()
            .next()
            .transpose()?
            .unwrap_or_default();

        if first_line.trim() != HEADER {
            self.reset()?;
            info!("Reset {} with correct headers", self.path.display());
        }

        Ok(())
    }

    /// Truncates the file down to the header row.
    pub fn reset(&self) -> Result<(), StoreError> {
        let mut writer = csv::Writer::from_path(&self.path)?;
        writer.write_record([NAME_FIELD, INTERESTS_FIELD])?;
        writer.flush()?;

        Ok(())
    }

    pub fn load_users(&self) -> Result<Vec<User>, StoreError> {
        let mut reader = csv::Reader::from_path(&self.path)?;

        let headers = reader.headers()?;
        if !headers.iter().any(|h| h == NAME_FIELD) || !headers.iter().any(|h| h == INTERESTS_FIELD)
        {
            return Err(StoreError::MissingHeaders(self.path.clone()));
        }

        let users = reader
            .deserialize::<User>()
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Loaded {} users from {}", users.len(), self.path.display());

        Ok(users)
    }

    pub fn name_exists(&self, name: &str) -> Result<bool, StoreError> {
        if !self.path.exists() {
            return Ok(false);
        }

        let wanted = name.trim().to_lowercase();

        Ok(self
            .load_users()?
            .iter()
            .any(|user| user.name.trim().to_lowercase() == wanted))
    }

    pub fn append(&self, user: &User) -> Result<(), StoreError> {
        let file = OpenOptions::new().append(true).open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.serialize(user)?;
        writer.flush()?;

        info!("Saved {}: {}", user.name, user.interests);

        Ok(())
    }
}

pub fn normalize_interests(raw: &str) -> String {
    raw.split(',')
        .map(|interest| interest.trim().to_lowercase())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_initialize_creates_header() {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path().join("users.csv"));

        store.initialize().unwrap();

        assert_eq!(fs::read_to_string(store.path()).unwrap().trim(), HEADER);
        assert!(store.load_users().unwrap().is_empty());
    }

    #[test]
    fn test_initialize_resets_bad_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("users.csv");
        fs::write(&path, "user_id,interests\nuser1,python\n").unwrap();

        let store = Store::new(&path);
        store.initialize().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap().trim(), HEADER);
    }

    #[test]
    fn test_initialize_keeps_good_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("users.csv");
        fs::write(&path, "name,interests\nAlice,\"reading,chess\"\n").unwrap();

        let store = Store::new(&path);
        store.initialize().unwrap();

        assert_eq!(
            store.load_users().unwrap(),
            vec![User::new("Alice", "reading,chess")]
        );
    }

    #[test]
    fn test_append_round_trips_commas() {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path().join("users.csv"));
        store.initialize().unwrap();

        store.append(&User::new("Alice", "reading,chess")).unwrap();
        store.append(&User::new("Bob", "chess")).unwrap();

        assert_eq!(
            store.load_users().unwrap(),
            vec![
                User::new("Alice", "reading,chess"),
                User::new("Bob", "chess")
            ]
        );
    }

    #[test]
    fn test_name_exists_ignores_case_and_spaces() {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path().join("users.csv"));

        assert!(!store.name_exists("alice").unwrap());

        store.initialize().unwrap();
        store.append(&User::new("Alice", "chess")).unwrap();

        assert!(store.name_exists("  ALICE ").unwrap());
        assert!(!store.name_exists("Bob").unwrap());
    }

    #[test]
    fn test_missing_headers() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("users.csv");
        fs::write(&path, "user_id,tags\nuser1,python\n").unwrap();

        let result = Store::new(&path).load_users();

        assert!(matches!(result, Err(StoreError::MissingHeaders(_))));
    }

    #[test]
    fn test_normalize_interests() {
        assert_eq!(normalize_interests("Reading,  Chess "), "reading,chess");
        assert_eq!(normalize_interests("AI"), "ai");
        assert_eq!(normalize_interests("a,,b"), "a,,b");
    }
}
