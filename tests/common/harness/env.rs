//! Isolated test environment with temp directory.

use super::NotesCommand;
use chrono::DateTime;
use std::path::{Path, PathBuf};
use study_notes::domain::Note;
use study_notes::infra::{FileStorage, Storage};
use study_notes::store::{STORAGE_KEY, encode_collection, parse_collection};
use tempfile::TempDir;

/// Isolated test environment with a temporary data directory.
///
/// The temp directory holds both the notes store and a fake home directory,
/// so commands never read the developer's own config. Everything is removed
/// when the TestEnv is dropped.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    temp_dir: TempDir,
    /// Path to the data directory
    data_dir: PathBuf,
}

impl TestEnv {
    /// Creates a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let data_dir = temp_dir.path().join("data");
        Self { temp_dir, data_dir }
    }

    /// Returns the path to the data directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Returns the path of the file holding the stored collection.
    pub fn store_path(&self) -> PathBuf {
        FileStorage::new(&self.data_dir)
            .path_for(STORAGE_KEY)
            .expect("storage key is valid")
    }

    /// Writes `notes` straight into storage, replacing anything there.
    pub fn seed(&self, notes: &[Note]) {
        let mut storage = FileStorage::new(&self.data_dir);
        let encoded = encode_collection(notes).expect("Failed to encode notes");
        storage
            .set(STORAGE_KEY, &encoded)
            .expect("Failed to seed notes");
    }

    /// Builds a note with the given fields for seeding.
    pub fn note(id: &str, title: &str, content: &str, updated_ms: i64) -> Note {
        Note::with_fields(
            id.parse().expect("Invalid NoteId"),
            title,
            content,
            DateTime::from_timestamp_millis(updated_ms).expect("Invalid timestamp"),
        )
    }

    /// Reads back what the CLI persisted.
    pub fn stored_notes(&self) -> Vec<Note> {
        let storage = FileStorage::new(&self.data_dir);
        match storage.get(STORAGE_KEY).expect("Failed to read storage") {
            Some(text) => parse_collection(&text).expect("Stored notes should parse"),
            None => Vec::new(),
        }
    }

    /// Writes a file to the test environment and returns its path.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Creates a NotesCommand configured for this test environment.
    pub fn cmd(&self) -> NotesCommand {
        NotesCommand::new()
            .home(&self.temp_dir.path().join("home"))
            .dir(&self.data_dir)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_starts_without_store() {
        let env = TestEnv::new();
        assert!(!env.store_path().exists());
        assert!(env.stored_notes().is_empty());
    }

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            env.seed(&[]);
            env.data_dir().to_path_buf()
        };
        assert!(!path.exists(), "temp directory should be cleaned up on drop");
    }

    #[test]
    fn test_env_seed_round_trips() {
        let env = TestEnv::new();
        let notes = vec![TestEnv::note("a", "A", "alpha", 1)];
        env.seed(&notes);
        assert!(env.store_path().ends_with("data/studyNotes.json"));
        assert_eq!(env.stored_notes(), notes);
    }

    #[test]
    fn test_env_provides_command() {
        let env = TestEnv::new();
        let cmd = env.cmd();
        let args = cmd.get_args();
        assert_eq!(args[0], "--dir");
        assert_eq!(args[1], env.data_dir().to_string_lossy());
    }
}
