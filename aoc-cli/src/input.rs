//! Local store of puzzle inputs

use crate::error::InputError;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Puzzle inputs read from disk.
///
/// Directory structure: `{input_dir}/{year}/day{day:02}.txt`
#[derive(Debug, Clone)]
pub struct InputStore {
    input_dir: PathBuf,
}

impl InputStore {
    pub fn new(input_dir: PathBuf) -> Self {
        Self { input_dir }
    }

    pub fn input_path(&self, year: u16, day: u8) -> PathBuf {
        self.input_dir
            .join(year.to_string())
            .join(format!("day{day:02}.txt"))
    }

    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.input_path(year, day).is_file()
    }

    /// Read the input for `year`/`day`
    pub fn get(&self, year: u16, day: u8) -> Result<String, InputError> {
        let path = self.input_path(year, day);
        match fs::read_to_string(&path) {
            Ok(input) => Ok(input),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(InputError::Missing { year, day, path }),
            Err(source) => Err(InputError::Read { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_input_path_format() {
        let store = InputStore::new(PathBuf::from("/inputs"));
        assert_eq!(store.input_path(2023, 1), PathBuf::from("/inputs/2023/day01.txt"));
        assert_eq!(store.input_path(2022, 25), PathBuf::from("/inputs/2022/day25.txt"));
    }

    #[test]
    fn test_reads_existing_input() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf());

        assert!(!store.contains(2023, 7));
        fs::create_dir_all(temp.path().join("2023")).unwrap();
        fs::write(store.input_path(2023, 7), "32T3K 765\n").unwrap();

        assert!(store.contains(2023, 7));
        assert_eq!(store.get(2023, 7).unwrap(), "32T3K 765\n");
    }

    #[test]
    fn test_missing_input() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf());
        let err = store.get(2022, 3).unwrap_err();
        assert!(matches!(err, InputError::Missing { year: 2022, day: 3, .. }), "{err}");
    }

    #[test]
    fn test_directory_in_place_of_input_is_a_read_error() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf());
        fs::create_dir_all(store.input_path(2022, 4)).unwrap();
        assert!(matches!(store.get(2022, 4), Err(InputError::Read { .. })));
    }
}
