//! JSON persistence helpers for ~/.canton-run/ data files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Directory name under the user's home.
pub const DATA_DIR_NAME: &str = ".canton-run";

/// Get the ~/.canton-run/ directory path, creating it if needed.
pub fn data_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = data_dir_under(&home_dir);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

fn data_dir_under(home: &Path) -> PathBuf {
    home.join(DATA_DIR_NAME)
}

/// Get the full path for a data file in ~/.canton-run/.
pub fn save_path(filename: &str) -> io::Result<PathBuf> {
    Ok(data_dir()?.join(filename))
}

/// Load a JSON file from ~/.canton-run/, returning `T::default()` if missing or invalid.
pub fn load_json_or_default<T: Default + serde::de::DeserializeOwned>(filename: &str) -> T {
    match save_path(filename) {
        Ok(path) => read_json_or_default(&path),
        Err(_) => T::default(),
    }
}

/// Read a JSON file at `path`, returning `T::default()` if missing or invalid.
pub fn read_json_or_default<T: Default + serde::de::DeserializeOwned>(path: &Path) -> T {
    match fs::read_to_string(path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
            log::warn!("ignoring invalid {}: {}", path.display(), e);
            T::default()
        }),
        Err(_) => T::default(),
    }
}

/// Save a value as pretty-printed JSON to ~/.canton-run/.
pub fn save_json<T: serde::Serialize>(filename: &str, data: &T) -> io::Result<()> {
    write_json(&save_path(filename)?, data)
}

/// Write a value as pretty-printed JSON to `path`.
pub fn write_json<T: serde::Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::config::{RunnerConfig, RunnerPreset};

    #[test]
    fn test_data_dir_layout() {
        let path = data_dir_under(Path::new("/home/ada")).join("test.json");
        assert_eq!(path, Path::new("/home/ada/.canton-run/test.json"));
    }

    #[test]
    fn test_read_missing_returns_default() {
        let dir = tempfile::TempDir::new().unwrap();
        let val: Vec<String> = read_json_or_default(&dir.path().join("nope.json"));
        assert!(val.is_empty());
    }

    #[test]
    fn test_read_invalid_returns_default() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "][").unwrap();

        let config: RunnerConfig = read_json_or_default(&path);
        assert_eq!(config, RunnerConfig::default());
    }

    #[test]
    fn test_write_and_read_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let config = RunnerPreset::Halloween.config();

        write_json(&path, &config).expect("write should succeed");

        let loaded: RunnerConfig = read_json_or_default(&path);
        assert_eq!(loaded, config);
    }
}
