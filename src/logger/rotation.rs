//! Numbered file rotation: `app.log` -> `app.log.1` -> `app.log.2` ...

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::logger::config::RotationConfig;

/// Decides when the active log file is full and shifts rotated files.
pub struct RotationManager {
    config: RotationConfig,
}

impl RotationManager {
    pub fn new(config: RotationConfig) -> Self {
        Self { config }
    }

    pub fn should_rotate(&self, current_file_size: u64) -> bool {
        current_file_size >= self.config.max_size
    }

    /// Shifts `base.N` to `base.N+1`, drops anything past `max_files`, and
    /// moves the active file to `base.1`.
    pub fn rotate(&self, base_path: &Path) -> io::Result<()> {
        let max_files = self.config.max_files;

        let oldest = rotated_path(base_path, max_files);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }

        for index in (1..max_files).rev() {
            let from = rotated_path(base_path, index);
            if from.exists() {
                fs::rename(&from, rotated_path(base_path, index + 1))?;
            }
        }

        if base_path.exists() {
            fs::rename(base_path, rotated_path(base_path, 1))?;
        }

        Ok(())
    }
}

/// Path of the `index`-th rotated file next to `base_path`.
pub fn rotated_path(base_path: &Path, index: usize) -> PathBuf {
    let mut name = base_path.as_os_str().to_os_string();
    name.push(format!(".{index}"));
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::tempdir;

    fn manager(max_files: usize) -> RotationManager {
        RotationManager::new(RotationConfig {
            max_size: 1024,
            max_files,
        })
    }

    #[test]
    fn test_should_rotate_by_size() {
        let manager = manager(5);
        assert!(!manager.should_rotate(512));
        assert!(!manager.should_rotate(1023));
        assert!(manager.should_rotate(1024));
    }

    #[test]
    fn test_rotated_path() {
        let path = Path::new("logs/app.log");
        assert_eq!(rotated_path(path, 2), PathBuf::from("logs/app.log.2"));
    }

    #[test]
    fn test_rotate_shifts_files() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("app.log");
        let manager = manager(3);

        for generation in 0..5 {
            fs::write(&base, format!("generation {generation}")).unwrap();
            manager.rotate(&base).unwrap();
        }

        assert!(!base.exists());
        assert_eq!(fs::read_to_string(rotated_path(&base, 1)).unwrap(), "generation 4");
        assert_eq!(fs::read_to_string(rotated_path(&base, 2)).unwrap(), "generation 3");
        assert_eq!(fs::read_to_string(rotated_path(&base, 3)).unwrap(), "generation 2");
        assert!(!rotated_path(&base, 4).exists());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_rotation_triggers_at_max_size(
            current_size in 0u64..10_000_000u64,
            max_size in 1u64..10_000_000u64
        ) {
            let manager = RotationManager::new(RotationConfig { max_size, max_files: 5 });
            prop_assert_eq!(manager.should_rotate(current_size), current_size >= max_size);
        }
    }
}
