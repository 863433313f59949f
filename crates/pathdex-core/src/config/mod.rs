//! Configuration management for pathdex.
//!
//! User preferences ([`settings::Config`]) and key bindings ([`keymap::Keymap`])
//! are stored as TOML files and loaded at startup.

use std::path::{Path, PathBuf};

pub mod keymap;
pub mod settings;
pub mod theme;

/// File name of the project-local config under `./config/`.
pub const LOCAL_CONFIG_FILE: &str = "pathdex.toml";
/// File name of the key binding file, looked up next to the config file.
pub const KEYMAP_FILE: &str = "keymap.toml";

/// Config file candidates in lookup order: `./config/pathdex.toml`, then
/// `$HOME/.config/pathdex/config.toml`.
pub fn config_candidates(cwd: &Path, home: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = vec![cwd.join("config").join(LOCAL_CONFIG_FILE)];
    if let Some(home) = home {
        candidates.push(home.join(".config").join("pathdex").join("config.toml"));
    }
    candidates
}

/// The first existing candidate, if any.
pub fn find_config(cwd: &Path, home: Option<&Path>) -> Option<PathBuf> {
    config_candidates(cwd, home)
        .into_iter()
        .find(|p| p.is_file())
}

/// Key binding file that belongs to `config_path`.
pub fn keymap_path_for(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .map(|dir| dir.join(KEYMAP_FILE))
        .unwrap_or_else(|| PathBuf::from(KEYMAP_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn local_config_wins_over_home() {
        let cwd = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();
        fs::create_dir_all(cwd.path().join("config")).unwrap();
        fs::write(cwd.path().join("config/pathdex.toml"), "").unwrap();
        fs::create_dir_all(home.path().join(".config/pathdex")).unwrap();
        fs::write(home.path().join(".config/pathdex/config.toml"), "").unwrap();

        let found = find_config(cwd.path(), Some(home.path())).unwrap();
        assert_eq!(found, cwd.path().join("config/pathdex.toml"));
    }

    #[test]
    fn home_config_used_when_no_local() {
        let cwd = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();
        fs::create_dir_all(home.path().join(".config/pathdex")).unwrap();
        fs::write(home.path().join(".config/pathdex/config.toml"), "").unwrap();

        let found = find_config(cwd.path(), Some(home.path())).unwrap();
        assert_eq!(found, home.path().join(".config/pathdex/config.toml"));
    }

    #[test]
    fn no_config_found() {
        let cwd = TempDir::new().unwrap();
        assert!(find_config(cwd.path(), None).is_none());
    }

    #[test]
    fn keymap_sits_next_to_config() {
        let path = Path::new("/etc/pathdex/config.toml");
        assert_eq!(keymap_path_for(path), PathBuf::from("/etc/pathdex/keymap.toml"));
    }
}
