//! Isolated test environment with temp directory.

use super::ForgeCommand;
use forgegrid::cli::config::Config;
use forgegrid::cli::handlers::{Service, open_service};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with a temporary data directory.
///
/// The binary runs with its config directory pointed inside the temp dir,
/// so a user's real `~/.config/forgegrid/config.toml` is never read.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    data_dir: PathBuf,
    config_home: PathBuf,
}

impl TestEnv {
    /// Creates a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let data_dir = temp_dir.path().join("data");
        let config_home = temp_dir.path().join("config");
        std::fs::create_dir_all(&config_home).expect("Failed to create config dir");
        Self {
            _temp_dir: temp_dir,
            data_dir,
            config_home,
        }
    }

    /// Returns the path to the data directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Writes `forgegrid/config.toml` inside the isolated config home.
    pub fn write_config(&self, contents: &str) {
        let dir = self.config_home.join("forgegrid");
        std::fs::create_dir_all(&dir).expect("Failed to create config dir");
        std::fs::write(dir.join("config.toml"), contents).expect("Failed to write config");
    }

    /// Opens the service on this environment's data directory and runs `f`.
    pub fn with_service<T>(&self, f: impl FnOnce(&Service) -> T) -> T {
        let service =
            open_service(&self.data_dir, &Config::default()).expect("Failed to open service");
        f(&service)
    }

    /// Returns a command preconfigured with this environment's directories.
    pub fn cmd(&self) -> ForgeCommand {
        ForgeCommand::new()
            .env("XDG_CONFIG_HOME", &self.config_home)
            .env("HOME", self._temp_dir.path())
            .dir(&self.data_dir)
    }

    /// Returns a command acting as user `id`.
    pub fn as_user(&self, id: i64) -> ForgeCommand {
        self.cmd().user(id)
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
    fn test_env_creates_temp_directory() {
        let env = TestEnv::new();
        assert!(env.data_dir().parent().unwrap().exists());
    }

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            env.data_dir().to_path_buf()
        };
        assert!(!path.parent().unwrap().exists());
    }

    #[test]
    fn test_env_provides_command() {
        let env = TestEnv::new();
        let cmd = env.as_user(1);
        let args = cmd.get_args();
        assert_eq!(args[0], "--dir");
        assert!(args.contains(&"--user".to_string()));
    }
}
