//! Fluent wrapper around assert_cmd::Command.

// Allow dead code since this is a test utility shared by several suites
#![allow(dead_code)]

use assert_cmd::Command;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Fluent wrapper around `assert_cmd::Command` for the `forgegrid` binary.
///
/// Provides a builder-style API for constructing and executing CLI commands.
pub struct ForgeCommand {
    args: Vec<String>,
    envs: Vec<(String, String)>,
    stdin: Option<String>,
}

impl ForgeCommand {
    /// Creates a new command for the `forgegrid` binary.
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            envs: Vec::new(),
            stdin: None,
        }
    }

    /// Sets the `--dir` option to specify the data directory.
    pub fn dir(mut self, path: &Path) -> Self {
        self.args.push("--dir".to_string());
        self.args.push(path.to_string_lossy().to_string());
        self
    }

    /// Sets the `--user` option.
    pub fn user(mut self, id: i64) -> Self {
        self.args.push("--user".to_string());
        self.args.push(id.to_string());
        self
    }

    /// Sets an environment variable for the child process.
    pub fn env(mut self, key: &str, value: impl AsRef<Path>) -> Self {
        self.envs
            .push((key.to_string(), value.as_ref().to_string_lossy().to_string()));
        self
    }

    /// Feeds `input` to the child's stdin.
    pub fn stdin(mut self, input: &str) -> Self {
        self.stdin = Some(input.to_string());
        self
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Returns the current arguments (for testing).
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Runs the command and returns an Assert for making assertions.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("forgegrid").expect("Failed to find forgegrid binary");
        cmd.env_remove("FORGEGRID_USER").env_remove("RUST_LOG");
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        cmd.args(&self.args);
        if let Some(input) = self.stdin {
            cmd.write_stdin(input);
        }
        cmd.assert()
    }

    /// Runs the command, expects success, and returns stdout as a string.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("Output was not valid UTF-8")
    }

    /// Runs the command, expects success, and parses stdout as JSON.
    pub fn output_json<T: DeserializeOwned>(self) -> T {
        let output = self.output_success();
        serde_json::from_str(&output).expect("Failed to parse output as JSON")
    }

    // ===========================================
    // Command Shortcuts
    // ===========================================

    /// Configures for the `new` command.
    pub fn new_note(self, title: &str, content: &str) -> Self {
        self.args(["new", "--title", title, "--content", content])
    }

    /// Configures for the `ls` command.
    pub fn ls(self) -> Self {
        self.args(["ls"])
    }

    /// Configures for the `search` command with a term.
    pub fn search(self, term: &str) -> Self {
        self.args(["search", term])
    }

    /// Configures for the `show` command with an id.
    pub fn show(self, id: i64) -> Self {
        self.args(["show".to_string(), id.to_string()])
    }

    /// Configures for the `rm` command with an id.
    pub fn rm(self, id: i64) -> Self {
        self.args(["rm".to_string(), id.to_string()])
    }

    /// Configures for the `reindex` command.
    pub fn reindex(self) -> Self {
        self.args(["reindex"])
    }

    // ===========================================
    // Format Options
    // ===========================================

    /// Adds `--format json` to the command.
    pub fn format_json(self) -> Self {
        self.args(["--format", "json"])
    }
}

impl Default for ForgeCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_command_runs_binary() {
        ForgeCommand::new().args(["--help"]).assert().success();
    }

    #[test]
    fn test_command_with_dir_and_user() {
        let temp = TempDir::new().unwrap();
        let cmd = ForgeCommand::new().dir(temp.path()).user(4);
        let args = cmd.get_args();
        assert_eq!(args[0], "--dir");
        assert_eq!(args[1], temp.path().to_string_lossy());
        assert_eq!(args[2..].to_vec(), vec!["--user".to_string(), "4".to_string()]);
    }

    #[test]
    fn test_command_shortcuts() {
        let cmd = ForgeCommand::new().ls().format_json();
        let args = cmd.get_args();
        assert!(args.contains(&"ls".to_string()));
        assert!(args.contains(&"--format".to_string()));
        assert!(args.contains(&"json".to_string()));
    }
}
