use std::path::{Path, PathBuf};

/// Runtime configuration for the behaviors CLI.
#[derive(Debug, Clone)]
pub struct Config {
    /// Current working directory; relative paths resolve against it.
    pub cwd: PathBuf,

    /// Whether to emit JSON results and logs.
    pub json: bool,

    /// Verbosity level (0 = INFO, 1 = DEBUG, 2+ = TRACE).
    pub verbosity: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cwd: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            json: false,
            verbosity: 0,
        }
    }
}

impl Config {
    /// Create a new config with the given working directory.
    #[must_use]
    pub fn new(cwd: PathBuf) -> Self {
        Self {
            cwd,
            ..Default::default()
        }
    }

    /// Set verbosity level.
    #[must_use]
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set JSON output.
    #[must_use]
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Resolve a user-supplied path against the working directory.
    #[must_use]
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_and_absolute() {
        let config = Config::new(PathBuf::from("/work")).with_json(true);
        assert!(config.json);
        assert_eq!(config.resolve(Path::new("js/a.behavior.js")), PathBuf::from("/work/js/a.behavior.js"));

        let abs = std::env::temp_dir().join("b.behavior.js");
        assert_eq!(config.resolve(&abs), abs);
    }
}
