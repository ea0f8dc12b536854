pub mod build;
pub mod transform;
pub mod version;

use behaviors_core::{ConfigError, LoaderOptions};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

/// Resolve loader options from the command line flags.
///
/// `--options` is validated exactly like options handed over by a bundler.
pub fn loader_options(
    enable_hmr: bool,
    options: Option<&str>,
) -> Result<LoaderOptions, ConfigError> {
    match options {
        Some(text) => LoaderOptions::from_json_str(text),
        None => Ok(LoaderOptions::new().with_hmr(enable_hmr)),
    }
}

/// Error payload in JSON output.
#[derive(Serialize)]
pub struct ErrorJson {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ErrorJson {
    pub fn config(err: &ConfigError) -> Self {
        Self {
            code: "INVALID_OPTIONS",
            message: err.to_string(),
            field: err.field().map(str::to_string),
            path: None,
        }
    }

    pub fn io(err: &io::Error, path: &Path) -> Self {
        Self {
            code: "IO_ERROR",
            message: err.to_string(),
            field: None,
            path: Some(path.display().to_string()),
        }
    }
}

/// Read a source file, replacing invalid UTF-8 with the replacement character.
pub fn read_source(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Write transformed output through a temp file and a rename, so readers
/// (e.g. a watching dev server) never see a partial module.
pub fn write_output(path: &Path, contents: &str) -> io::Result<()> {
    let parent = path.parent().unwrap_or(Path::new("."));
    fs::create_dir_all(parent)?;

    let temp_path = parent.join(format!(
        ".{}.tmp.{}",
        path.file_name().and_then(|n| n.to_str()).unwrap_or("behavior"),
        std::process::id()
    ));

    {
        let mut file = File::create(&temp_path)?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()?;
    }

    match fs::rename(&temp_path, path) {
        Ok(()) => Ok(()),
        Err(e) => {
            // On Windows, rename can fail if target exists.
            if cfg!(windows) {
                fs::copy(&temp_path, path)?;
                let _ = fs::remove_file(&temp_path);
                Ok(())
            } else {
                let _ = fs::remove_file(&temp_path);
                Err(e)
            }
        }
    }
}
