//! `behaviors build` command implementation.
//!
//! Finds every `[name].behavior.<ext>` module under a root directory and
//! runs it through the plugin pipeline. Files are independent, so they are
//! transformed in parallel.

use super::{read_source, write_output, ErrorJson};
use crate::config::Config;
use behaviors_core::{
    is_behavior_file, module_name, BehaviorsPlugin, ConfigError, Error, LoaderOptions,
    PluginContainer,
};
use miette::{IntoDiagnostic, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use walkdir::WalkDir;

/// Build command action.
#[derive(Debug)]
pub struct BuildAction {
    /// Directory scanned for behavior modules.
    pub root: PathBuf,
    /// Output directory.
    pub out_dir: PathBuf,
    /// Loader options, or the reason they were rejected.
    pub options: Result<LoaderOptions, ConfigError>,
}

/// One transformed module.
#[derive(Debug, Serialize)]
struct BuiltFile {
    file: String,
    outfile: String,
    name: String,
    size_bytes: usize,
}

/// JSON output for build command.
#[derive(Serialize)]
struct BuildResultJson {
    ok: bool,
    root: String,
    out_dir: String,
    hmr: bool,
    files: Vec<BuiltFile>,
    duration_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorJson>,
}

/// Whether two paths name the same directory. Falls back to a plain
/// comparison when either side does not exist yet.
fn same_dir(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Collect behavior modules under `root`, skipping `out_dir` if it is nested inside.
fn discover(root: &Path, out_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.path() != out_dir);

    for entry in walker {
        let entry = entry.into_diagnostic()?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.file_name().to_str().is_some_and(is_behavior_file) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Transform one module and write it under the output directory.
fn build_file(
    container: &PluginContainer,
    action: &BuildAction,
    file: &Path,
) -> std::result::Result<BuiltFile, (PathBuf, Error)> {
    let fail = |e: Error| (file.to_path_buf(), e);

    let source = read_source(file).map_err(|e| fail(e.into()))?;
    let id = file.display().to_string();
    let code = container
        .transform(&source, &id)
        .map_err(|e| fail(e.into()))?;

    let relative = file.strip_prefix(&action.root).unwrap_or(file);
    let outfile = action.out_dir.join(relative);
    write_output(&outfile, &code).map_err(|e| fail(e.into()))?;

    let name = module_name(&id);
    tracing::debug!(file = %id, name = %name, "transformed behavior");

    Ok(BuiltFile {
        file: relative.display().to_string(),
        outfile: outfile.display().to_string(),
        name,
        size_bytes: code.len(),
    })
}

fn error_json(path: &Path, err: &Error) -> ErrorJson {
    match err {
        Error::Io(e) => ErrorJson::io(e, path),
        Error::Plugin(e) => ErrorJson {
            code: "PLUGIN_ERROR",
            message: e.to_string(),
            field: None,
            path: Some(path.display().to_string()),
        },
    }
}

/// Run the build command.
pub fn run(config: &Config, action: BuildAction) -> Result<()> {
    let start = Instant::now();

    let result_json = |hmr: bool, files: Vec<BuiltFile>, error: Option<ErrorJson>| BuildResultJson {
        ok: error.is_none(),
        root: action.root.display().to_string(),
        out_dir: action.out_dir.display().to_string(),
        hmr,
        files,
        duration_ms: start.elapsed().as_millis() as u64,
        error,
    };

    // Options are validated before any file is read.
    let options = match action.options {
        Ok(options) => options,
        Err(ref e) => {
            if config.json {
                let json = result_json(false, Vec::new(), Some(ErrorJson::config(e)));
                println!("{}", serde_json::to_string(&json).into_diagnostic()?);
                std::process::exit(1);
            }
            return Err(miette::miette!("{e}"));
        }
    };

    // Writing into the scanned root would overwrite the sources in place.
    if same_dir(&action.root, &action.out_dir) {
        let message = format!(
            "output directory {} must differ from the source root",
            action.out_dir.display()
        );
        if config.json {
            let error = ErrorJson {
                code: "INVALID_OUT_DIR",
                message,
                field: None,
                path: Some(action.out_dir.display().to_string()),
            };
            let json = result_json(options.enable_hmr, Vec::new(), Some(error));
            println!("{}", serde_json::to_string(&json).into_diagnostic()?);
            std::process::exit(1);
        }
        return Err(miette::miette!("{message}"));
    }

    let mut container = PluginContainer::new(config.cwd.clone());
    container.add(Box::new(BehaviorsPlugin::new(options)));

    let files = discover(&action.root, &action.out_dir)?;
    tracing::debug!(count = files.len(), root = %action.root.display(), "discovered behavior modules");

    container.build_start().into_diagnostic()?;
    let built: std::result::Result<Vec<BuiltFile>, (PathBuf, Error)> = files
        .par_iter()
        .map(|file| build_file(&container, &action, file))
        .collect();
    container.build_end().into_diagnostic()?;

    match built {
        Ok(files) => {
            tracing::info!(
                "{} behavior modules -> {} ({}ms)",
                files.len(),
                action.out_dir.display(),
                start.elapsed().as_millis()
            );
            if config.json {
                let json = result_json(options.enable_hmr, files, None);
                println!("{}", serde_json::to_string(&json).into_diagnostic()?);
            } else {
                for file in &files {
                    println!("  {} -> {} ({})", file.file, file.outfile, file.name);
                }
            }
            Ok(())
        }
        Err((path, e)) => {
            if config.json {
                let json = result_json(options.enable_hmr, Vec::new(), Some(error_json(&path, &e)));
                println!("{}", serde_json::to_string(&json).into_diagnostic()?);
                std::process::exit(1);
            }
            Err(miette::miette!("{}: {e}", path.display()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_same_dir_sees_through_dot_segments() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(&src).unwrap();

        assert!(same_dir(&src, &src.join(".")));
        assert!(same_dir(&src, &dir.path().join("src").join("..").join("src")));
        assert!(!same_dir(&src, &dir.path().join("dist")));
        assert!(!same_dir(&src, dir.path()));
    }

    #[test]
    fn test_discover_skips_nested_out_dir() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let out = root.join("dist");
        fs::create_dir_all(&out).unwrap();
        fs::write(root.join("menu.behavior.js"), "export default {}").unwrap();
        fs::write(root.join("index.js"), "export default {}").unwrap();
        fs::write(out.join("menu.behavior.js"), "window.Drupal.behaviors.menu = {}").unwrap();

        let files = discover(root, &out).unwrap();
        assert_eq!(files, vec![root.join("menu.behavior.js")]);
    }
}
