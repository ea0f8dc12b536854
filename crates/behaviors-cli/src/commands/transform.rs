//! `behaviors transform` command implementation.
//!
//! Runs the loader on one file, the way a bundler would for a single module.

use super::{read_source, write_output, ErrorJson};
use crate::config::Config;
use behaviors_core::{module_name, BehaviorsLoader, ConfigError, LoaderOptions};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

/// Transform command action.
#[derive(Debug)]
pub struct TransformAction {
    /// Behavior module to transform.
    pub file: PathBuf,
    /// Output file (if None, prints to stdout).
    pub outfile: Option<PathBuf>,
    /// Loader options, or the reason they were rejected.
    pub options: Result<LoaderOptions, ConfigError>,
}

/// JSON output for transform command.
#[derive(Serialize)]
struct TransformResultJson {
    ok: bool,
    file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    outfile: Option<String>,
    hmr: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
    size_bytes: usize,
    duration_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorJson>,
}

impl TransformResultJson {
    fn failed(action: &TransformAction, error: ErrorJson, duration_ms: u64) -> Self {
        Self {
            ok: false,
            file: action.file.display().to_string(),
            name: None,
            outfile: action.outfile.as_ref().map(|p| p.display().to_string()),
            hmr: false,
            code: None,
            size_bytes: 0,
            duration_ms,
            error: Some(error),
        }
    }
}

/// Run the transform command.
pub fn run(config: &Config, action: TransformAction) -> Result<()> {
    let start = Instant::now();

    // Options are validated before the file is read.
    let options = match action.options {
        Ok(options) => options,
        Err(ref e) => {
            if config.json {
                let json = TransformResultJson::failed(&action, ErrorJson::config(e), 0);
                println!("{}", serde_json::to_string(&json).into_diagnostic()?);
                std::process::exit(1);
            }
            return Err(miette::miette!("{e}"));
        }
    };

    let source = match read_source(&action.file) {
        Ok(source) => source,
        Err(e) => {
            if config.json {
                let json = TransformResultJson::failed(
                    &action,
                    ErrorJson::io(&e, &action.file),
                    start.elapsed().as_millis() as u64,
                );
                println!("{}", serde_json::to_string(&json).into_diagnostic()?);
                std::process::exit(1);
            }
            return Err(e).into_diagnostic();
        }
    };

    let id = action.file.display().to_string();
    let name = module_name(&id);
    let code = BehaviorsLoader::new().transform_with(&source, &id, &options);
    tracing::debug!(file = %id, name = %name, hmr = options.enable_hmr, "transformed behavior");

    if let Some(ref outfile) = action.outfile {
        write_output(outfile, &code).into_diagnostic()?;
        tracing::info!(
            "{} -> {} ({} bytes)",
            action.file.display(),
            outfile.display(),
            code.len()
        );
    }

    let duration_ms = start.elapsed().as_millis() as u64;

    if config.json {
        let json = TransformResultJson {
            ok: true,
            file: id,
            name: Some(name),
            outfile: action.outfile.as_ref().map(|p| p.display().to_string()),
            hmr: options.enable_hmr,
            size_bytes: code.len(),
            code: action.outfile.is_none().then_some(code),
            duration_ms,
            error: None,
        };
        println!("{}", serde_json::to_string(&json).into_diagnostic()?);
    } else if action.outfile.is_none() {
        print!("{code}");
    }

    Ok(())
}
