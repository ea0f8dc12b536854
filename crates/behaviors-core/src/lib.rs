#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::return_self_not_must_use)]

//! Core of the Drupal behaviors loader.
//!
//! Rewrites the main export of a `[name].behavior.js` module into an
//! assignment on `window.Drupal.behaviors.<name>` and optionally appends
//! hot-module-replacement glue that re-attaches the behavior on update.
//!
//! This crate does no logging. Logging is owned by the CLI crate.

pub mod config;
pub mod error;
pub mod loader;
pub mod plugin;
pub mod version;

pub use config::{LoaderOptions, OPTIONS_SCHEMA};
pub use error::{ConfigError, Error};
pub use loader::{
    hmr_bootstrap, is_behavior_file, module_name, object_path, rewrite_exports, transform,
    BehaviorsLoader, DEFAULT_NAMESPACE,
};
pub use plugin::{
    BehaviorsPlugin, HookResult, Plugin, PluginContainer, PluginContext, PluginEnforce,
    PluginError, TransformResult,
};
pub use version::VERSION;
