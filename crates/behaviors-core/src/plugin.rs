//! Plugin interface for mounting the loader in a bundler pipeline.
//!
//! Provides a Rollup-style `transform` hook plus build lifecycle hooks, a
//! container that chains plugins in enforce order, and [`BehaviorsPlugin`],
//! which routes `[name].behavior.<ext>` modules through the loader.
//!
//! ## Example
//!
//! ```
//! use behaviors_core::{BehaviorsPlugin, LoaderOptions, PluginContainer};
//!
//! let mut container = PluginContainer::default();
//! container.add(Box::new(BehaviorsPlugin::new(LoaderOptions::default())));
//!
//! let code = container
//!     .transform("export default {\n}", "js/menu.behavior.js")
//!     .unwrap();
//! assert_eq!(code, "window.Drupal.behaviors.menu = {\n}");
//! ```

use crate::config::LoaderOptions;
use crate::error::ConfigError;
use crate::loader::{is_behavior_file, BehaviorsLoader};
use serde_json::Value;
use std::path::PathBuf;

/// Result type for plugin hooks.
pub type HookResult<T> = Result<T, PluginError>;

/// Error from a plugin.
#[derive(Debug)]
pub struct PluginError {
    /// Plugin name that caused the error.
    pub plugin: String,
    /// Hook that failed.
    pub hook: &'static str,
    /// Error message.
    pub message: String,
}

impl PluginError {
    /// Create an error for a plugin hook.
    pub fn new(plugin: impl Into<String>, hook: &'static str, message: impl Into<String>) -> Self {
        Self {
            plugin: plugin.into(),
            hook,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for PluginError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.plugin, self.hook, self.message)
    }
}

impl std::error::Error for PluginError {}

/// Context passed to plugin hooks.
#[derive(Debug, Default, Clone)]
pub struct PluginContext {
    /// Working directory.
    pub cwd: PathBuf,
}

/// Result of transform hook.
#[derive(Debug, Clone)]
pub struct TransformResult {
    /// Transformed code.
    pub code: String,
}

impl TransformResult {
    pub fn code(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

/// Plugin enforcement ordering.
///
/// Controls where a plugin runs relative to others in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum PluginEnforce {
    /// Runs before normal plugins.
    Pre,
    /// Default ordering (no enforcement).
    #[default]
    Normal,
    /// Runs after normal plugins (e.g., minification).
    Post,
}

/// The main plugin trait.
///
/// All hooks have default implementations that do nothing, so a plugin only
/// implements the ones it needs.
pub trait Plugin: Send + Sync {
    /// Plugin name for debugging and error messages.
    fn name(&self) -> &str;

    /// Plugin ordering: `Pre`, `Normal` (default), or `Post`.
    fn enforce(&self) -> PluginEnforce {
        PluginEnforce::Normal
    }

    /// Called at the start of the build.
    fn build_start(&self, _ctx: &PluginContext) -> HookResult<()> {
        Ok(())
    }

    /// Transform module source code.
    ///
    /// Return `Some(result)` to transform the code, or `None` to pass it through.
    /// Multiple plugins can transform the same module in sequence.
    fn transform(
        &self,
        _code: &str,
        _id: &str,
        _ctx: &PluginContext,
    ) -> HookResult<Option<TransformResult>> {
        Ok(None)
    }

    /// Called at the end of the build.
    fn build_end(&self, _ctx: &PluginContext) -> HookResult<()> {
        Ok(())
    }
}

/// A container for managing multiple plugins.
///
/// Plugins are sorted by their `enforce()` ordering: `Pre` → `Normal` → `Post`.
/// Within the same enforcement level, insertion order is preserved.
pub struct PluginContainer {
    plugins: Vec<Box<dyn Plugin>>,
    ctx: PluginContext,
}

impl PluginContainer {
    /// Create a new plugin container.
    pub fn new(cwd: PathBuf) -> Self {
        Self {
            plugins: Vec::new(),
            ctx: PluginContext { cwd },
        }
    }

    /// Add a plugin, keeping the list in enforce order.
    pub fn add(&mut self, plugin: Box<dyn Plugin>) {
        self.plugins.push(plugin);
        // Stable sort keeps insertion order within each level.
        self.plugins.sort_by_key(|p| p.enforce());
    }

    /// Call build_start on all plugins.
    pub fn build_start(&self) -> HookResult<()> {
        for plugin in &self.plugins {
            plugin.build_start(&self.ctx)?;
        }
        Ok(())
    }

    /// Transform code through all plugins.
    /// Each plugin's output is passed to the next plugin.
    pub fn transform(&self, code: &str, id: &str) -> HookResult<String> {
        let mut current = code.to_string();
        for plugin in &self.plugins {
            if let Some(result) = plugin.transform(&current, id, &self.ctx)? {
                current = result.code;
            }
        }
        Ok(current)
    }

    /// Call build_end on all plugins.
    pub fn build_end(&self) -> HookResult<()> {
        for plugin in &self.plugins {
            plugin.build_end(&self.ctx)?;
        }
        Ok(())
    }
}

impl Default for PluginContainer {
    fn default() -> Self {
        Self::new(std::env::current_dir().unwrap_or_default())
    }
}

/// Plugin that registers behavior modules on the global behaviors object.
///
/// Only modules named `[name].behavior.<ext>` are transformed; everything
/// else passes through untouched. Runs before normal plugins so that later
/// stages (minifiers, banners) see the rewritten code.
#[derive(Debug, Clone)]
pub struct BehaviorsPlugin {
    loader: BehaviorsLoader,
    options: LoaderOptions,
}

impl BehaviorsPlugin {
    /// Create a plugin from already validated options.
    pub fn new(options: LoaderOptions) -> Self {
        Self {
            loader: BehaviorsLoader::new(),
            options,
        }
    }

    /// Create a plugin from raw loader options, validating them first.
    pub fn from_options(options: Option<&Value>) -> Result<Self, ConfigError> {
        Ok(Self::new(LoaderOptions::from_value(options)?))
    }
}

impl Plugin for BehaviorsPlugin {
    fn name(&self) -> &'static str {
        "drupal-behaviors"
    }

    fn enforce(&self) -> PluginEnforce {
        PluginEnforce::Pre
    }

    fn transform(
        &self,
        code: &str,
        id: &str,
        _ctx: &PluginContext,
    ) -> HookResult<Option<TransformResult>> {
        if !is_behavior_file(id) {
            return Ok(None);
        }

        let code = self.loader.transform_with(code, id, &self.options);
        Ok(Some(TransformResult::code(code)))
    }
}
