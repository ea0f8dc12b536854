//! The behaviors loader transform.
//!
//! Given the text of a `[name].behavior.js` module, every export statement
//! that opens an object literal (`export default {`, `module.exports = {`)
//! is replaced with an assignment to `window.Drupal.behaviors.<name>`.
//! With HMR enabled, glue that re-attaches the behavior on hot update is
//! appended.
//!
//! The rewrite is a textual pattern match, not a syntactic one. It will
//! also rewrite matching text inside comments or strings, and a file with
//! several matching statements assigns all of them to the same target.
//!
//! ## Example
//!
//! ```
//! use behaviors_core::transform;
//! use serde_json::json;
//!
//! let out = transform(
//!     "export default {\n  attach() {}\n}",
//!     "js/menu.behavior.js",
//!     Some(&json!({ "enableHmr": false })),
//! )
//! .unwrap();
//! assert_eq!(out, "window.Drupal.behaviors.menu = {\n  attach() {}\n}");
//! ```

mod hmr;

pub use hmr::hmr_bootstrap;

use crate::config::LoaderOptions;
use crate::error::ConfigError;
use regex_lite::{NoExpand, Regex};
use serde_json::Value;
use std::borrow::Cow;
use std::sync::OnceLock;

/// Global object under `window` that holds the behaviors registry.
pub const DEFAULT_NAMESPACE: &str = "Drupal";

/// Any character except an ECMAScript line terminator.
const LINE_CHAR: &str = "[^\n\r\u{2028}\u{2029}]";

/// ECMAScript `\s`. regex-lite's `\s` only covers ASCII.
const JS_SPACE: &str = "[\t\n\u{b}\u{c}\r \u{a0}\u{1680}\u{2000}-\u{200a}\u{2028}\u{2029}\u{202f}\u{205f}\u{3000}\u{feff}]";

/// Matches an export statement opening, from the start of its line up to
/// the last `{` on the line that holds `default` or `exports`:
/// `.*(export|module)(\s|\.)*(default|exports).*{`
fn export_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        let pattern =
            format!("{LINE_CHAR}*(export|module)({JS_SPACE}|\\.)*(default|exports){LINE_CHAR}*\\{{");
        Regex::new(&pattern).expect("export pattern should compile")
    })
}

/// Base name of a file identifier, accepting both `/` and `\` separators.
fn base_name(file_identifier: &str) -> &str {
    file_identifier
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_identifier)
}

/// Base name without its final extension. A leading dot is part of the
/// name, not an extension separator.
fn file_stem(file_identifier: &str) -> &str {
    let base = base_name(file_identifier);
    match base.rfind('.') {
        Some(idx) if idx > 0 => &base[..idx],
        _ => base,
    }
}

/// Derive the behavior name from a file identifier.
///
/// Takes the base name without extension and keeps everything before the
/// first dot: `js/menu.behavior.js` gives `menu`. A base name with more
/// dots collapses to its first segment (`my.thing.behavior.js` gives `my`).
/// The result is not validated and may be empty.
#[must_use]
pub fn module_name(file_identifier: &str) -> String {
    let stem = file_stem(file_identifier);
    stem.split('.').next().unwrap_or(stem).to_string()
}

/// Whether a file identifier follows the `[name].behavior.<ext>` convention.
#[must_use]
pub fn is_behavior_file(file_identifier: &str) -> bool {
    let base = base_name(file_identifier);
    let stem = file_stem(file_identifier);
    if stem.len() == base.len() {
        // No extension.
        return false;
    }
    stem.strip_suffix(".behavior")
        .is_some_and(|name| !name.is_empty())
}

/// Full global path a behavior is registered under.
#[must_use]
pub fn object_path(namespace: &str, name: &str) -> String {
    format!("window.{namespace}.behaviors.{name}")
}

/// Replace every export statement opening with `<object_path> = {`.
///
/// Returns the input unchanged (borrowed) when nothing matches.
pub fn rewrite_exports<'a>(content: &'a str, object_path: &str) -> Cow<'a, str> {
    let declaration = format!("{object_path} = {{");
    export_pattern().replace_all(content, NoExpand(&declaration))
}

/// Transform a behavior module.
///
/// Uses the `Drupal` namespace root. See [`BehaviorsLoader::transform`].
pub fn transform(
    content: &str,
    file_identifier: &str,
    config: Option<&Value>,
) -> Result<String, ConfigError> {
    BehaviorsLoader::new().transform(content, file_identifier, config)
}

/// Transforms behavior modules for one namespace root.
#[derive(Debug, Clone)]
pub struct BehaviorsLoader {
    namespace: String,
}

impl BehaviorsLoader {
    /// Create a loader targeting `window.Drupal.behaviors`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }

    /// Target a different namespace root (`window.<namespace>.behaviors`).
    #[must_use]
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Validate raw loader options, then transform `content`.
    ///
    /// Fails only when the options do not match the options schema; no
    /// content is transformed in that case.
    pub fn transform(
        &self,
        content: &str,
        file_identifier: &str,
        config: Option<&Value>,
    ) -> Result<String, ConfigError> {
        let options = LoaderOptions::from_value(config)?;
        Ok(self.transform_with(content, file_identifier, &options))
    }

    /// Transform `content` with already validated options.
    #[must_use]
    pub fn transform_with(
        &self,
        content: &str,
        file_identifier: &str,
        options: &LoaderOptions,
    ) -> String {
        let name = module_name(file_identifier);
        let path = object_path(&self.namespace, &name);
        let rewritten = rewrite_exports(content, &path);

        if options.enable_hmr {
            let mut out = rewritten.into_owned();
            out.push_str(&hmr_bootstrap(&path, &name, &self.namespace));
            out
        } else {
            rewritten.into_owned()
        }
    }
}

impl Default for BehaviorsLoader {
    fn default() -> Self {
        Self::new()
    }
}
