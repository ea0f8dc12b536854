//! Hot module replacement glue for behavior modules.
//!
//! Appended after the rewritten module when HMR is enabled. It targets the
//! webpack dev-server runtime (`module.hot`): the module accepts its own
//! updates, re-runs `attach()` when a new version is applied, and calls
//! `detach()` on the outgoing version before it is disposed.

/// Generate the HMR footer for a behavior.
///
/// The returned text starts with a newline so it can be appended directly
/// to the module source. `object_path` and `name` are interpolated verbatim.
#[must_use]
pub fn hmr_bootstrap(object_path: &str, name: &str, namespace: &str) -> String {
    format!(
        r"
  if (module.hot) {{
    console.log('{namespace} Behaviors - attaching: {name}')
    module.hot.accept()

    if (module.hot.status() === 'apply' && typeof {object_path}.attach === 'function') {{
      {object_path}.attach()
    }}

    module.hot.dispose(function () {{
      if (typeof {object_path}.detach === 'function') {{
        console.log('{namespace} Behaviors - detaching: {name}')
        {object_path}.detach()
      }}
    }})
  }}"
    )
}
