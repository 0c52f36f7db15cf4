//! Environment inputs and the frozen template context.
//!
//! The original scripts this engine replaces branched on ambient environment
//! variables mid-run. Here the branching inputs are collected once, up
//! front, into [`EnvironmentInputs`]; the [`TemplateContext`] derived from
//! them is immutable for the rest of the run, which guarantees every
//! generated file sees the same substitutions.

use std::collections::BTreeMap;

/// Explicit inputs that parameterize plan construction.
///
/// The CLI layer populates this from flags, process environment, and config
/// defaults; the core never reads `std::env` itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentInputs {
    /// Current environment name, e.g. `development` or `test`.
    pub environment: String,
    /// Major version of the target web framework.
    pub framework_major: u32,
    /// Whether the generated app should reload classes between requests.
    pub class_reloading: bool,
    /// Parallel-test worker suffix, when running under a test splitter.
    pub test_env_number: Option<String>,
}

impl EnvironmentInputs {
    pub fn new(environment: impl Into<String>, framework_major: u32) -> Self {
        Self {
            environment: environment.into(),
            framework_major,
            class_reloading: false,
            test_env_number: None,
        }
    }

    pub fn is_test(&self) -> bool {
        self.environment == "test"
    }
}

/// Frozen variable bindings used to render operation payloads.
///
/// Built exactly once, before any operation executes; recomputation
/// mid-plan is not possible because plan construction consumes the context
/// by reference and the executor only ever sees rendered strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateContext {
    vars: BTreeMap<String, String>,
}

impl TemplateContext {
    /// Resolve the standard variables from the environment inputs.
    pub fn resolve(inputs: &EnvironmentInputs) -> Self {
        let mut vars = BTreeMap::new();
        vars.insert("ENVIRONMENT".into(), inputs.environment.clone());
        // Association flags changed shape at framework major 5.
        let belongs_to = if inputs.framework_major < 5 {
            "required: false"
        } else {
            "optional: true"
        };
        vars.insert("OPTIONAL_BELONGS_TO".into(), belongs_to.into());
        vars.insert(
            "CLASS_RELOADING".into(),
            if inputs.class_reloading { "true" } else { "false" }.into(),
        );
        vars.insert(
            "TEST_ENV_SUFFIX".into(),
            inputs.test_env_number.clone().unwrap_or_default(),
        );
        Self { vars }
    }

    /// Add a custom variable. Consumes self: additions happen while the
    /// context is being assembled, before any rendering.
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Pure `{{NAME}}` substitution. Unknown variables are left in place so
    /// the plan builder can detect and report them.
    pub fn render(&self, template: &str) -> String {
        let mut out = template.to_string();
        for (name, value) in &self.vars {
            out = out.replace(&format!("{{{{{name}}}}}"), value);
        }
        out
    }
}

/// Names of `{{…}}` references remaining in a rendered string.
pub fn unresolved_variables(text: &str) -> Vec<String> {
    let mut found = Vec::new();
    let mut rest = text;
    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let name = after[..end].trim();
                if !name.is_empty() && !found.iter().any(|f| f == name) {
                    found.push(name.to_string());
                }
                rest = &after[end + 2..];
            }
            None => break,
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(major: u32) -> EnvironmentInputs {
        EnvironmentInputs::new("development", major)
    }

    #[test]
    fn optional_flag_for_modern_framework() {
        let ctx = TemplateContext::resolve(&inputs(5));
        assert_eq!(ctx.get("OPTIONAL_BELONGS_TO"), Some("optional: true"));
        let ctx = TemplateContext::resolve(&inputs(7));
        assert_eq!(ctx.get("OPTIONAL_BELONGS_TO"), Some("optional: true"));
    }

    #[test]
    fn required_flag_for_legacy_framework() {
        let ctx = TemplateContext::resolve(&inputs(4));
        assert_eq!(ctx.get("OPTIONAL_BELONGS_TO"), Some("required: false"));
    }

    #[test]
    fn environment_variable_resolved() {
        let ctx = TemplateContext::resolve(&EnvironmentInputs::new("test", 7));
        assert_eq!(ctx.get("ENVIRONMENT"), Some("test"));
    }

    #[test]
    fn test_env_suffix_defaults_empty() {
        let ctx = TemplateContext::resolve(&inputs(7));
        assert_eq!(ctx.get("TEST_ENV_SUFFIX"), Some(""));

        let mut with_number = inputs(7);
        with_number.test_env_number = Some("2".into());
        let ctx = TemplateContext::resolve(&with_number);
        assert_eq!(ctx.get("TEST_ENV_SUFFIX"), Some("2"));
    }

    #[test]
    fn class_reloading_exposed_as_variable() {
        let ctx = TemplateContext::resolve(&inputs(7));
        assert_eq!(ctx.get("CLASS_RELOADING"), Some("false"));

        let mut reloading = inputs(7);
        reloading.class_reloading = true;
        let ctx = TemplateContext::resolve(&reloading);
        assert_eq!(ctx.get("CLASS_RELOADING"), Some("true"));
    }

    #[test]
    fn render_substitutes_known_variables() {
        let ctx = TemplateContext::resolve(&inputs(7)).with_variable("AUTHOR", "Alice");
        assert_eq!(
            ctx.render("by {{AUTHOR}} in {{ENVIRONMENT}}"),
            "by Alice in development"
        );
    }

    #[test]
    fn render_leaves_unknown_variables() {
        let ctx = TemplateContext::resolve(&inputs(7));
        let rendered = ctx.render("hello {{NOBODY}}");
        assert_eq!(rendered, "hello {{NOBODY}}");
        assert_eq!(unresolved_variables(&rendered), vec!["NOBODY".to_string()]);
    }

    #[test]
    fn unresolved_scan_ignores_resolved_text() {
        assert!(unresolved_variables("plain text } { }} {{").is_empty());
    }

    #[test]
    fn unresolved_scan_deduplicates() {
        assert_eq!(unresolved_variables("{{A}} {{A}} {{B}}").len(), 2);
    }
}
