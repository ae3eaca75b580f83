// Rule registry

use crate::validators;
use crate::{Rule, TokenVerifier};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Lookup table from rule name to implementation.
///
/// Cloning is cheap; rules are shared through `Arc`.
#[derive(Clone)]
pub struct RuleRegistry {
    rules: HashMap<String, Arc<dyn Rule>>,
}

impl RuleRegistry {
    /// A registry with no rules at all.
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// A registry holding the built-in rules, verifying CAPTCHA tokens over
    /// HTTP.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        validators::register_builtins(&mut registry, None);
        registry
    }

    /// Built-in rules with a custom CAPTCHA token verifier.
    pub fn with_verifier(verifier: Arc<dyn TokenVerifier>) -> Self {
        let mut registry = Self::empty();
        validators::register_builtins(&mut registry, Some(verifier));
        registry
    }

    /// Register a rule, replacing any rule of the same name
    pub fn register<R>(&mut self, name: impl Into<String>, rule: R) -> &mut Self
    where
        R: Rule + 'static,
    {
        self.rules.insert(name.into(), Arc::new(rule));
        self
    }

    pub fn register_arc(&mut self, name: impl Into<String>, rule: Arc<dyn Rule>) -> &mut Self {
        self.rules.insert(name.into(), rule);
        self
    }

    pub fn resolve(&self, name: &str) -> Option<&Arc<dyn Rule>> {
        self.rules.get(name)
    }

    pub fn has_rule(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.names())
            .finish()
    }
}
