// Validation engine

use crate::config::ValidationConfig;
use crate::validators::{HttpVerifier, Recaptcha};
use crate::{
    FieldErrors, InputData, Rule, RuleError, RuleRegistry, RuleSet, RuleSpec, TokenVerifier,
    ValidatedData, ValidationFailure,
};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde_json::Value;
use sieve_core::RequestParams;
use std::sync::Arc;

const LOG_TARGET: &str = "sieve::validation";

/// Built-in rules shared by every engine that does not customise its registry.
static DEFAULT_REGISTRY: Lazy<Arc<RuleRegistry>> =
    Lazy::new(|| Arc::new(RuleRegistry::with_builtins()));

/// Runs a [`RuleSet`] against one snapshot of input data.
///
/// Every call to [`validate`](Self::validate) starts from empty results and
/// evaluates every rule again.
///
/// ```
/// use sieve_validation::{Validation, rules};
/// use serde_json::json;
///
/// let mut validation = Validation::new(
///     [("age", json!("42")), ("email", json!("not-an-email"))],
///     rules! {
///         "age" => ["required", "integer"],
///         "email" => ["required", "email"],
///     },
/// );
///
/// assert_eq!(validation.validate().unwrap(), false);
/// assert_eq!(validation.errors().get("email"), Some("Invalid Email"));
/// ```
#[derive(Debug, Clone)]
pub struct Validation {
    data: InputData,
    rules: RuleSet,
    registry: Arc<RuleRegistry>,
    errors: FieldErrors,
    validated: ValidatedData,
    throws: bool,
}

impl Validation {
    /// Engine with the built-in rules and raise-on-failure disabled.
    pub fn new(data: impl Into<InputData>, rules: impl Into<RuleSet>) -> Self {
        Self::with_registry(data, rules, DEFAULT_REGISTRY.clone())
    }

    pub fn with_registry(
        data: impl Into<InputData>,
        rules: impl Into<RuleSet>,
        registry: Arc<RuleRegistry>,
    ) -> Self {
        Self {
            data: data.into(),
            rules: rules.into(),
            registry,
            errors: FieldErrors::new(),
            validated: ValidatedData::new(),
            throws: false,
        }
    }

    pub fn builder() -> ValidationBuilder {
        ValidationBuilder::default()
    }

    /// Make [`validate`](Self::validate) return the aggregate failure instead
    /// of `Ok(false)`.
    pub fn throws(mut self) -> Self {
        self.throws = true;
        self
    }

    pub fn is_throwing(&self) -> bool {
        self.throws
    }

    pub fn data(&self) -> &InputData {
        &self.data
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Evaluate every field's rule chain.
    ///
    /// Returns whether every field passed. In raise-on-failure mode a failed
    /// run is returned as `Err` carrying all field errors instead.
    pub fn validate(&mut self) -> Result<bool, ValidationFailure> {
        self.errors.clear();
        self.validated.clear();

        for (field, value) in self.effective_fields() {
            let Some(tokens) = self.rules.get(&field) else {
                continue;
            };

            match run_chain(&self.registry, &value, tokens) {
                Ok(Some(output)) => self.validated.insert(field, output),
                Ok(None) => {}
                Err(e) => {
                    sieve_log::debug!(target: LOG_TARGET, "field `{}` failed: {}", field, e);
                    self.errors.insert(field, e.to_string());
                }
            }
        }

        sieve_log::debug!(
            target: LOG_TARGET,
            "validation finished: {} passed, {} failed",
            self.validated.len(),
            self.errors.len()
        );

        if self.throws && !self.errors.is_empty() {
            return Err(ValidationFailure::new(self.errors.clone()));
        }
        Ok(self.errors.is_empty())
    }

    /// Errors of the last run
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn has_error(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn pass(&self) -> bool {
        !self.has_error()
    }

    /// Run validation again and return the validated fields.
    ///
    /// Fails with the same errors [`errors`](Self::errors) reports afterwards.
    pub fn validated(&mut self) -> Result<ValidatedData, ValidationFailure> {
        if !self.validate()? {
            return Err(ValidationFailure::new(self.errors.clone()));
        }
        Ok(self.validated.clone())
    }

    /// Required-field placeholders overwritten by the input data.
    ///
    /// Placeholder fields keep their position when the input supplies them.
    fn effective_fields(&self) -> IndexMap<String, Value> {
        let mut fields = self.rules.required_fields();
        for (field, value) in self.data.iter() {
            fields.insert(field.to_string(), value.clone());
        }
        fields
    }
}

/// Apply a field's rules in order, stopping at the first failure.
///
/// Each rule sees the original value; the result is the last rule's output,
/// or `None` when the field has no rules.
fn run_chain(
    registry: &RuleRegistry,
    value: &Value,
    tokens: &[String],
) -> Result<Option<Value>, RuleError> {
    let mut output = None;
    for token in tokens {
        let spec = RuleSpec::parse(token);
        let Some(rule) = registry.resolve(&spec.name) else {
            sieve_log::warn!(target: LOG_TARGET, "rule `{}` is not defined", spec.name);
            return Err(RuleError::not_defined(spec.name));
        };
        output = Some(rule.apply(value, &spec.args)?);
    }
    Ok(output)
}

/// Builder for [`Validation`].
#[derive(Default)]
pub struct ValidationBuilder {
    data: Option<InputData>,
    rules: RuleSet,
    registry: Option<RuleRegistry>,
    custom_rules: Vec<(String, Arc<dyn Rule>)>,
    verifier: Option<Arc<dyn TokenVerifier>>,
    request_params: Option<RequestParams>,
    use_ambient_request_data: bool,
    throws: bool,
    verification: Option<ValidationConfig>,
}

impl ValidationBuilder {
    pub fn data(mut self, data: impl Into<InputData>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn rules(mut self, rules: impl Into<RuleSet>) -> Self {
        self.rules = rules.into();
        self
    }

    /// Start from this registry instead of the built-in one.
    pub fn registry(mut self, registry: RuleRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Add or override a single rule.
    pub fn rule<R>(mut self, name: impl Into<String>, rule: R) -> Self
    where
        R: Rule + 'static,
    {
        self.custom_rules.push((name.into(), Arc::new(rule)));
        self
    }

    /// Token verifier used by the `recaptcha` rule.
    pub fn verifier(mut self, verifier: Arc<dyn TokenVerifier>) -> Self {
        self.verifier = Some(verifier);
        self
    }

    /// Parameters of the current request, used as input when
    /// [`use_ambient_request_data`](Self::use_ambient_request_data) is on and
    /// no data was given.
    pub fn request_params(mut self, params: RequestParams) -> Self {
        self.request_params = Some(params);
        self
    }

    pub fn use_ambient_request_data(mut self, enabled: bool) -> Self {
        self.use_ambient_request_data = enabled;
        self
    }

    pub fn throws(mut self, enabled: bool) -> Self {
        self.throws = enabled;
        self
    }

    /// Apply engine configuration: ambient data, raise-on-failure and the
    /// verification client settings.
    pub fn config(mut self, config: &ValidationConfig) -> Self {
        self.use_ambient_request_data = config.use_ambient_request_data;
        self.throws = config.throw_on_failure;

        let defaults = ValidationConfig::default();
        let custom_client = config.verification_timeout_secs != defaults.verification_timeout_secs
            || config.verification_max_redirects != defaults.verification_max_redirects;
        self.verification = custom_client.then(|| config.clone());
        self
    }

    pub fn build(self) -> Validation {
        let mut data = self.data.unwrap_or_default();
        if self.use_ambient_request_data
            && data.is_empty()
            && let Some(params) = self.request_params
        {
            sieve_log::debug!(
                target: LOG_TARGET,
                "no input data, using {} request parameters",
                params.len()
            );
            data = params.into();
        }

        let verifier = self.verifier.or_else(|| {
            self.verification.map(|config| {
                Arc::new(HttpVerifier::with_config(config.http_client_config()))
                    as Arc<dyn TokenVerifier>
            })
        });

        let registry = match (self.registry, verifier) {
            (None, None) if self.custom_rules.is_empty() => DEFAULT_REGISTRY.clone(),
            (registry, verifier) => {
                let mut registry = match (registry, verifier) {
                    (None, None) => RuleRegistry::with_builtins(),
                    (None, Some(verifier)) => RuleRegistry::with_verifier(verifier),
                    (Some(registry), None) => registry,
                    (Some(mut registry), Some(verifier)) => {
                        registry.register("recaptcha", Recaptcha::new(verifier));
                        registry
                    }
                };
                for (name, rule) in self.custom_rules {
                    registry.register_arc(name, rule);
                }
                Arc::new(registry)
            }
        };

        let mut validation = Validation::with_registry(data, self.rules, registry);
        validation.throws = self.throws;
        validation
    }
}
