// Field rule declarations

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name of the rule that makes a field mandatory.
pub const REQUIRED: &str = "required";

/// Ordered mapping of field name to its rule tokens.
///
/// Token order inside a field is evaluation order. Field order is insertion
/// order and decides the order of reported errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    fields: IndexMap<String, Vec<String>>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the rules of a field
    pub fn field<I, S>(mut self, name: impl Into<String>, rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(name, rules);
        self
    }

    pub fn insert<I, S>(&mut self, name: impl Into<String>, rules: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields
            .insert(name.into(), rules.into_iter().map(Into::into).collect());
    }

    /// Rule tokens of a field, if the field is declared
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Fields whose rule list contains exactly `"required"`, each mapped to an
    /// empty-string placeholder.
    ///
    /// Merged under the input data, the placeholders make an absent required
    /// field reach its `required` rule instead of being skipped.
    pub fn required_fields(&self) -> IndexMap<String, Value> {
        self.fields
            .iter()
            .filter(|(_, rules)| rules.iter().any(|rule| rule == REQUIRED))
            .map(|(field, _)| (field.clone(), Value::String(String::new())))
            .collect()
    }
}

impl<K, R, S> FromIterator<(K, R)> for RuleSet
where
    K: Into<String>,
    R: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, R)>>(iter: I) -> Self {
        let mut set = RuleSet::new();
        for (field, rules) in iter {
            set.insert(field, rules);
        }
        set
    }
}

impl<K, R, S, const N: usize> From<[(K, R); N]> for RuleSet
where
    K: Into<String>,
    R: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from(fields: [(K, R); N]) -> Self {
        fields.into_iter().collect()
    }
}

/// Build a [`RuleSet`] inline.
///
/// ```
/// use sieve_validation::rules;
///
/// let rules = rules! {
///     "age" => ["required", "integer"],
///     "newsletter" => ["bool"],
/// };
/// assert_eq!(rules.get("age").unwrap(), ["required", "integer"]);
/// ```
#[macro_export]
macro_rules! rules {
    ($($field:expr => [$($rule:expr),* $(,)?]),* $(,)?) => {{
        let mut set = $crate::RuleSet::new();
        $(
            let tokens: ::std::vec::Vec<::std::string::String> =
                ::std::vec![$(::std::string::String::from($rule)),*];
            set.insert($field, tokens);
        )*
        set
    }};
}
