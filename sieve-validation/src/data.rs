// Input and output field maps

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sieve_core::RequestParams;

/// Raw input values by field name, in submission order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputData {
    fields: IndexMap<String, Value>,
}

impl InputData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object. Anything else is rejected.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn into_inner(self) -> IndexMap<String, Value> {
        self.fields
    }
}

impl From<IndexMap<String, Value>> for InputData {
    fn from(fields: IndexMap<String, Value>) -> Self {
        Self { fields }
    }
}

impl From<Map<String, Value>> for InputData {
    fn from(map: Map<String, Value>) -> Self {
        map.into_iter().collect()
    }
}

impl From<RequestParams> for InputData {
    fn from(params: RequestParams) -> Self {
        params.into_inner().into()
    }
}

impl<K: Into<String>, V: Into<Value>, const N: usize> From<[(K, V); N]> for InputData {
    fn from(fields: [(K, V); N]) -> Self {
        fields.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for InputData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Output of the last rule of every field that passed all its rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidatedData {
    fields: IndexMap<String, Value>,
}

impl ValidatedData {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, field: impl Into<String>, value: Value) {
        self.fields.insert(field.into(), value);
    }

    pub(crate) fn clear(&mut self) {
        self.fields.clear();
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn into_inner(self) -> IndexMap<String, Value> {
        self.fields
    }

    /// The fields as a JSON object.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.fields
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    /// Deserialize the validated fields into a typed struct.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.to_json())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_input_from_array_keeps_order() {
        let data = InputData::from([("b", json!(1)), ("a", json!("x"))]);
        let keys: Vec<&str> = data.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(data.get("a"), Some(&json!("x")));
    }

    #[test]
    fn test_input_from_json() {
        let data = InputData::from_json(r#"{"age": "42", "tags": ["a"]}"#).unwrap();
        assert_eq!(data.len(), 2);
        assert!(InputData::from_json("[1, 2]").is_err());
    }

    #[test]
    fn test_input_from_request_params() {
        let params: RequestParams = [("q", "rust")].into_iter().collect();
        let data = InputData::from(params);
        assert_eq!(data.get("q"), Some(&json!("rust")));
    }

    #[test]
    fn test_validated_deserialize() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Signup {
            age: i64,
            newsletter: bool,
        }

        let mut data = ValidatedData::new();
        data.insert("age", json!(42));
        data.insert("newsletter", json!(false));

        let signup: Signup = data.deserialize().unwrap();
        assert_eq!(
            signup,
            Signup {
                age: 42,
                newsletter: false
            }
        );
        assert_eq!(data.to_json(), json!({"age": 42, "newsletter": false}));
    }
}
