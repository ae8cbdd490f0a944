//! Values flowing into and out of nodes.

use std::collections::BTreeMap;

use aces_core::ImageBatch;

use crate::schema::{InputKind, NodeSchema};
use crate::{NodeError, NodeResult};

/// A socket value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Image batch.
    Image(ImageBatch),
    /// Text or choice.
    String(String),
}

impl Value {
    /// The string, if this is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            Self::Image(_) => None,
        }
    }
}

impl From<ImageBatch> for Value {
    fn from(batch: ImageBatch) -> Self {
        Self::Image(batch)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

/// Named inputs of one execution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeInputs {
    values: BTreeMap<String, Value>,
}

impl NodeInputs {
    /// No inputs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an input, builder style.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Adds or replaces an input.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    /// Raw value lookup.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Image input `name`.
    pub fn image(&self, name: &str) -> NodeResult<&ImageBatch> {
        match self.values.get(name) {
            Some(Value::Image(batch)) => Ok(batch),
            Some(Value::String(_)) => Err(NodeError::WrongType {
                name: name.to_string(),
                expected: "an image",
            }),
            None => Err(NodeError::MissingInput {
                name: name.to_string(),
            }),
        }
    }

    /// String or choice input `name`, checked against `schema`.
    ///
    /// Missing optional inputs take their declared default. Choice values
    /// must be one of the declared options.
    pub fn string(&self, schema: &NodeSchema, name: &str) -> NodeResult<String> {
        let missing = || NodeError::MissingInput {
            name: name.to_string(),
        };
        let (spec, required) = schema.input(name).ok_or_else(missing)?;

        let value = match self.values.get(name) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Image(_)) => {
                return Err(NodeError::WrongType {
                    name: name.to_string(),
                    expected: "a string",
                });
            }
            None if required => return Err(missing()),
            None => spec.kind.default_value().ok_or_else(missing)?.to_string(),
        };

        if let InputKind::Choice { options, .. } = &spec.kind {
            if !options.iter().any(|o| *o == value) {
                return Err(NodeError::InvalidChoice {
                    name: name.to_string(),
                    value,
                    options: options.clone(),
                });
            }
        }
        Ok(value)
    }
}

/// Named outputs of one execution, in socket order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeOutputs {
    values: Vec<(String, Value)>,
}

impl NodeOutputs {
    /// Appends an output.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.push((name.into(), value.into()));
    }

    /// Output `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// String output `name`.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// All outputs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of outputs.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no outputs.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::InputSpec;

    fn schema() -> NodeSchema {
        NodeSchema {
            class_name: "T".into(),
            display_name: "T".into(),
            category: "test".into(),
            description: String::new(),
            required: vec![
                InputSpec::new("images", InputKind::Image),
                InputSpec::new("prefix", InputKind::string("out")),
            ],
            optional: vec![
                InputSpec::new("mode", InputKind::choice(&["fast", "slow"], "fast")),
                InputSpec::new("note", InputKind::string("")),
            ],
            return_types: vec![],
            return_names: vec![],
            function: "run".into(),
            output_node: true,
        }
    }

    #[test]
    fn test_defaults_for_optional() {
        let s = schema();
        let inputs = NodeInputs::new().with("prefix", "shot");
        assert_eq!(inputs.string(&s, "prefix").unwrap(), "shot");
        assert_eq!(inputs.string(&s, "mode").unwrap(), "fast");
        assert_eq!(inputs.string(&s, "note").unwrap(), "");
    }

    #[test]
    fn test_required_missing() {
        let s = schema();
        let inputs = NodeInputs::new();
        assert!(matches!(inputs.string(&s, "prefix"), Err(NodeError::MissingInput { .. })));
        assert!(matches!(inputs.image("images"), Err(NodeError::MissingInput { .. })));
        assert!(matches!(inputs.string(&s, "undeclared"), Err(NodeError::MissingInput { .. })));
    }

    #[test]
    fn test_choice_validation() {
        let s = schema();
        let inputs = NodeInputs::new().with("mode", "medium");
        match inputs.string(&s, "mode") {
            Err(NodeError::InvalidChoice { value, options, .. }) => {
                assert_eq!(value, "medium");
                assert_eq!(options, ["fast", "slow"]);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_wrong_types() {
        let s = schema();
        let batch = ImageBatch::from_tensor(&[1, 1, 1, 3], vec![0.0; 3]).unwrap();
        let inputs = NodeInputs::new().with("prefix", batch).with("images", "oops");
        assert!(matches!(inputs.string(&s, "prefix"), Err(NodeError::WrongType { .. })));
        assert!(matches!(inputs.image("images"), Err(NodeError::WrongType { .. })));
    }

    #[test]
    fn test_outputs() {
        let mut out = NodeOutputs::default();
        out.push("exr_path", "/tmp/a.exr");
        out.push("conversion_info", String::from("ok"));
        assert_eq!(out.len(), 2);
        assert_eq!(out.get_str("exr_path"), Some("/tmp/a.exr"));
        assert_eq!(out.iter().map(|(n, _)| n).collect::<Vec<_>>(), ["exr_path", "conversion_info"]);
        assert!(out.get("missing").is_none());
    }
}
