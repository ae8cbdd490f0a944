//! Declarative node interface.
//!
//! A [`NodeSchema`] is what a host needs to draw a node: its sockets, their
//! kinds and defaults, and the outputs. It serializes to JSON for hosts that
//! read node definitions from a file.

use serde::Serialize;

/// Kind of an input socket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum InputKind {
    /// Image batch.
    Image,
    /// Free text.
    String {
        /// Value used when the input is absent.
        default: String,
    },
    /// One of a fixed list.
    Choice {
        /// Allowed values, in menu order.
        options: Vec<String>,
        /// Value used when the input is absent.
        default: String,
    },
}

impl InputKind {
    /// Free text with a default.
    pub fn string(default: impl Into<String>) -> Self {
        Self::String {
            default: default.into(),
        }
    }

    /// Choice from `options` with a default.
    pub fn choice<S: AsRef<str>>(options: &[S], default: impl Into<String>) -> Self {
        Self::Choice {
            options: options.iter().map(|o| o.as_ref().to_string()).collect(),
            default: default.into(),
        }
    }

    /// Default value, for non-image inputs.
    pub fn default_value(&self) -> Option<&str> {
        match self {
            Self::Image => None,
            Self::String { default } | Self::Choice { default, .. } => Some(default),
        }
    }
}

/// A named input socket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputSpec {
    /// Socket name.
    pub name: String,
    /// Socket kind.
    #[serde(flatten)]
    pub kind: InputKind,
}

impl InputSpec {
    /// Creates an input.
    pub fn new(name: impl Into<String>, kind: InputKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Full description of a node type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeSchema {
    /// Registry key.
    pub class_name: String,
    /// Name shown in menus.
    pub display_name: String,
    /// Menu category, `/` separated.
    pub category: String,
    /// Tooltip text.
    pub description: String,
    /// Inputs that must be connected.
    pub required: Vec<InputSpec>,
    /// Inputs that may be left out.
    pub optional: Vec<InputSpec>,
    /// Output socket types.
    pub return_types: Vec<String>,
    /// Output socket names.
    pub return_names: Vec<String>,
    /// Entry point name.
    pub function: String,
    /// Whether the node is a graph sink.
    pub output_node: bool,
}

impl NodeSchema {
    /// Finds an input by name. The flag is `true` for required inputs.
    pub fn input(&self, name: &str) -> Option<(&InputSpec, bool)> {
        self.required
            .iter()
            .find(|i| i.name == name)
            .map(|i| (i, true))
            .or_else(|| self.optional.iter().find(|i| i.name == name).map(|i| (i, false)))
    }

    /// JSON form of the schema.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> NodeSchema {
        NodeSchema {
            class_name: "Test".into(),
            display_name: "Test".into(),
            category: "image".into(),
            description: String::new(),
            required: vec![
                InputSpec::new("images", InputKind::Image),
                InputSpec::new("mode", InputKind::choice(&["a", "b"], "a")),
            ],
            optional: vec![InputSpec::new("label", InputKind::string("x"))],
            return_types: vec!["STRING".into()],
            return_names: vec!["out".into()],
            function: "run".into(),
            output_node: false,
        }
    }

    #[test]
    fn test_input_lookup() {
        let s = schema();
        assert!(s.input("images").unwrap().1);
        assert!(!s.input("label").unwrap().1);
        assert_eq!(s.input("mode").unwrap().0.kind.default_value(), Some("a"));
        assert!(s.input("nope").is_none());
    }

    #[test]
    fn test_json_shape() {
        let json: serde_json::Value = serde_json::from_str(&schema().to_json().unwrap()).unwrap();
        assert_eq!(json["required"][0]["type"], "IMAGE");
        assert_eq!(json["required"][1]["type"], "CHOICE");
        assert_eq!(json["required"][1]["options"][1], "b");
        assert_eq!(json["optional"][0]["default"], "x");
        assert_eq!(json["output_node"], false);
    }
}
