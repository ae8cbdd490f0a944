//! Node registry.
//!
//! Hosts discover nodes through two tables: class name to node type and
//! class name to display name. [`NodeRegistry`] keeps both in one place and
//! builds node instances on demand.

use std::collections::BTreeMap;
use std::fmt;

use crate::config::PluginConfig;
use crate::schema::NodeSchema;
use crate::value::{NodeInputs, NodeOutputs};
use crate::{NodeError, NodeResult};

/// An executable node.
pub trait Node: Send + Sync {
    /// Interface of the node.
    fn schema(&self) -> &NodeSchema;

    /// Runs the node once.
    fn execute(&self, inputs: &NodeInputs) -> NodeResult<NodeOutputs>;
}

/// Builds a node instance.
pub type NodeFactory = fn(&PluginConfig) -> NodeResult<Box<dyn Node>>;

/// Registry entry for one node class.
#[derive(Clone)]
pub struct NodeRegistration {
    /// Interface of the node.
    pub schema: NodeSchema,
    /// Instance constructor.
    pub factory: NodeFactory,
}

impl NodeRegistration {
    /// Registry key.
    pub fn class_name(&self) -> &str {
        &self.schema.class_name
    }

    /// Menu name.
    pub fn display_name(&self) -> &str {
        &self.schema.display_name
    }
}

impl fmt::Debug for NodeRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRegistration")
            .field("class_name", &self.schema.class_name)
            .field("display_name", &self.schema.display_name)
            .finish_non_exhaustive()
    }
}

/// Class name to registration table.
#[derive(Debug, Clone, Default)]
pub struct NodeRegistry {
    nodes: BTreeMap<String, NodeRegistration>,
}

impl NodeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node class, replacing (and returning) a previous registration.
    pub fn register(&mut self, registration: NodeRegistration) -> Option<NodeRegistration> {
        let class = registration.class_name().to_string();
        self.nodes.insert(class, registration)
    }

    /// Adds every class of `other`. Entries of `other` win on conflict.
    pub fn merge(&mut self, other: NodeRegistry) {
        self.nodes.extend(other.nodes);
    }

    /// Number of registered classes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Registration of `class`.
    pub fn get(&self, class: &str) -> Option<&NodeRegistration> {
        self.nodes.get(class)
    }

    /// All registrations, ordered by class name.
    pub fn iter(&self) -> impl Iterator<Item = &NodeRegistration> {
        self.nodes.values()
    }

    /// Class name to schema.
    pub fn class_mappings(&self) -> BTreeMap<&str, &NodeSchema> {
        self.nodes
            .iter()
            .map(|(k, r)| (k.as_str(), &r.schema))
            .collect()
    }

    /// Class name to display name.
    pub fn display_name_mappings(&self) -> BTreeMap<&str, &str> {
        self.nodes
            .iter()
            .map(|(k, r)| (k.as_str(), r.display_name()))
            .collect()
    }

    /// Builds an instance of `class`.
    pub fn create(&self, class: &str, config: &PluginConfig) -> NodeResult<Box<dyn Node>> {
        let registration = self
            .nodes
            .get(class)
            .ok_or_else(|| NodeError::UnknownNode(class.to_string()))?;
        (registration.factory)(config)
    }
}
