//! Lightweight read of an OCIO config.
//!
//! Only the fields needed to describe a config are read. Entries are
//! usually tagged (`!<ColorSpace>`), so the file is walked as a generic
//! YAML value rather than deserialized into a fixed schema.

use std::path::{Path, PathBuf};

use serde_yaml::Value;

use crate::{OcioError, OcioResult};

/// Identity and color spaces of a config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSummary {
    /// File that was read.
    pub path: PathBuf,
    /// `ocio_profile_version`, as written.
    pub profile_version: String,
    /// Config `name`, if present.
    pub name: Option<String>,
    /// Scene and display color space names, in file order.
    pub colorspaces: Vec<String>,
}

fn untag(value: &Value) -> &Value {
    match value {
        Value::Tagged(tagged) => &tagged.value,
        other => other,
    }
}

fn scalar(value: &Value) -> Option<String> {
    match untag(value) {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl ConfigSummary {
    /// Reads the config at `path`.
    pub fn from_file(path: impl AsRef<Path>) -> OcioResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(OcioError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let mut summary = Self::from_yaml_str(&content)?;
        summary.path = path.to_path_buf();
        Ok(summary)
    }

    /// Reads a config from YAML text.
    pub fn from_yaml_str(yaml: &str) -> OcioResult<Self> {
        let root: Value = serde_yaml::from_str(yaml)?;
        let root = untag(&root);
        if !root.is_mapping() {
            return Err(OcioError::InvalidConfig("top level is not a mapping".into()));
        }

        let profile_version = root
            .get("ocio_profile_version")
            .and_then(scalar)
            .ok_or_else(|| OcioError::InvalidConfig("missing ocio_profile_version".into()))?;

        let colorspaces = ["colorspaces", "display_colorspaces"]
            .iter()
            .filter_map(|key| root.get(*key).map(untag))
            .filter_map(Value::as_sequence)
            .flatten()
            .filter_map(|entry| untag(entry).get("name").and_then(scalar))
            .collect();

        Ok(Self {
            path: PathBuf::new(),
            profile_version,
            name: root.get("name").and_then(scalar),
            colorspaces,
        })
    }

    /// Whether the config defines `name`. Case-insensitive.
    pub fn has_colorspace(&self, name: &str) -> bool {
        self.colorspaces.iter().any(|c| c.eq_ignore_ascii_case(name))
    }

    /// File name of the config, for headers and messages.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
