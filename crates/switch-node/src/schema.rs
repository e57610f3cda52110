//! Declarative input schema for host-rendered widgets

use serde::Serialize;

/// Widget description for one input field
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "widget", rename_all = "snake_case")]
pub enum InputWidget {
    /// Drop-down over a fixed set of options
    Choice {
        options: Vec<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        tooltip: Option<String>,
    },

    /// Boolean toggle
    Boolean { default: bool },

    /// Integer spinner
    Int { default: u32, min: u32, max: u32 },

    /// Float slider
    Float {
        default: f64,
        min: f64,
        max: f64,
        step: f64,
    },
}

/// A named required input
#[derive(Debug, Clone, Serialize)]
pub struct InputField {
    /// Field name, matching the execution input of the same name
    pub name: String,

    /// Widget the host renders for this field
    #[serde(flatten)]
    pub widget: InputWidget,
}

/// Full input schema of a node
#[derive(Debug, Clone, Default, Serialize)]
pub struct InputSchema {
    /// Required fields, in display order
    pub required: Vec<InputField>,
}

impl InputSchema {
    /// Look up a required field by name
    pub fn field(&self, name: &str) -> Option<&InputField> {
        self.required.iter().find(|f| f.name == name)
    }
}
