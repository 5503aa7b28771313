//! Interactive dialog wire types.
//!
//! An interactive dialog is a host-rendered modal form described by a list of
//! typed elements. The host submits the filled form as one payload to the
//! dialog's `url`, keyed by element `name`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Request handed to the host's "open interactive dialog" primitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenDialogRequest {
    /// Short-lived trigger issued by the host for out-of-process callers.
    /// In-process hosts leave it empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_id: Option<String>,
    /// Route the host POSTs the submission to.
    pub url: String,
    pub dialog: Dialog,
}

/// The dialog body: title, ordered elements and the submit button label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dialog {
    /// Echoed back on submission to correlate it with the triggering post.
    pub callback_id: String,
    pub title: String,
    /// Rendered and submitted in this order.
    pub elements: Vec<DialogElement>,
    pub submit_label: String,
}

impl Dialog {
    /// Find an element by its submission key.
    pub fn element(&self, name: &str) -> Option<&DialogElement> {
        self.elements.iter().find(|e| e.name() == name)
    }

    /// Element names in declared order.
    pub fn element_names(&self) -> Vec<&str> {
        self.elements.iter().map(DialogElement::name).collect()
    }
}

/// One form element. Each variant carries only the fields its kind accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DialogElement {
    /// Dropdown fed by a host data source (e.g. `channels`).
    Select {
        display_name: String,
        name: String,
        data_source: String,
        placeholder: String,
    },
    /// Checkbox. Required unless the host is told otherwise.
    Bool {
        display_name: String,
        name: String,
        placeholder: String,
    },
    Radio {
        display_name: String,
        name: String,
        default: String,
        options: Vec<DialogOption>,
    },
    Textarea {
        display_name: String,
        name: String,
        placeholder: String,
        optional: bool,
    },
}

impl DialogElement {
    /// Submission key of the element.
    pub fn name(&self) -> &str {
        match self {
            DialogElement::Select { name, .. }
            | DialogElement::Bool { name, .. }
            | DialogElement::Radio { name, .. }
            | DialogElement::Textarea { name, .. } => name,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            DialogElement::Select { display_name, .. }
            | DialogElement::Bool { display_name, .. }
            | DialogElement::Radio { display_name, .. }
            | DialogElement::Textarea { display_name, .. } => display_name,
        }
    }

    /// The `type` tag as the host spells it.
    pub fn kind(&self) -> &'static str {
        match self {
            DialogElement::Select { .. } => "select",
            DialogElement::Bool { .. } => "bool",
            DialogElement::Radio { .. } => "radio",
            DialogElement::Textarea { .. } => "textarea",
        }
    }
}

/// A label/value pair of a radio or static select element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogOption {
    pub text: String,
    pub value: String,
}

impl DialogOption {
    pub fn new(text: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            value: value.into(),
        }
    }
}

/// Payload the host POSTs to the dialog `url` when the user submits.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmitDialogRequest {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub url: String,
    /// The `callback_id` the dialog was opened with (the post id).
    #[serde(default)]
    pub callback_id: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub user_id: String,
    /// Channel the dialog was opened from.
    #[serde(default)]
    pub channel_id: String,
    #[serde(default)]
    pub team_id: String,
    #[serde(default)]
    pub submission: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub cancelled: bool,
}

/// Reply to a submission. Field errors keep the dialog open.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitDialogResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<String, String>,
}

impl SubmitDialogResponse {
    /// A response flagging a single element.
    pub fn field_error(name: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = BTreeMap::new();
        errors.insert(name.into(), message.into());
        Self {
            error: None,
            errors,
        }
    }
}

/// Payload of a message action invoked by the host for an out-of-process
/// integration. Carries the trigger needed to open a dialog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostActionRequest {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub channel_id: String,
    #[serde(default)]
    pub team_id: String,
    pub post_id: String,
    #[serde(default)]
    pub trigger_id: String,
    #[serde(default)]
    pub context: serde_json::Map<String, serde_json::Value>,
}
