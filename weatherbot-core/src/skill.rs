//! Chatbot skill request/response payloads (Open Builder skill API v2.0).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const SKILL_VERSION: &str = "2.0";

/// Inbound skill request. Only the fields the server reads are modelled.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkillRequest {
    #[serde(default)]
    pub action: SkillAction,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkillAction {
    #[serde(default)]
    pub params: SkillParams,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkillParams {
    #[serde(default)]
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillResponse {
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<SkillTemplate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ContextControl>,
}

impl SkillResponse {
    pub fn outputs(outputs: Vec<SkillOutput>) -> Self {
        Self {
            version: SKILL_VERSION,
            template: Some(SkillTemplate { outputs }),
            context: None,
        }
    }

    /// The common case: one text bubble.
    pub fn simple_text(text: impl Into<String>) -> Self {
        Self::outputs(vec![SkillOutput::SimpleText { text: text.into() }])
    }

    pub fn context(values: Vec<ContextValue>) -> Self {
        Self {
            version: SKILL_VERSION,
            template: None,
            context: Some(ContextControl { values }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillTemplate {
    pub outputs: Vec<SkillOutput>,
}

/// One output bubble. Serialized as `{"<kind>": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SkillOutput {
    SimpleText {
        text: String,
    },
    #[serde(rename_all = "camelCase")]
    SimpleImage {
        image_url: String,
        alt_text: String,
    },
    TextCard {
        title: String,
        description: String,
        buttons: Vec<Button>,
    },
    BasicCard {
        title: String,
        description: String,
        thumbnail: Thumbnail,
        buttons: Vec<Button>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Thumbnail {
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Button {
    pub action: ButtonAction,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_link_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_text: Option<String>,
}

impl Button {
    pub fn web_link(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            action: ButtonAction::WebLink,
            label: label.into(),
            web_link_url: Some(url.into()),
            message_text: None,
        }
    }

    pub fn message(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            action: ButtonAction::Message,
            label: label.into(),
            web_link_url: None,
            message_text: Some(text.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ButtonAction {
    WebLink,
    Message,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextControl {
    pub values: Vec<ContextValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextValue {
    pub name: String,
    pub life_span: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<BTreeMap<String, String>>,
}
