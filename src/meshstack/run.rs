use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// One execution of a building block, as served by meshStack.
///
/// Only the fields the action reads are typed; everything else in the
/// resource is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingBlockRun {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    pub metadata: RunMetadata,
    pub spec: RunSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "_links")]
    pub links: RunLinks,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub uuid: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_number: Option<u64>,
    pub building_block: BuildingBlock,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub behavior: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<Uuid>,
    pub spec: BuildingBlockSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingBlockSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub inputs: Vec<RunInput>,
}

/// A declared input of the building block. `input_type` is informational.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunInput {
    pub key: String,
    #[serde(default)]
    pub value: Value,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,
    #[serde(default)]
    pub is_sensitive: bool,
    #[serde(default)]
    pub is_environment: bool,
}

impl RunInput {
    /// The value as text: strings verbatim, other JSON values as compact JSON.
    pub fn value_text(&self) -> String {
        match &self.value {
            Value::String(value) => value.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunLinks {
    #[serde(rename = "self")]
    pub self_link: Link,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub register_source: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meshstack_base_url: Option<Link>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub templated: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl BuildingBlockRun {
    pub fn uuid(&self) -> Uuid {
        self.metadata.uuid
    }

    pub fn self_url(&self) -> &str {
        &self.links.self_link.href
    }

    pub fn base_url(&self) -> Option<&str> {
        self.links
            .meshstack_base_url
            .as_ref()
            .map(|link| link.href.trim_end_matches('/'))
            .filter(|href| !href.is_empty())
    }

    pub fn inputs(&self) -> &[RunInput] {
        &self.spec.building_block.spec.inputs
    }
}
