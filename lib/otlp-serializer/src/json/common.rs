use serde::Serialize;

use crate::{
    any_value::{to_attributes, EncodedKeyValue},
    encoding::Encoder,
    model,
};

/// A `Resource`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    /// Resource attributes.
    pub attributes: Vec<EncodedKeyValue>,

    /// Number of attributes dropped by the SDK.
    pub dropped_attributes_count: u32,
}

impl Resource {
    pub(super) fn new(resource: &model::Resource, encoder: &Encoder) -> Self {
        Self {
            attributes: to_attributes(&resource.attributes, encoder),
            dropped_attributes_count: resource.dropped_attributes_count,
        }
    }
}

/// An `InstrumentationScope`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentationScope {
    /// Scope name.
    pub name: String,

    /// Scope version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl InstrumentationScope {
    pub(super) fn new(scope: &model::InstrumentationScope) -> Self {
        Self {
            name: scope.name.clone(),
            version: scope.version.clone(),
        }
    }
}
