use super::Attributes;

/// The entity that produced a piece of telemetry.
///
/// Records refer to their resource through an `Arc<Resource>`, and records are grouped by resource *instance*: two
/// resources with identical contents, but allocated separately, end up in separate groups.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Resource {
    /// Resource attributes.
    pub attributes: Attributes,

    /// Number of attributes dropped by the SDK.
    pub dropped_attributes_count: u32,

    /// Schema URL of the resource attributes.
    pub schema_url: Option<String>,
}

impl Resource {
    /// Creates a new `Resource` with the given attributes.
    pub fn new(attributes: Attributes) -> Self {
        Self {
            attributes,
            ..Self::default()
        }
    }

    /// Sets the schema URL.
    pub fn with_schema_url(mut self, schema_url: impl Into<String>) -> Self {
        self.schema_url = Some(schema_url.into());
        self
    }
}

/// The library or module that generated a piece of telemetry.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct InstrumentationScope {
    /// Scope name.
    pub name: String,

    /// Scope version.
    pub version: Option<String>,

    /// Schema URL of the records emitted by this scope.
    pub schema_url: Option<String>,
}

impl InstrumentationScope {
    /// Creates a new `InstrumentationScope` with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the schema URL.
    pub fn with_schema_url(mut self, schema_url: impl Into<String>) -> Self {
        self.schema_url = Some(schema_url.into());
        self
    }

    /// Returns the grouping key of this scope, in the form `name@version:schemaUrl`.
    ///
    /// Missing parts are replaced with empty strings, so a scope without a version or schema URL has a key of
    /// `name@:`.
    pub fn key(&self) -> String {
        format!(
            "{}@{}:{}",
            self.name,
            self.version.as_deref().unwrap_or_default(),
            self.schema_url.as_deref().unwrap_or_default()
        )
    }
}
