//! Serializer configuration.

use figment::{providers::Env, Figment};
use serde::{Deserialize, Serialize};
use snafu::ResultExt as _;

use crate::error::{Configuration, SerializerError};

const fn default_presize_buffers() -> bool {
    true
}

const fn default_initial_buffer_capacity() -> usize {
    4096
}

const fn default_log_buffer_growth() -> bool {
    true
}

/// Wire format of export requests and responses.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Binary Protocol Buffers (`application/x-protobuf`).
    #[default]
    Protobuf,

    /// OTLP/JSON (`application/json`).
    Json,
}

impl ExportFormat {
    /// Returns the name of the format, as used in configuration and metric labels.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Protobuf => "protobuf",
            Self::Json => "json",
        }
    }

    /// Returns the HTTP content type of payloads in this format.
    pub const fn content_type(&self) -> &'static str {
        match self {
            Self::Protobuf => "application/x-protobuf",
            Self::Json => "application/json",
        }
    }
}

/// Serializer configuration.
///
/// All fields have defaults, so an empty configuration source yields a serializer that emits presized protobuf
/// payloads and logs any buffer growth.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SerializerConfiguration {
    /// Wire format of export requests and responses.
    ///
    /// Defaults to `protobuf`.
    #[serde(default)]
    format: ExportFormat,

    /// Whether to compute the exact encoded size of each protobuf request before writing it.
    ///
    /// When enabled, the output buffer is allocated once at exactly the right size. When disabled, the buffer starts
    /// at `initial_buffer_capacity` bytes and grows as needed.
    ///
    /// Defaults to `true`.
    #[serde(default = "default_presize_buffers")]
    presize_buffers: bool,

    /// Initial capacity of the output buffer, in bytes, when presizing is disabled.
    ///
    /// Defaults to 4096.
    #[serde(default = "default_initial_buffer_capacity")]
    initial_buffer_capacity: usize,

    /// Whether to log a warning, and increment a counter, whenever the output buffer has to grow.
    ///
    /// Defaults to `true`.
    #[serde(default = "default_log_buffer_growth")]
    log_buffer_growth: bool,
}

impl SerializerConfiguration {
    /// Loads the configuration from the given `Figment`.
    ///
    /// # Errors
    ///
    /// If a field is present but has an invalid value, an error is returned.
    pub fn from_figment(figment: &Figment) -> Result<Self, SerializerError> {
        figment.extract().context(Configuration)
    }

    /// Loads the configuration from environment variables starting with `prefix`.
    ///
    /// A trailing underscore is added to the prefix if missing, so a prefix of `OTLP` reads `OTLP_FORMAT`,
    /// `OTLP_PRESIZE_BUFFERS`, and so on.
    ///
    /// # Errors
    ///
    /// If a variable is present but has an invalid value, an error is returned.
    pub fn from_environment(prefix: &str) -> Result<Self, SerializerError> {
        let prefix = if prefix.ends_with('_') {
            prefix.to_string()
        } else {
            format!("{}_", prefix)
        };

        Self::from_figment(&Figment::new().merge(Env::prefixed(&prefix)))
    }

    /// Sets the wire format.
    pub fn with_format(mut self, format: ExportFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets whether protobuf requests are sized exactly before being written.
    pub fn with_presize_buffers(mut self, presize_buffers: bool) -> Self {
        self.presize_buffers = presize_buffers;
        self
    }

    /// Sets the initial output buffer capacity used when presizing is disabled.
    pub fn with_initial_buffer_capacity(mut self, initial_buffer_capacity: usize) -> Self {
        self.initial_buffer_capacity = initial_buffer_capacity;
        self
    }

    /// Sets whether buffer growth is logged.
    pub fn with_log_buffer_growth(mut self, log_buffer_growth: bool) -> Self {
        self.log_buffer_growth = log_buffer_growth;
        self
    }

    /// Returns the wire format.
    pub fn format(&self) -> ExportFormat {
        self.format
    }

    /// Returns `true` if protobuf requests are sized exactly before being written.
    pub fn presize_buffers(&self) -> bool {
        self.presize_buffers
    }

    /// Returns the initial output buffer capacity used when presizing is disabled.
    pub fn initial_buffer_capacity(&self) -> usize {
        self.initial_buffer_capacity
    }

    /// Returns `true` if buffer growth is logged.
    pub fn log_buffer_growth(&self) -> bool {
        self.log_buffer_growth
    }
}

impl Default for SerializerConfiguration {
    fn default() -> Self {
        Self {
            format: ExportFormat::default(),
            presize_buffers: default_presize_buffers(),
            initial_buffer_capacity: default_initial_buffer_capacity(),
            log_buffer_growth: default_log_buffer_growth(),
        }
    }
}
