//! Encoder configuration.

use serde::{Deserialize, Serialize};

use crate::domain::EncodeError;

/// Tag prepended to every record name unless configured otherwise.
pub const DEFAULT_TAG: &str = "[bridge.nativebridge][Native][ResultUtil] ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Prefix of every `name` field. Kept verbatim, trailing space included.
    pub tag: String,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            tag: DEFAULT_TAG.to_string(),
        }
    }
}

impl EncoderConfig {
    pub fn with_tag(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }

    /// Parses a JSON object such as `{"tag": "[my.plugin] "}`; missing keys
    /// fall back to the defaults.
    pub fn from_json(s: &str) -> Result<Self, EncodeError> {
        serde_json::from_str(s).map_err(|e| EncodeError::InvalidConfig(e.to_string()))
    }
}
