//! Configuration document carried in the payload
//!
//! The schema is kept small and additive. Parsing is strict: any field
//! outside the schema is rejected at every level, and nothing but
//! whitespace may follow the first JSON value.

use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

use crate::error::ConfigError;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// End-to-end test settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub e2e: Option<E2eConfig>,
}

/// End-to-end test settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct E2eConfig {
    /// Where to POST the beacon file
    ///
    /// A blank string means no beacon is configured.
    #[serde(
        rename = "beaconUrl",
        default,
        deserialize_with = "blank_url_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub beacon_url: Option<Url>,
}

fn blank_url_as_none<'de, D>(deserializer: D) -> Result<Option<Url>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => Url::parse(raw).map(Some).map_err(serde::de::Error::custom),
    }
}

impl Config {
    /// Parse a configuration document strictly.
    pub fn from_json_slice(raw: &[u8]) -> Result<Self, ConfigError> {
        let mut de = serde_json::Deserializer::from_slice(raw);
        let config = Self::deserialize(&mut de).map_err(ConfigError::InvalidJson)?;

        // Second pass: only whitespace may remain after the first value.
        de.end().map_err(|err| {
            if err.is_syntax() || err.is_data() {
                ConfigError::TrailingData
            } else {
                ConfigError::InvalidJson(err)
            }
        })?;

        Ok(config)
    }

    /// Configured e2e beacon URL, if any
    pub fn e2e_beacon_url(&self) -> Option<&Url> {
        self.e2e.as_ref().and_then(|e2e| e2e.beacon_url.as_ref())
    }

    /// Render as indented JSON
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(ConfigError::InvalidJson)
    }
}
