use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::expr::ScalarExpr;

/// A design file as written, before any option is resolved.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfig {
    #[serde(default)]
    pub variables: Option<IndexMap<String, ScalarExpr>>,

    #[serde(default)]
    pub components: IndexMap<String, RawComponent>,

    #[serde(default)]
    pub airbridges: Option<RawAirbridging>,
}

/// A component instance: a class name plus its option mapping.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawComponent {
    pub class: String,
    #[serde(default)]
    pub options: serde_yaml::Mapping,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawAirbridging {
    pub footprint: RawComponent,
    pub bridge_pitch: ScalarExpr,
    pub bridge_minimum_spacing: ScalarExpr,
    #[serde(default)]
    pub precision: Option<ScalarExpr>,
    #[serde(default)]
    pub on_error: OnError,
}

/// What to do when one path cannot be planned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnError {
    /// Fail the whole pass with the first error.
    #[default]
    Abort,
    /// Drop the offending path and keep going.
    Skip,
}

impl RawConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, Error> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}
