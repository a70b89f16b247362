use serde::de::DeserializeOwned;

use crate::error::ComponentError;

/// Deserialize a component's option mapping into its typed options struct.
pub fn parse_options<T: DeserializeOwned>(
    class: &str,
    options: &serde_yaml::Mapping,
) -> Result<T, ComponentError> {
    serde_yaml::from_value(serde_yaml::Value::Mapping(options.clone())).map_err(|source| {
        ComponentError::Options {
            class: class.to_string(),
            source,
        }
    })
}

pub(crate) fn positive(option: &str, value: f64) -> Result<f64, ComponentError> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ComponentError::invalid(option, format!("must be > 0, got {value}")))
    }
}

pub(crate) fn non_negative(option: &str, value: f64) -> Result<f64, ComponentError> {
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(ComponentError::invalid(option, format!("must be >= 0, got {value}")))
    }
}
