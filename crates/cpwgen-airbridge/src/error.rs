use cpwgen_components::ComponentError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AirbridgeError {
    #[error("invalid path: {message}")]
    InvalidPath { message: String },

    #[error("invalid parameter \"{name}\": {message}")]
    InvalidParameter { name: &'static str, message: String },

    #[error("unsupported footprint source \"{class}\": {message}")]
    UnsupportedFootprint { class: String, message: String },

    #[error("no path named \"{name}\" in the design")]
    UnknownPath { name: String },

    #[error("path \"{name}\": {source}")]
    Path {
        name: String,
        #[source]
        source: Box<AirbridgeError>,
    },

    #[error(transparent)]
    Component(#[from] ComponentError),

    #[error(transparent)]
    Parser(#[from] cpwgen_parser::Error),
}

impl AirbridgeError {
    pub(crate) fn invalid_path(message: impl Into<String>) -> Self {
        Self::InvalidPath {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_parameter(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            message: message.into(),
        }
    }

    /// Attach the path name to a planning failure.
    pub(crate) fn in_path(self, name: &str) -> Self {
        Self::Path {
            name: name.to_string(),
            source: Box::new(self),
        }
    }
}
