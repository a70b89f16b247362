use thiserror::Error;

#[derive(Debug, Error)]
pub enum ComponentError {
    #[error(transparent)]
    Parser(#[from] cpwgen_parser::Error),

    #[error("invalid options for \"{class}\": {source}")]
    Options {
        class: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid option \"{option}\": {message}")]
    InvalidOption { option: String, message: String },

    #[error("unknown component class \"{class}\"")]
    UnknownClass { class: String },

    #[error("component \"{name}\" defined more than once")]
    DuplicateName { name: String },

    #[error("\"{name}\" has degenerate geometry: {message}")]
    Degenerate { name: String, message: String },
}

impl ComponentError {
    pub(crate) fn invalid(option: &str, message: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.to_string(),
            message: message.into(),
        }
    }
}
