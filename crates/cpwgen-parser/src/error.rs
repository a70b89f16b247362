use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid expression for \"{key}\": {expr}")]
    InvalidExpression { key: String, expr: String },

    #[error("unknown variable \"{name}\" referenced while evaluating \"{key}\"")]
    UnknownVariable { key: String, name: String },

    #[error("expression evaluation failed for \"{key}\": {message}")]
    Eval { key: String, message: String },

    #[error("\"{key}\" evaluated to a non-finite value")]
    NotFinite { key: String },
}
