use std::fmt;

use cpwgen_airbridge::AirbridgeError;
use cpwgen_components::ComponentError;

/// Process exit status for each failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Usage = 1,
    Input = 2,
    Processing = 3,
}

#[derive(Debug)]
pub struct CliError {
    pub code: ErrorCode,
    pub message: String,
}

impl CliError {
    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Usage, message)
    }

    pub fn input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Input, message)
    }

    pub fn processing(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Processing, message)
    }

    fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.code as i32
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Bad options are the design file's fault; a degenerate shape is a processing failure.
impl From<ComponentError> for CliError {
    fn from(err: ComponentError) -> Self {
        match err {
            ComponentError::Degenerate { .. } => Self::processing(err.to_string()),
            _ => Self::input(err.to_string()),
        }
    }
}

impl From<AirbridgeError> for CliError {
    fn from(err: AirbridgeError) -> Self {
        match err {
            AirbridgeError::Component(inner) => inner.into(),
            AirbridgeError::Parser(_)
            | AirbridgeError::InvalidParameter { .. }
            | AirbridgeError::UnsupportedFootprint { .. } => Self::input(err.to_string()),
            _ => Self::processing(err.to_string()),
        }
    }
}
