use serde::{Deserialize, Serialize};

/// A scalar as written in a design file: either a plain number (millimetres) or an
/// expression such as `22um` or `cpw_width + 2*cpw_gap`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarExpr {
    Number(f64),
    String(String),
}

impl ScalarExpr {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScalarExpr::String(s) => Some(s),
            ScalarExpr::Number(_) => None,
        }
    }

    #[must_use]
    pub fn expr(s: &str) -> Self {
        ScalarExpr::String(s.to_string())
    }
}

impl From<f64> for ScalarExpr {
    fn from(value: f64) -> Self {
        ScalarExpr::Number(value)
    }
}
