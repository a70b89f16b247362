use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::eval::eval_in_context;
use crate::expr::ScalarExpr;

/// Resolved design variables, in millimetres.
///
/// Always contains the length units (`m`, `cm`, `mm`, `um`, `nm`) and the default
/// CPW cross-section (`cpw_width`, `cpw_gap`), followed by any user variables.
#[derive(Debug, Clone)]
pub struct Units {
    map: IndexMap<String, f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnitEntry {
    pub name: String,
    pub value: f64,
}

impl Default for Units {
    fn default() -> Self {
        // The defaults are plain literals; evaluation cannot fail.
        Self::parse(None).unwrap_or_else(|_| Self {
            map: IndexMap::new(),
        })
    }
}

impl Units {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<f64> {
        self.map.get(key).copied()
    }

    #[must_use]
    pub fn vars(&self) -> &IndexMap<String, f64> {
        &self.map
    }

    pub fn eval(&self, key: &str, expr: &str) -> Result<f64, Error> {
        eval_in_context(key, expr, &self.map)
    }

    /// Resolve a scalar option to millimetres. `key` names the option in error messages.
    pub fn value(&self, key: &str, raw: &ScalarExpr) -> Result<f64, Error> {
        eval_scalar_expr(key, raw, &self.map)
    }

    #[must_use]
    pub fn with_extra_vars(&self, extras: impl IntoIterator<Item = (String, f64)>) -> Self {
        let mut map = self.map.clone();
        for (k, v) in extras {
            map.insert(k, v);
        }
        Self { map }
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<UnitEntry> {
        self.map
            .iter()
            .map(|(k, v)| UnitEntry {
                name: k.clone(),
                value: *v,
            })
            .collect()
    }

    /// Build the variable table. User variables are evaluated in insertion order and
    /// may reference units, defaults, and earlier variables.
    pub fn parse(variables: Option<&IndexMap<String, ScalarExpr>>) -> Result<Self, Error> {
        let mut merged = default_units();
        if let Some(variables) = variables {
            for (k, v) in variables {
                merged.insert(k.clone(), v.clone());
            }
        }

        let mut resolved: IndexMap<String, f64> = IndexMap::new();
        for (key, raw) in merged {
            let value = eval_scalar_expr(&key, &raw, &resolved)?;
            resolved.insert(key, value);
        }

        Ok(Self { map: resolved })
    }
}

fn default_units() -> IndexMap<String, ScalarExpr> {
    let mut m = IndexMap::new();
    m.insert("m".to_string(), ScalarExpr::Number(1000.0));
    m.insert("cm".to_string(), ScalarExpr::Number(10.0));
    m.insert("mm".to_string(), ScalarExpr::Number(1.0));
    m.insert("um".to_string(), ScalarExpr::Number(0.001));
    m.insert("nm".to_string(), ScalarExpr::Number(0.000_001));
    m.insert("cpw_width".to_string(), ScalarExpr::expr("10um"));
    m.insert("cpw_gap".to_string(), ScalarExpr::expr("6um"));
    m
}

fn eval_scalar_expr(
    key: &str,
    raw: &ScalarExpr,
    vars: &IndexMap<String, f64>,
) -> Result<f64, Error> {
    match raw {
        ScalarExpr::Number(n) if n.is_finite() => Ok(*n),
        ScalarExpr::Number(_) => Err(Error::NotFinite {
            key: key.to_string(),
        }),
        ScalarExpr::String(expr) => eval_in_context(key, expr, vars),
    }
}
