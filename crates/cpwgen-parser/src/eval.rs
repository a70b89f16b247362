use indexmap::IndexMap;
use std::str::FromStr;

use crate::error::Error;

/// Evaluate `expr` with `vars` in scope.
///
/// Juxtaposition is multiplication, so a unit suffix reads naturally: `22um` is `22*um`.
pub fn eval_in_context(key: &str, expr: &str, vars: &IndexMap<String, f64>) -> Result<f64, Error> {
    let normalized = insert_implicit_multiplication(expr);
    let (rewritten, ctx) = rewrite_expr_and_context(key, &normalized, vars)?;
    let parsed = meval::Expr::from_str(&rewritten).map_err(|_| Error::InvalidExpression {
        key: key.to_string(),
        expr: expr.to_string(),
    })?;
    let value = parsed.eval_with_context(ctx).map_err(|e| Error::Eval {
        key: key.to_string(),
        message: format!("{e}"),
    })?;
    if !value.is_finite() {
        return Err(Error::NotFinite {
            key: key.to_string(),
        });
    }
    Ok(value)
}

fn rewrite_expr_and_context(
    key: &str,
    expr: &str,
    vars: &IndexMap<String, f64>,
) -> Result<(String, meval::Context<'static>), Error> {
    let mut rewritten = String::with_capacity(expr.len());
    let mut ctx = meval::Context::new();

    let bytes = expr.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let ch = bytes[i] as char;
        if ch.is_ascii_digit() || ch == '.' {
            // Numbers pass through untouched, including any exponent, so `1e3` never
            // reaches the identifier branch as `e`.
            let end = scan_number(bytes, i);
            rewritten.push_str(&expr[i..end]);
            i = end;
        } else if is_ident_start(ch) {
            let start = i;
            i += 1;
            while i < bytes.len() && is_ident_continue(bytes[i] as char) {
                i += 1;
            }

            let ident = &expr[start..i];
            let mut j = i;
            while j < bytes.len() && (bytes[j] as char).is_whitespace() {
                j += 1;
            }
            let is_fn_call = j < bytes.len() && bytes[j] as char == '(';

            if is_fn_call {
                rewritten.push_str(ident);
                continue;
            }

            let Some(value) = vars.get(ident).copied() else {
                if is_allowed_builtin_constant(ident) {
                    rewritten.push_str(ident);
                    continue;
                }
                return Err(Error::UnknownVariable {
                    key: key.to_string(),
                    name: ident.to_string(),
                });
            };
            let safe = sanitize_ident(ident);
            ctx.var(safe.clone(), value);
            rewritten.push_str(&safe);
        } else {
            rewritten.push(ch);
            i += 1;
        }
    }

    Ok((rewritten, ctx))
}

/// Returns the end index of the numeric literal starting at `start`.
fn scan_number(bytes: &[u8], start: usize) -> usize {
    let mut i = start;
    while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
        i += 1;
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        if j < bytes.len() && bytes[j].is_ascii_digit() {
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            return j;
        }
    }
    i
}

fn insert_implicit_multiplication(expr: &str) -> String {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Tok {
        Number,
        Ident,
        LParen,
        RParen,
        Other,
    }

    fn is_known_function(name: &str) -> bool {
        matches!(
            name,
            "sqrt"
                | "sin"
                | "cos"
                | "tan"
                | "asin"
                | "acos"
                | "atan"
                | "abs"
                | "floor"
                | "ceil"
                | "round"
                | "min"
                | "max"
        )
    }

    let bytes = expr.as_bytes();
    let mut out = String::with_capacity(expr.len() + 8);
    let mut i = 0;
    let mut prev_tok: Option<Tok> = None;
    let mut prev_ident: Option<&str> = None;

    while i < bytes.len() {
        let c = bytes[i] as char;

        if c.is_whitespace() {
            out.push(c);
            i += 1;
            continue;
        }

        let (tok, text, ident_name) = if c.is_ascii_digit() || c == '.' {
            let end = scan_number(bytes, i);
            let mut s = expr[i..end].to_string();
            i = end;
            // `meval` doesn't accept floats like `.5`.
            if s.starts_with('.') {
                s.insert(0, '0');
            }
            (Tok::Number, s, None)
        } else if is_ident_start(c) {
            let start = i;
            i += 1;
            while i < bytes.len() && is_ident_continue(bytes[i] as char) {
                i += 1;
            }
            let s = &expr[start..i];
            (Tok::Ident, s.to_string(), Some(s))
        } else if c == '(' {
            i += 1;
            (Tok::LParen, "(".to_string(), None)
        } else if c == ')' {
            i += 1;
            (Tok::RParen, ")".to_string(), None)
        } else {
            let ch = expr[i..].chars().next().unwrap_or(c);
            i += ch.len_utf8();
            (Tok::Other, ch.to_string(), None)
        };

        let should_insert_mul = match (prev_tok, tok) {
            (Some(Tok::Number | Tok::Ident | Tok::RParen), Tok::Ident | Tok::Number) => true,
            (Some(Tok::Number | Tok::RParen), Tok::LParen) => true,
            (Some(Tok::Ident), Tok::LParen) => match prev_ident {
                Some(prev) => !is_known_function(prev),
                None => true,
            },
            _ => false,
        };

        if should_insert_mul {
            out.push('*');
        }

        out.push_str(&text);
        prev_tok = Some(tok);
        prev_ident = ident_name;
    }

    out
}

fn is_allowed_builtin_constant(ident: &str) -> bool {
    matches!(ident, "pi" | "e")
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn sanitize_ident(raw: &str) -> String {
    format!("v_{raw}")
}
