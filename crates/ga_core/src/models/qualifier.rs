//! # Qualifier Tags
//!
//! Each event carries an ordered list of tagged attributes, for example
//! `[{"type": {"value": 31, "displayName": "Yellow"}}]`. Exports may hold the
//! list in JSON or in Python-literal notation (single quotes, `True`/`None`).
//! Both are accepted: Python literals are rewritten token by token into JSON
//! and then decoded against a fixed schema. Nothing is ever evaluated.

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// Display name of the key-pass tag.
pub const KEY_PASS: &str = "KeyPass";

/// A single qualifier tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Qualifier {
    /// Tag name (`displayName`)
    pub display_name: String,
    /// Numeric tag code (`type.value`), when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    /// Attached value, normalized to text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Qualifier {
    pub fn tag(display_name: &str) -> Self {
        Self {
            display_name: display_name.to_string(),
            code: None,
            value: None,
        }
    }
}

#[derive(Deserialize)]
struct WireQualifierType {
    #[serde(rename = "displayName")]
    display_name: String,
    #[serde(default)]
    value: Option<i64>,
}

#[derive(Deserialize)]
struct WireQualifier {
    #[serde(rename = "type")]
    kind: WireQualifierType,
    #[serde(default)]
    value: Option<serde_json::Value>,
}

impl From<WireQualifier> for Qualifier {
    fn from(wire: WireQualifier) -> Self {
        let value = match wire.value {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::String(s)) => Some(s),
            Some(other) => Some(other.to_string()),
        };
        Self {
            display_name: wire.kind.display_name,
            code: wire.kind.value,
            value,
        }
    }
}

/// Parse a serialized qualifier list.
///
/// Empty text, `[]`, `nan` and `None` all mean "no qualifiers".
pub fn parse_qualifiers(text: &str) -> Result<Vec<Qualifier>> {
    let trimmed = text.trim();
    if trimmed.is_empty()
        || trimmed == "[]"
        || trimmed.eq_ignore_ascii_case("nan")
        || trimmed == "None"
    {
        return Ok(Vec::new());
    }

    let wire: Vec<WireQualifier> = match serde_json::from_str(trimmed) {
        Ok(wire) => wire,
        Err(_) => {
            let json = python_literal_to_json(trimmed)?;
            serde_json::from_str(&json).map_err(|e| AnalysisError::Qualifiers(e.to_string()))?
        }
    };

    Ok(wire.into_iter().map(Qualifier::from).collect())
}

/// Rewrite a Python literal (lists, dicts, strings, numbers, `True`/`False`/`None`)
/// into JSON text.
fn python_literal_to_json(text: &str) -> Result<String> {
    let mut out = String::with_capacity(text.len() + 16);
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\'' | '"' => {
                let quote = c;
                out.push('"');
                let mut closed = false;
                while let Some(s) = chars.next() {
                    match s {
                        '\\' => {
                            let escaped = chars.next().ok_or_else(|| {
                                AnalysisError::Qualifiers("dangling escape".to_string())
                            })?;
                            match escaped {
                                '\'' => out.push('\''),
                                '"' => out.push_str("\\\""),
                                other => {
                                    out.push('\\');
                                    out.push(other);
                                }
                            }
                        }
                        '"' if quote == '\'' => out.push_str("\\\""),
                        s if s == quote => {
                            closed = true;
                            break;
                        }
                        s => out.push(s),
                    }
                }
                if !closed {
                    return Err(AnalysisError::Qualifiers("unterminated string".to_string()));
                }
                out.push('"');
            }
            // exponent of a number literal such as 1e-05
            'e' | 'E' if out.ends_with(|p: char| p.is_ascii_digit() || p == '.') => out.push(c),
            c if c.is_ascii_alphabetic() => {
                let mut word = String::from(c);
                while let Some(&n) = chars.peek() {
                    if n.is_ascii_alphanumeric() || n == '_' {
                        word.push(n);
                        chars.next();
                    } else {
                        break;
                    }
                }
                match word.as_str() {
                    "True" => out.push_str("true"),
                    "False" => out.push_str("false"),
                    "None" | "nan" => out.push_str("null"),
                    other => {
                        return Err(AnalysisError::Qualifiers(format!(
                            "unexpected identifier '{}'",
                            other
                        )))
                    }
                }
            }
            c => out.push(c),
        }
    }

    Ok(out)
}

/// Whether any qualifier carries the given display name.
pub fn has_tag(qualifiers: &[Qualifier], display_name: &str) -> bool {
    qualifiers.iter().any(|q| q.display_name == display_name)
}
