use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier as the backends send it: sometimes a JSON number, sometimes a string.
///
/// `==` compares strictly (a number never equals a string). Use [`EntityId::same_number`]
/// where the backends are known to mix representations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Number(serde_json::Number),
    Text(String),
}

impl EntityId {
    /// Numeric value after coercion. Blank strings coerce to zero, `0x`/`0o`/`0b`
    /// prefixes read as integers and `Infinity` is the only spelled-out number.
    /// Anything else that is not plain decimal yields NaN, which compares unequal
    /// to everything.
    pub fn as_number(&self) -> f64 {
        match self {
            EntityId::Number(n) => n.as_f64().unwrap_or(f64::NAN),
            EntityId::Text(s) => parse_numeric_text(s.trim()),
        }
    }

    /// Loose comparison: `5`, `"5"` and `"05"` are all the same identifier.
    pub fn same_number(&self, other: &EntityId) -> bool {
        self.as_number() == other.as_number()
    }
}

fn parse_numeric_text(text: &str) -> f64 {
    if text.is_empty() {
        return 0.0;
    }
    match text {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match text.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return u64::from_str_radix(&text[2..], radix)
            .map(|value| value as f64)
            .unwrap_or(f64::NAN);
    }

    // `str::parse` also takes "inf" and "nan"; keep to digits, sign, point and exponent.
    let decimal = text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E'));
    if decimal {
        text.parse().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

impl PartialEq for EntityId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (EntityId::Number(a), EntityId::Number(b)) => a.as_f64() == b.as_f64(),
            (EntityId::Text(a), EntityId::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Number(n) => write!(f, "{}", n),
            EntityId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for EntityId {
    fn from(value: u64) -> Self {
        EntityId::Number(value.into())
    }
}

impl From<i64> for EntityId {
    fn from(value: i64) -> Self {
        EntityId::Number(value.into())
    }
}

impl From<i32> for EntityId {
    fn from(value: i32) -> Self {
        EntityId::Number(i64::from(value).into())
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        EntityId::Text(value.to_string())
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        EntityId::Text(value)
    }
}
