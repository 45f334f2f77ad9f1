//! Typed values and the textual value codec.

use crate::dialect::Dialect;

/// A typed scalar parsed from a markup attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// String value (or any text the codec could not type).
    Str(String),
    /// Signed 64-bit integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// Boolean value.
    Bool(bool),
}

impl Scalar {
    /// Get as a string slice, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Get as an integer, if this is an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Scalar::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as a float. Integers promote.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Scalar::Float(f) => Some(*f),
            Scalar::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Get as a boolean, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Str(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Str(s)
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self {
        Scalar::Int(i)
    }
}

impl From<f64> for Scalar {
    fn from(f: f64) -> Self {
        Scalar::Float(f)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

/// One data slot of a [`PropertyDict`](crate::PropertyDict).
#[derive(Debug, Clone, PartialEq)]
pub enum DictValue {
    /// Empty stub, e.g. a declared-but-empty list.
    Null,
    /// Terminal property value.
    Scalar(Scalar),
    /// Nested section, exclusively owned by its parent.
    Dict(crate::PropertyDict),
}

impl DictValue {
    /// Get the scalar, if this slot holds one.
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            DictValue::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Get the nested dictionary, if this slot holds one.
    pub fn as_dict(&self) -> Option<&crate::PropertyDict> {
        match self {
            DictValue::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Get the nested dictionary mutably, if this slot holds one.
    pub fn as_dict_mut(&mut self) -> Option<&mut crate::PropertyDict> {
        match self {
            DictValue::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Get as a string slice, if this slot holds a string scalar.
    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar().and_then(Scalar::as_str)
    }

    /// Get as an integer, if this slot holds an integer scalar.
    pub fn as_int(&self) -> Option<i64> {
        self.as_scalar().and_then(Scalar::as_int)
    }

    /// Get as a float, if this slot holds a numeric scalar.
    pub fn as_float(&self) -> Option<f64> {
        self.as_scalar().and_then(Scalar::as_float)
    }

    /// Get as a boolean, if this slot holds a boolean scalar.
    pub fn as_bool(&self) -> Option<bool> {
        self.as_scalar().and_then(Scalar::as_bool)
    }

    /// Whether this slot is the empty stub.
    pub fn is_null(&self) -> bool {
        matches!(self, DictValue::Null)
    }
}

impl From<Scalar> for DictValue {
    fn from(value: Scalar) -> Self {
        DictValue::Scalar(value)
    }
}

impl From<&str> for DictValue {
    fn from(value: &str) -> Self {
        DictValue::Scalar(Scalar::from(value))
    }
}

impl From<i64> for DictValue {
    fn from(value: i64) -> Self {
        DictValue::Scalar(Scalar::Int(value))
    }
}

/// Decode attribute text into a typed scalar.
///
/// With `casting` off the text is returned unchanged as a string. With it on,
/// text containing a decimal point attempts a float parse, other text attempts
/// an integer parse, and what remains is compared case-sensitively against the
/// dialect's boolean literals. An unparseable token always falls back to its
/// original string form; decoding never fails.
pub fn decode(raw: &str, casting: bool, dialect: &Dialect) -> Scalar {
    if !casting {
        return Scalar::Str(raw.to_string());
    }

    if raw.contains('.') {
        if let Ok(f) = raw.parse::<f64>() {
            return Scalar::Float(f);
        }
    } else if let Ok(i) = raw.parse::<i64>() {
        return Scalar::Int(i);
    }

    if raw == dialect.true_literal {
        return Scalar::Bool(true);
    }
    if raw == dialect.false_literal {
        return Scalar::Bool(false);
    }

    Scalar::Str(raw.to_string())
}

/// Render a scalar back to attribute text.
///
/// Integral floats keep one decimal digit (`3.0`, not `3`) so that decoding
/// the rendering yields the same type back.
pub fn encode(value: &Scalar, dialect: &Dialect) -> String {
    match value {
        Scalar::Str(s) => s.clone(),
        Scalar::Int(i) => i.to_string(),
        Scalar::Float(f) => {
            if f.is_finite() && f.fract() == 0.0 {
                format!("{f:.1}")
            } else {
                f.to_string()
            }
        }
        Scalar::Bool(b) => {
            if *b {
                dialect.true_literal.to_string()
            } else {
                dialect.false_literal.to_string()
            }
        }
    }
}
